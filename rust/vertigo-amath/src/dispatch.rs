//! AMATH instruction dispatch and destination resolution.
//!
//! An instruction has the shape `AMATH <OP> <DEST> [ARG1] [ARG2] ...`. The
//! dispatcher resolves every operand, validates arity and domain through the
//! [`Registry`], computes, and only then writes the result to `<DEST>`. A
//! failed instruction leaves the interpreter state untouched.

use crate::registry::{unknown_operation, Registry};
use vertigo_core::{ErrorKind, InterpreterState, OperandResolver, Value, VertigoError};

/// Write target named by the `<DEST>` token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination<'a> {
    /// `&`: push onto the currently selected stack.
    StackPush,
    /// `+name`: an immutable, never writable.
    Immutable(&'a str),
    /// Anything else; only valid when it names an existing register.
    Register(&'a str),
}

impl<'a> Destination<'a> {
    pub fn parse(token: &'a str) -> Self {
        if token == "&" {
            Destination::StackPush
        } else if token.starts_with('+') {
            Destination::Immutable(token)
        } else {
            Destination::Register(token)
        }
    }

    /// Store `value`, overwriting a register or pushing onto a stack. Never
    /// creates registers or stacks.
    pub fn write(
        self,
        value: Value,
        state: &mut InterpreterState,
        line: usize,
    ) -> Result<(), VertigoError> {
        match self {
            Destination::StackPush => {
                let Some(name) = state
                    .current_stack_name
                    .as_deref()
                    .filter(|name| !name.is_empty())
                else {
                    return Err(VertigoError::new(
                        ErrorKind::Lookup,
                        line,
                        "No stack selected for '&' destination.",
                    ));
                };
                let Some(stack) = state.stacks.get_mut(name) else {
                    return Err(VertigoError::new(
                        ErrorKind::Lookup,
                        line,
                        format!("Selected stack '{}' does not exist.", name),
                    ));
                };
                tracing::trace!("push {} onto stack '{}'", value, name);
                stack.push(value);
                Ok(())
            }
            Destination::Immutable(name) => Err(VertigoError::new(
                ErrorKind::Type,
                line,
                format!("Cannot assign to immutable '{}'.", name),
            )),
            Destination::Register(name) => match state.registers.get_mut(name) {
                Some(slot) => {
                    tracing::trace!("store {} in register '{}'", value, name);
                    *slot = value;
                    Ok(())
                }
                None => Err(VertigoError::new(
                    ErrorKind::Name,
                    line,
                    format!("Invalid destination '{}'. Must be a register or '&'.", name),
                )),
            },
        }
    }
}

/// Validate and compute one operation on already-resolved operands.
///
/// Pure: the same mnemonic and operands always give the same outcome.
pub fn evaluate(mnemonic: &str, args: &[Value], line: usize) -> Result<Value, VertigoError> {
    let Some(desc) = Registry::global().lookup(mnemonic, args.len()) else {
        return Err(unknown_operation(&mnemonic.to_ascii_uppercase()).at_line(line));
    };
    desc.invoke(args).map_err(|err| err.at(desc.op, line))
}

/// Instruction handler registered under `AMATH`; operands resolve through the
/// interpreter state itself.
pub fn handle_amath(parts: &[&str], state: &mut InterpreterState) -> Result<(), VertigoError> {
    let line = state.current_line();
    let (mnemonic, destination, operands) = split_instruction(parts, line)?;
    let args = resolve_operands(operands, &*state)?;
    execute(mnemonic, destination, &args, state, line)
}

/// Like [`handle_amath`], with operand tokens resolved by a host-supplied resolver.
pub fn handle_amath_with<R>(
    parts: &[&str],
    state: &mut InterpreterState,
    resolver: &R,
) -> Result<(), VertigoError>
where
    R: OperandResolver + ?Sized,
{
    let line = state.current_line();
    let (mnemonic, destination, operands) = split_instruction(parts, line)?;
    let args = resolve_operands(operands, resolver)?;
    execute(mnemonic, destination, &args, state, line)
}

fn split_instruction<'p, 'a>(
    parts: &'p [&'a str],
    line: usize,
) -> Result<(&'a str, Destination<'a>, &'p [&'a str]), VertigoError> {
    match parts {
        [_, mnemonic, destination, operands @ ..] => {
            Ok((*mnemonic, Destination::parse(*destination), operands))
        }
        _ => Err(VertigoError::syntax(
            line,
            "Invalid AMATH syntax. Expected 'AMATH <operation> <destination> [arg1] [arg2...]'.",
        )),
    }
}

/// Resolve every operand left to right; the first resolver failure is returned
/// as-is.
fn resolve_operands<R>(operands: &[&str], resolver: &R) -> Result<Vec<Value>, VertigoError>
where
    R: OperandResolver + ?Sized,
{
    operands.iter().map(|token| resolver.resolve(token)).collect()
}

fn execute(
    mnemonic: &str,
    destination: Destination<'_>,
    args: &[Value],
    state: &mut InterpreterState,
    line: usize,
) -> Result<(), VertigoError> {
    tracing::debug!(
        "AMATH {} -> {:?} with {} operand(s) at line {}",
        mnemonic,
        destination,
        args.len(),
        line
    );
    if tracing::enabled!(tracing::Level::TRACE) {
        for (i, arg) in args.iter().enumerate() {
            tracing::trace!("  operand {}: {} ({})", i, arg, arg.type_name());
        }
    }
    let result = evaluate(mnemonic, args, line)?;
    destination.write(result, state, line)
}
