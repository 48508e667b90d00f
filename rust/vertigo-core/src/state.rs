//! Interpreter state shared between the host loop and instruction libraries.

use crate::error::{ErrorKind, VertigoError};
use crate::values::Value;
use num_bigint::BigInt;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Registers, named stacks and immutables for one program run.
///
/// Libraries read and overwrite entries but never add registers or stacks;
/// declaring them is the host's job.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InterpreterState {
    pub registers: BTreeMap<String, Value>,
    pub stacks: BTreeMap<String, Vec<Value>>,
    pub immutables: BTreeMap<String, Value>,
    pub current_stack_name: Option<String>,
    pub instruction_pointer: usize,
}

impl InterpreterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// State with the given registers declared and zeroed.
    pub fn with_registers<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut state = Self::new();
        for name in names {
            state.declare_register(name, Value::Int(0));
        }
        state
    }

    pub fn declare_register(&mut self, name: impl Into<String>, value: Value) {
        self.registers.insert(name.into(), value);
    }

    pub fn declare_stack(&mut self, name: impl Into<String>) {
        self.stacks.entry(name.into()).or_default();
    }

    pub fn select_stack(&mut self, name: Option<&str>) {
        self.current_stack_name = name.map(str::to_string);
    }

    /// 1-based line number of the instruction being executed.
    pub fn current_line(&self) -> usize {
        self.instruction_pointer + 1
    }

    pub fn register(&self, name: &str) -> Option<&Value> {
        self.registers.get(name)
    }

    pub fn stack(&self, name: &str) -> Option<&[Value]> {
        self.stacks.get(name).map(Vec::as_slice)
    }

    pub fn immutable(&self, name: &str) -> Option<&Value> {
        self.immutables.get(name)
    }

    /// Resolve an operand token: register, then immutable, then numeric literal.
    pub fn get_value(&self, token: &str) -> Result<Value, VertigoError> {
        if let Some(value) = self.registers.get(token) {
            return Ok(value.clone());
        }
        if let Some(value) = self.immutables.get(token) {
            return Ok(value.clone());
        }
        parse_literal(token).ok_or_else(|| {
            VertigoError::new(
                ErrorKind::Name,
                self.current_line(),
                format!("Undefined register, immutable or literal '{}'.", token),
            )
        })
    }
}

/// Turns operand tokens into values for a library handler.
pub trait OperandResolver {
    fn resolve(&self, token: &str) -> Result<Value, VertigoError>;
}

impl OperandResolver for InterpreterState {
    fn resolve(&self, token: &str) -> Result<Value, VertigoError> {
        self.get_value(token)
    }
}

fn parse_literal(token: &str) -> Option<Value> {
    if let Ok(n) = token.parse::<i64>() {
        return Some(Value::Int(n));
    }
    if let Ok(n) = token.parse::<BigInt>() {
        return Some(Value::from_bigint(n));
    }
    token.parse::<f64>().ok().map(Value::Float)
}
