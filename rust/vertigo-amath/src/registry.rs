//! Operation table: mnemonic → accepted arities, domain rule, compute function.

use crate::classify::ComputeError;
use crate::compute;
use crate::ops::{AmathOp, Domain, ResultKind};
use once_cell::sync::Lazy;
use std::fmt;
use strum::IntoEnumIterator;
use vertigo_core::Value;

pub type ComputeFn = fn(&[Value]) -> Result<Value, ComputeError>;

#[derive(Clone, Copy)]
pub struct OpDescriptor {
    pub op: AmathOp,
    pub arities: &'static [usize],
    pub domain: Domain,
    pub result: ResultKind,
    pub compute: ComputeFn,
}

impl fmt::Debug for OpDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OpDescriptor")
            .field("op", &self.op)
            .field("arities", &self.arities)
            .field("domain", &self.domain)
            .field("result", &self.result)
            .finish_non_exhaustive()
    }
}

impl OpDescriptor {
    pub fn accepts(&self, arity: usize) -> bool {
        self.arities.contains(&arity)
    }

    /// Validate operands against arity and domain, then compute.
    pub fn invoke(&self, args: &[Value]) -> Result<Value, ComputeError> {
        if !self.accepts(args.len()) {
            return Err(unknown_operation(self.op.mnemonic()));
        }
        self.domain.check(self.op, args)?;
        let value = (self.compute)(args)?;
        debug_assert!(
            self.result.admits(&value),
            "{} produced {} outside its result kind",
            self.op,
            value.type_name()
        );
        Ok(value)
    }
}

pub(crate) fn unknown_operation(mnemonic: &str) -> ComputeError {
    ComputeError::syntax(format!(
        "Unknown AMATH operation '{}' or incorrect number/types of arguments.",
        mnemonic
    ))
}

const UNARY: &[usize] = &[1];
const BINARY: &[usize] = &[2];
const UNARY_OR_BINARY: &[usize] = &[1, 2];

fn entry(
    op: AmathOp,
    arities: &'static [usize],
    domain: Domain,
    result: ResultKind,
    compute: ComputeFn,
) -> OpDescriptor {
    OpDescriptor {
        op,
        arities,
        domain,
        result,
        compute,
    }
}

fn descriptor(op: AmathOp) -> OpDescriptor {
    use AmathOp::*;
    match op {
        Sin => entry(op, UNARY, Domain::Unconstrained, ResultKind::Real, compute::sin),
        Cos => entry(op, UNARY, Domain::Unconstrained, ResultKind::Real, compute::cos),
        Tan => entry(op, UNARY, Domain::Unconstrained, ResultKind::Real, compute::tan),
        Asin => entry(op, UNARY, Domain::Unconstrained, ResultKind::Real, compute::asin),
        Acos => entry(op, UNARY, Domain::Unconstrained, ResultKind::Real, compute::acos),
        Atan => entry(op, UNARY, Domain::Unconstrained, ResultKind::Real, compute::atan),
        Atan2 => entry(op, BINARY, Domain::Unconstrained, ResultKind::Real, compute::atan2),
        Log => entry(op, UNARY, Domain::Positive, ResultKind::Real, compute::ln),
        Log10 => entry(op, UNARY, Domain::Positive, ResultKind::Real, compute::log10),
        Exp => entry(op, UNARY, Domain::Unconstrained, ResultKind::Real, compute::exp),
        Sqrt => entry(op, UNARY, Domain::NonNegative, ResultKind::Real, compute::sqrt),
        Abs => entry(op, UNARY, Domain::Unconstrained, ResultKind::Number, compute::abs),
        Floor => entry(op, UNARY, Domain::Unconstrained, ResultKind::Integer, compute::floor),
        Ceil => entry(op, UNARY, Domain::Unconstrained, ResultKind::Integer, compute::ceil),
        Gcd => entry(op, BINARY, Domain::Integers, ResultKind::Integer, compute::gcd),
        Lcm => entry(op, BINARY, Domain::Integers, ResultKind::Integer, compute::lcm),
        Round => entry(
            op,
            UNARY_OR_BINARY,
            Domain::DecimalPlaces,
            ResultKind::Number,
            compute::round,
        ),
        Factorial => entry(
            op,
            UNARY,
            Domain::NonNegativeInteger,
            ResultKind::Integer,
            compute::factorial,
        ),
        Complex => entry(op, BINARY, Domain::Unconstrained, ResultKind::Complex, compute::complex),
        RealPart => entry(op, UNARY, Domain::ComplexOnly, ResultKind::Real, compute::real_part),
        ImagPart => entry(op, UNARY, Domain::ComplexOnly, ResultKind::Real, compute::imag_part),
        Conjugate => entry(op, UNARY, Domain::ComplexOnly, ResultKind::Complex, compute::conjugate),
        Magnitude => entry(op, UNARY, Domain::ComplexOnly, ResultKind::Real, compute::magnitude),
        Phase => entry(op, UNARY, Domain::ComplexOnly, ResultKind::Real, compute::phase),
    }
}

/// All operation descriptors, in declaration order. Built once per process.
pub struct Registry {
    table: Vec<OpDescriptor>,
}

static REGISTRY: Lazy<Registry> = Lazy::new(|| Registry {
    table: AmathOp::iter().map(descriptor).collect(),
});

impl Registry {
    pub fn global() -> &'static Registry {
        &REGISTRY
    }

    pub fn get(&self, op: AmathOp) -> &OpDescriptor {
        // The table is built from `AmathOp::iter()`, so discriminant order matches.
        &self.table[op as usize]
    }

    /// Case-insensitive mnemonic lookup that only succeeds for an accepted arity.
    pub fn lookup(&self, mnemonic: &str, arity: usize) -> Option<&OpDescriptor> {
        AmathOp::parse(mnemonic)
            .map(|op| self.get(op))
            .filter(|desc| desc.accepts(arity))
    }

    pub fn iter(&self) -> impl Iterator<Item = &OpDescriptor> {
        self.table.iter()
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }
}
