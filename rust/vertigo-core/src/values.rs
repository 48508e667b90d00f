//! Tagged value representation for Vertigo operands and results.

use num_bigint::BigInt;
use num_traits::{FromPrimitive, ToPrimitive};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Runtime values held in registers, stacks and immutables.
///
/// `Int` and `BigInt` are two encodings of the same integer kind: arithmetic
/// that leaves the `i64` range promotes to `BigInt`, and [`Value::from_bigint`]
/// folds anything that fits back into `Int`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Value {
    Int(i64),
    BigInt(BigInt),
    Float(f64),
    Complex(Complex64),
}

/// A complex number with `f64` parts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Complex64 {
    pub re: f64,
    pub im: f64,
}

impl Complex64 {
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    pub fn conj(self) -> Self {
        Self::new(self.re, -self.im)
    }

    /// Magnitude, `|z|`.
    pub fn norm(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Phase angle in radians, `atan2(im, re)`.
    pub fn arg(self) -> f64 {
        self.im.atan2(self.re)
    }
}

impl fmt::Display for Complex64 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.im.is_sign_negative() { '-' } else { '+' };
        write!(
            f,
            "({}{}{}j)",
            format_number(self.re, false),
            sign,
            format_number(self.im.abs(), false)
        )
    }
}

/// Why a value could not be viewed as the numeric kind an operation needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoercionError {
    #[error("must be real number, not {0}")]
    NotReal(&'static str),
    #[error("int too large to convert to float")]
    TooLarge,
    #[error("'{0}' cannot be interpreted as an integer")]
    NotInteger(String),
}

impl Value {
    /// Build an integer value, preferring the compact `Int` encoding.
    pub fn from_bigint(n: BigInt) -> Value {
        match n.to_i64() {
            Some(small) => Value::Int(small),
            None => Value::BigInt(n),
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Int(_) | Value::BigInt(_) => "int",
            Value::Float(_) => "float",
            Value::Complex(_) => "complex",
        }
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Int(_) | Value::BigInt(_))
    }

    pub fn is_complex(&self) -> bool {
        matches!(self, Value::Complex(_))
    }

    pub fn as_complex(&self) -> Option<Complex64> {
        match self {
            Value::Complex(c) => Some(*c),
            _ => None,
        }
    }

    /// The integer carried by an `Int`/`BigInt`; floats are never accepted,
    /// even when integral.
    pub fn as_exact_integer(&self) -> Option<BigInt> {
        match self {
            Value::Int(n) => Some(BigInt::from(*n)),
            Value::BigInt(n) => Some(n.clone()),
            _ => None,
        }
    }

    /// Real view of the value. Complex values are rejected, as are integers
    /// whose magnitude overflows `f64`.
    pub fn to_f64(&self) -> Result<f64, CoercionError> {
        match self {
            Value::Int(n) => Ok(*n as f64),
            Value::BigInt(n) => n
                .to_f64()
                .filter(|f| f.is_finite())
                .ok_or(CoercionError::TooLarge),
            Value::Float(f) => Ok(*f),
            Value::Complex(_) => Err(CoercionError::NotReal(self.type_name())),
        }
    }

    /// Complex view of the value; reals get a zero imaginary part.
    pub fn to_complex(&self) -> Result<Complex64, CoercionError> {
        match self {
            Value::Complex(c) => Ok(*c),
            other => Ok(Complex64::new(other.to_f64()?, 0.0)),
        }
    }

    /// Integer coercion: integers as-is, finite integral floats truncated
    /// losslessly, everything else rejected.
    pub fn to_bigint(&self) -> Result<BigInt, CoercionError> {
        match self {
            Value::Int(n) => Ok(BigInt::from(*n)),
            Value::BigInt(n) => Ok(n.clone()),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => {
                BigInt::from_f64(*f).ok_or_else(|| CoercionError::NotInteger(self.to_string()))
            }
            _ => Err(CoercionError::NotInteger(self.to_string())),
        }
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<BigInt> for Value {
    fn from(n: BigInt) -> Self {
        Value::from_bigint(n)
    }
}

impl From<Complex64> for Value {
    fn from(c: Complex64) -> Self {
        Value::Complex(c)
    }
}

/// Integral floats under `1e15` print in positional form; `with_point` keeps
/// a trailing `.0` so the value still reads as a float.
fn format_number(f: f64, with_point: bool) -> String {
    if f.fract() == 0.0 && f.abs() < 1e15 {
        let precision = usize::from(with_point);
        format!("{:.*}", precision, f)
    } else {
        f.to_string()
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{}", n),
            Value::BigInt(n) => write!(f, "{}", n),
            Value::Float(x) => write!(f, "{}", format_number(*x, true)),
            Value::Complex(c) => write!(f, "{}", c),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::BigInt(a), Value::BigInt(b)) => a == b,
            (Value::Int(a), Value::BigInt(b)) | (Value::BigInt(b), Value::Int(a)) => {
                BigInt::from(*a) == *b
            }
            (Value::Float(a), Value::Float(b)) => a == b,
            (Value::Int(a), Value::Float(b)) | (Value::Float(b), Value::Int(a)) => {
                (*a as f64) == *b
            }
            (Value::Complex(a), Value::Complex(b)) => a == b,
            _ => false,
        }
    }
}
