//! AMATH operation mnemonics, domain rules and result kinds.

use crate::classify::ComputeError;
use strum::{EnumCount, EnumIter, EnumString, IntoStaticStr};
use vertigo_core::Value;

/// Every operation the AMATH instruction understands.
///
/// Parsing is case-insensitive: `"sin"`, `"Sin"` and `"SIN"` all name [`AmathOp::Sin`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, EnumCount, EnumString, IntoStaticStr,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum AmathOp {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Atan2,
    Log,
    Log10,
    Exp,
    Sqrt,
    Abs,
    Floor,
    Ceil,
    Gcd,
    Lcm,
    Round,
    Factorial,
    Complex,
    RealPart,
    ImagPart,
    Conjugate,
    Magnitude,
    Phase,
}

impl AmathOp {
    pub fn parse(mnemonic: &str) -> Option<AmathOp> {
        mnemonic.parse().ok()
    }

    pub fn mnemonic(self) -> &'static str {
        self.into()
    }

    pub fn description(self) -> &'static str {
        match self {
            AmathOp::Sin => "Sine of an angle in radians",
            AmathOp::Cos => "Cosine of an angle in radians",
            AmathOp::Tan => "Tangent of an angle in radians",
            AmathOp::Asin => "Arc sine, in radians",
            AmathOp::Acos => "Arc cosine, in radians",
            AmathOp::Atan => "Arc tangent, in radians",
            AmathOp::Atan2 => "Two-argument arc tangent of (y, x)",
            AmathOp::Log => "Natural logarithm of a positive number",
            AmathOp::Log10 => "Base-10 logarithm of a positive number",
            AmathOp::Exp => "e raised to the argument",
            AmathOp::Sqrt => "Principal square root of a non-negative number",
            AmathOp::Abs => "Absolute value (magnitude for complex numbers)",
            AmathOp::Floor => "Largest integer not greater than the argument",
            AmathOp::Ceil => "Smallest integer not less than the argument",
            AmathOp::Gcd => "Greatest common divisor of two integers",
            AmathOp::Lcm => "Least common multiple of two integers",
            AmathOp::Round => "Round half-to-even, optionally to N decimal places",
            AmathOp::Factorial => "Factorial of a non-negative integer",
            AmathOp::Complex => "Build a complex number from real and imaginary parts",
            AmathOp::RealPart => "Real part of a complex number",
            AmathOp::ImagPart => "Imaginary part of a complex number",
            AmathOp::Conjugate => "Complex conjugate",
            AmathOp::Magnitude => "Magnitude of a complex number",
            AmathOp::Phase => "Phase angle of a complex number, atan2(imag, real)",
        }
    }
}

impl std::fmt::Display for AmathOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.mnemonic())
    }
}

/// Precondition on operand values, checked after arity and before computing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Domain {
    Unconstrained,
    /// Single real operand strictly greater than zero.
    Positive,
    /// Single real operand not less than zero.
    NonNegative,
    /// Every operand coercible to an integer.
    Integers,
    /// Optional second operand (decimal places) coercible to an integer.
    DecimalPlaces,
    /// Single operand that is an integer value and not negative.
    NonNegativeInteger,
    /// Single operand that is a complex value.
    ComplexOnly,
}

impl Domain {
    pub fn check(self, op: AmathOp, args: &[Value]) -> Result<(), ComputeError> {
        match self {
            Domain::Unconstrained => Ok(()),
            Domain::Positive => {
                let positive = match &args[0] {
                    Value::BigInt(n) => n.sign() == num_bigint::Sign::Plus,
                    other => other.to_f64()? > 0.0,
                };
                if positive {
                    Ok(())
                } else {
                    Err(ComputeError::domain(format!(
                        "{} of non-positive number.",
                        op.mnemonic()
                    )))
                }
            }
            Domain::NonNegative => {
                let x = args[0].to_f64()?;
                if x >= 0.0 {
                    Ok(())
                } else {
                    Err(ComputeError::domain(format!(
                        "{} of negative number.",
                        op.mnemonic()
                    )))
                }
            }
            Domain::Integers => {
                if args.iter().all(|a| a.to_bigint().is_ok()) {
                    Ok(())
                } else {
                    Err(ComputeError::type_error(format!(
                        "{} requires integer arguments.",
                        op.mnemonic()
                    )))
                }
            }
            Domain::DecimalPlaces => match args.get(1) {
                Some(places) if places.to_bigint().is_err() => Err(ComputeError::type_error(
                    format!("{} decimal places must be an integer.", op.mnemonic()),
                )),
                _ => Ok(()),
            },
            Domain::NonNegativeInteger => match args[0].as_exact_integer() {
                Some(n) if n.sign() != num_bigint::Sign::Minus => Ok(()),
                _ => Err(ComputeError::domain(format!(
                    "{} requires a non-negative integer.",
                    op.mnemonic()
                ))),
            },
            Domain::ComplexOnly => {
                if args[0].is_complex() {
                    Ok(())
                } else {
                    Err(ComputeError::type_error(format!(
                        "{} requires a complex number.",
                        op.mnemonic()
                    )))
                }
            }
        }
    }
}

/// Kind of value an operation produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResultKind {
    Real,
    Integer,
    /// Integer or real, following the operand.
    Number,
    Complex,
}

impl ResultKind {
    pub fn admits(self, value: &Value) -> bool {
        match self {
            ResultKind::Real => matches!(value, Value::Float(_)),
            ResultKind::Integer => value.is_integer(),
            ResultKind::Number => !value.is_complex(),
            ResultKind::Complex => value.is_complex(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vertigo_core::{Complex64, ErrorKind};

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(AmathOp::parse("sin"), Some(AmathOp::Sin));
        assert_eq!(AmathOp::parse("Log10"), Some(AmathOp::Log10));
        assert_eq!(AmathOp::parse("realpart"), Some(AmathOp::RealPart));
        assert_eq!(AmathOp::parse("ATAN2"), Some(AmathOp::Atan2));
        assert_eq!(AmathOp::parse("SINH"), None);
    }

    #[test]
    fn test_mnemonics_are_upper_case() {
        assert_eq!(AmathOp::Log10.mnemonic(), "LOG10");
        assert_eq!(AmathOp::ImagPart.mnemonic(), "IMAGPART");
        assert_eq!(AmathOp::Factorial.to_string(), "FACTORIAL");
    }

    #[test]
    fn test_positive_domain() {
        assert!(Domain::Positive.check(AmathOp::Log, &[Value::Int(1)]).is_ok());
        let err = Domain::Positive
            .check(AmathOp::Log, &[Value::Float(0.0)])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Value);
        let err = Domain::Positive
            .check(AmathOp::Log, &[Value::Float(f64::NAN)])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Value);

        let huge = num_bigint::BigInt::from(10).pow(400);
        assert!(Domain::Positive
            .check(AmathOp::Log, &[Value::BigInt(huge.clone())])
            .is_ok());
        let err = Domain::Positive
            .check(AmathOp::Log, &[Value::BigInt(-huge)])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Value);
    }

    #[test]
    fn test_real_domains_reject_complex_as_runtime() {
        let z = Value::Complex(Complex64::new(1.0, 1.0));
        let err = Domain::NonNegative.check(AmathOp::Sqrt, &[z]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Runtime);
    }

    #[test]
    fn test_integer_domains() {
        assert!(Domain::Integers
            .check(AmathOp::Gcd, &[Value::Int(4), Value::Float(6.0)])
            .is_ok());
        let err = Domain::Integers
            .check(AmathOp::Gcd, &[Value::Float(1.5), Value::Int(2)])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);

        assert!(Domain::DecimalPlaces
            .check(AmathOp::Round, &[Value::Float(1.25)])
            .is_ok());
        let err = Domain::DecimalPlaces
            .check(AmathOp::Round, &[Value::Float(1.25), Value::Float(0.5)])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
    }

    #[test]
    fn test_factorial_domain() {
        assert!(Domain::NonNegativeInteger
            .check(AmathOp::Factorial, &[Value::Int(0)])
            .is_ok());
        for bad in [Value::Int(-1), Value::Float(2.5), Value::Float(3.0)] {
            let err = Domain::NonNegativeInteger
                .check(AmathOp::Factorial, &[bad])
                .unwrap_err();
            assert_eq!(err.kind, ErrorKind::Value);
        }
    }

    #[test]
    fn test_result_kind_admits() {
        assert!(ResultKind::Integer.admits(&Value::Int(1)));
        assert!(!ResultKind::Integer.admits(&Value::Float(1.0)));
        assert!(ResultKind::Number.admits(&Value::Float(1.0)));
        assert!(!ResultKind::Real.admits(&Value::Complex(Complex64::new(0.0, 1.0))));
    }
}
