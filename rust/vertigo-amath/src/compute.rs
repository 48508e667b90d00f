//! Numeric semantics for each AMATH operation.
//!
//! Every function here takes operands that already passed the arity and domain
//! checks of its descriptor, so indexing into `args` is in bounds.

use crate::classify::ComputeError;
use num_bigint::BigInt;
use num_traits::{FromPrimitive, One, Signed, ToPrimitive, Zero};
use vertigo_core::{CoercionError, Complex64, Value};

// ---------------------------------------------------------------------------
// Real-valued functions
// ---------------------------------------------------------------------------

/// Reject results a libm call only produces outside its domain or range.
fn checked_real(input_finite: bool, input_nan: bool, y: f64) -> Result<Value, ComputeError> {
    if y.is_nan() && !input_nan {
        return Err(ComputeError::runtime("math domain error"));
    }
    if y.is_infinite() && input_finite {
        return Err(ComputeError::runtime("math range error"));
    }
    Ok(Value::Float(y))
}

fn unary_real(args: &[Value], f: fn(f64) -> f64) -> Result<Value, ComputeError> {
    let x = args[0].to_f64()?;
    checked_real(x.is_finite(), x.is_nan(), f(x))
}

pub(crate) fn sin(args: &[Value]) -> Result<Value, ComputeError> {
    unary_real(args, f64::sin)
}

pub(crate) fn cos(args: &[Value]) -> Result<Value, ComputeError> {
    unary_real(args, f64::cos)
}

pub(crate) fn tan(args: &[Value]) -> Result<Value, ComputeError> {
    unary_real(args, f64::tan)
}

pub(crate) fn asin(args: &[Value]) -> Result<Value, ComputeError> {
    unary_real(args, f64::asin)
}

pub(crate) fn acos(args: &[Value]) -> Result<Value, ComputeError> {
    unary_real(args, f64::acos)
}

pub(crate) fn atan(args: &[Value]) -> Result<Value, ComputeError> {
    unary_real(args, f64::atan)
}

pub(crate) fn atan2(args: &[Value]) -> Result<Value, ComputeError> {
    let y = args[0].to_f64()?;
    let x = args[1].to_f64()?;
    checked_real(
        y.is_finite() && x.is_finite(),
        y.is_nan() || x.is_nan(),
        y.atan2(x),
    )
}

/// Logarithm that also accepts integers past the `f64` range: the operand is
/// split into a 53-bit mantissa and a power of two.
fn logarithm(args: &[Value], f: fn(f64) -> f64, log_of_two: f64) -> Result<Value, ComputeError> {
    let Value::BigInt(n) = &args[0] else {
        return unary_real(args, f);
    };
    let shift = n.bits().saturating_sub(u64::from(f64::MANTISSA_DIGITS));
    let mantissa = (n >> shift as usize)
        .to_f64()
        .ok_or(CoercionError::TooLarge)?;
    Ok(Value::Float(f(mantissa) + shift as f64 * log_of_two))
}

pub(crate) fn ln(args: &[Value]) -> Result<Value, ComputeError> {
    logarithm(args, f64::ln, std::f64::consts::LN_2)
}

pub(crate) fn log10(args: &[Value]) -> Result<Value, ComputeError> {
    logarithm(args, f64::log10, std::f64::consts::LOG10_2)
}

pub(crate) fn exp(args: &[Value]) -> Result<Value, ComputeError> {
    unary_real(args, f64::exp)
}

pub(crate) fn sqrt(args: &[Value]) -> Result<Value, ComputeError> {
    unary_real(args, f64::sqrt)
}

pub(crate) fn abs(args: &[Value]) -> Result<Value, ComputeError> {
    Ok(match &args[0] {
        Value::Int(n) => n
            .checked_abs()
            .map(Value::Int)
            .unwrap_or_else(|| Value::BigInt(BigInt::from(*n).abs())),
        Value::BigInt(n) => Value::from_bigint(n.abs()),
        Value::Float(f) => Value::Float(f.abs()),
        Value::Complex(c) => Value::Float(c.norm()),
    })
}

// ---------------------------------------------------------------------------
// Integer-valued functions
// ---------------------------------------------------------------------------

/// Convert an already-integral float into an integer value.
fn float_to_integer(f: f64) -> Result<Value, ComputeError> {
    if f.is_nan() {
        return Err(ComputeError::runtime("cannot convert float NaN to integer"));
    }
    if f.is_infinite() {
        return Err(ComputeError::runtime(
            "cannot convert float infinity to integer",
        ));
    }
    if f >= i64::MIN as f64 && f < i64::MAX as f64 {
        return Ok(Value::Int(f as i64));
    }
    BigInt::from_f64(f)
        .map(Value::from_bigint)
        .ok_or_else(|| ComputeError::runtime(format!("cannot convert {} to integer", f)))
}

fn integral(args: &[Value], f: fn(f64) -> f64) -> Result<Value, ComputeError> {
    match &args[0] {
        Value::Int(_) | Value::BigInt(_) => Ok(args[0].clone()),
        Value::Float(x) => float_to_integer(f(*x)),
        other => Err(ComputeError::runtime(format!(
            "must be real number, not {}",
            other.type_name()
        ))),
    }
}

pub(crate) fn floor(args: &[Value]) -> Result<Value, ComputeError> {
    integral(args, f64::floor)
}

pub(crate) fn ceil(args: &[Value]) -> Result<Value, ComputeError> {
    integral(args, f64::ceil)
}

fn gcd_big(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.abs();
    let mut b = b.abs();
    while !b.is_zero() {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

pub(crate) fn gcd(args: &[Value]) -> Result<Value, ComputeError> {
    let a = args[0].to_bigint()?;
    let b = args[1].to_bigint()?;
    Ok(Value::from_bigint(gcd_big(&a, &b)))
}

pub(crate) fn lcm(args: &[Value]) -> Result<Value, ComputeError> {
    let a = args[0].to_bigint()?;
    let b = args[1].to_bigint()?;
    if a.is_zero() || b.is_zero() {
        return Ok(Value::Int(0));
    }
    let g = gcd_big(&a, &b);
    if g.is_zero() {
        return Err(ComputeError::zero_division(
            "LCM calculation error due to zero argument.",
        ));
    }
    Ok(Value::from_bigint((&a * &b).abs() / g))
}

pub(crate) fn factorial(args: &[Value]) -> Result<Value, ComputeError> {
    let n = args[0]
        .as_exact_integer()
        .ok_or_else(|| ComputeError::domain("FACTORIAL requires a non-negative integer."))?;
    let n = n.to_i64().ok_or_else(|| {
        ComputeError::runtime(format!(
            "factorial() argument should not exceed {}",
            i64::MAX
        ))
    })?;
    let mut acc = BigInt::one();
    for k in 2..=n {
        acc *= k;
    }
    Ok(Value::from_bigint(acc))
}

// ---------------------------------------------------------------------------
// Rounding
// ---------------------------------------------------------------------------

pub(crate) fn round(args: &[Value]) -> Result<Value, ComputeError> {
    match args {
        [x] => round_to_integer(x),
        [x, places] => {
            let places = places.to_bigint().map_err(|_| {
                ComputeError::type_error("ROUND decimal places must be an integer.")
            })?;
            let places = places.to_i64().unwrap_or(if places.is_negative() {
                i64::MIN
            } else {
                i64::MAX
            });
            round_to_places(x, places)
        }
        _ => Err(ComputeError::syntax(format!(
            "ROUND takes 1 or 2 arguments, got {}",
            args.len()
        ))),
    }
}

fn round_to_integer(x: &Value) -> Result<Value, ComputeError> {
    match x {
        Value::Int(_) | Value::BigInt(_) => Ok(x.clone()),
        Value::Float(f) => float_to_integer(f.round_ties_even()),
        Value::Complex(_) => Err(ComputeError::runtime(
            "type complex doesn't define rounding",
        )),
    }
}

fn round_to_places(x: &Value, places: i64) -> Result<Value, ComputeError> {
    match x {
        Value::Float(f) => Ok(Value::Float(round_float(*f, places))),
        Value::Int(_) | Value::BigInt(_) => {
            let n = x.to_bigint()?;
            Ok(Value::from_bigint(round_integer(n, places)))
        }
        Value::Complex(_) => Err(ComputeError::type_error(
            "ROUND decimal places must be an integer.",
        )),
    }
}

/// Half-to-even rounding of the exact binary value at `places` decimal digits;
/// negative places round to tens, hundreds, and so on.
fn round_float(f: f64, places: i64) -> f64 {
    // Beyond these bounds every finite f64 rounds to itself or to zero.
    const MAX_PLACES: i64 = 400;
    if !f.is_finite() {
        return f;
    }
    let places = places.clamp(-MAX_PLACES, MAX_PLACES);
    if places >= 0 {
        // Float formatting is exact and rounds ties to even.
        return format!("{:.*}", places as usize, f).parse().unwrap_or(f);
    }
    let magnitude = f.abs();
    let Some(whole) = BigInt::from_f64(magnitude.floor()) else {
        return f;
    };
    let rounded = round_magnitude(whole, places.unsigned_abs(), magnitude.fract() > 0.0);
    rounded.to_f64().unwrap_or(magnitude).copysign(f)
}

fn round_integer(n: BigInt, places: i64) -> BigInt {
    if places >= 0 {
        return n;
    }
    let rounded = round_magnitude(n.abs(), places.unsigned_abs(), false);
    if n.is_negative() {
        -rounded
    } else {
        rounded
    }
}

/// Round a non-negative integer to a multiple of `10^shift`, ties to even.
/// `above` marks a discarded fraction below the units digit, which breaks ties
/// upward.
fn round_magnitude(magnitude: BigInt, shift: u64, above: bool) -> BigInt {
    let digits = magnitude.to_string().len() as u64;
    if shift > digits {
        return BigInt::zero();
    }
    let modulus = BigInt::from(10).pow(shift as u32);
    let mut quotient = &magnitude / &modulus;
    let remainder = &magnitude % &modulus;
    let two = BigInt::from(2);
    let twice = &remainder * &two;
    let odd = !(&quotient % &two).is_zero();
    if twice > modulus || (twice == modulus && (above || odd)) {
        quotient += BigInt::one();
    }
    quotient * modulus
}

// ---------------------------------------------------------------------------
// Complex numbers
// ---------------------------------------------------------------------------

/// `real + imag·i`, where either part may itself be complex.
pub(crate) fn complex(args: &[Value]) -> Result<Value, ComputeError> {
    let a = args[0].to_complex()?;
    let b = args[1].to_complex()?;
    Ok(Value::Complex(Complex64::new(a.re - b.im, a.im + b.re)))
}

fn complex_operand(args: &[Value]) -> Result<Complex64, ComputeError> {
    args[0].as_complex().ok_or_else(|| {
        ComputeError::type_error(format!(
            "expected a complex number, got {}",
            args[0].type_name()
        ))
    })
}

pub(crate) fn real_part(args: &[Value]) -> Result<Value, ComputeError> {
    Ok(Value::Float(complex_operand(args)?.re))
}

pub(crate) fn imag_part(args: &[Value]) -> Result<Value, ComputeError> {
    Ok(Value::Float(complex_operand(args)?.im))
}

pub(crate) fn conjugate(args: &[Value]) -> Result<Value, ComputeError> {
    Ok(Value::Complex(complex_operand(args)?.conj()))
}

pub(crate) fn magnitude(args: &[Value]) -> Result<Value, ComputeError> {
    Ok(Value::Float(complex_operand(args)?.norm()))
}

pub(crate) fn phase(args: &[Value]) -> Result<Value, ComputeError> {
    Ok(Value::Float(complex_operand(args)?.arg()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use vertigo_core::ErrorKind;

    fn float(v: Value) -> f64 {
        match v {
            Value::Float(f) => f,
            other => panic!("expected float, got {:?}", other),
        }
    }

    #[test]
    fn test_real_functions() {
        assert_eq!(float(sqrt(&[Value::Int(4)]).unwrap()), 2.0);
        assert_eq!(float(sin(&[Value::Int(0)]).unwrap()), 0.0);
        assert_eq!(float(exp(&[Value::Int(0)]).unwrap()), 1.0);
        assert!((float(log10(&[Value::Int(1000)]).unwrap()) - 3.0).abs() < 1e-12);
        assert_eq!(
            float(atan2(&[Value::Int(1), Value::Int(0)]).unwrap()),
            std::f64::consts::FRAC_PI_2
        );
    }

    #[test]
    fn test_domain_and_range_errors() {
        let err = asin(&[Value::Int(2)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Runtime);
        assert_eq!(err.message, "math domain error");
        let err = exp(&[Value::Int(1000)]).unwrap_err();
        assert_eq!(err.message, "math range error");
        // NaN in, NaN out is not a domain error.
        assert!(float(sin(&[Value::Float(f64::NAN)]).unwrap()).is_nan());
    }

    #[test]
    fn test_abs_keeps_kind() {
        assert!(matches!(abs(&[Value::Int(-3)]).unwrap(), Value::Int(3)));
        assert!(matches!(abs(&[Value::Int(i64::MIN)]).unwrap(), Value::BigInt(_)));
        assert_eq!(float(abs(&[Value::Float(-2.5)]).unwrap()), 2.5);
        assert_eq!(
            float(abs(&[Value::Complex(Complex64::new(3.0, 4.0))]).unwrap()),
            5.0
        );
    }

    #[test]
    fn test_floor_and_ceil_yield_integers() {
        assert!(matches!(floor(&[Value::Float(2.7)]).unwrap(), Value::Int(2)));
        assert!(matches!(floor(&[Value::Float(-2.1)]).unwrap(), Value::Int(-3)));
        assert!(matches!(ceil(&[Value::Float(2.1)]).unwrap(), Value::Int(3)));
        assert!(matches!(ceil(&[Value::Int(5)]).unwrap(), Value::Int(5)));
        assert!(matches!(floor(&[Value::Float(1e20)]).unwrap(), Value::BigInt(_)));
        assert_eq!(
            floor(&[Value::Float(f64::INFINITY)]).unwrap_err().kind,
            ErrorKind::Runtime
        );
    }

    #[test]
    fn test_gcd_and_lcm() {
        assert_eq!(gcd(&[Value::Int(12), Value::Int(18)]).unwrap(), Value::Int(6));
        assert_eq!(gcd(&[Value::Int(-12), Value::Int(18)]).unwrap(), Value::Int(6));
        assert_eq!(gcd(&[Value::Int(0), Value::Int(0)]).unwrap(), Value::Int(0));
        assert_eq!(lcm(&[Value::Int(4), Value::Int(6)]).unwrap(), Value::Int(12));
        assert_eq!(lcm(&[Value::Int(-4), Value::Int(6)]).unwrap(), Value::Int(12));
        assert_eq!(lcm(&[Value::Int(0), Value::Int(5)]).unwrap(), Value::Int(0));
        assert_eq!(
            lcm(&[Value::Float(3.0), Value::Int(5)]).unwrap(),
            Value::Int(15)
        );
    }

    #[test]
    fn test_factorial_promotes() {
        assert_eq!(factorial(&[Value::Int(0)]).unwrap(), Value::Int(1));
        assert_eq!(factorial(&[Value::Int(5)]).unwrap(), Value::Int(120));
        let big = factorial(&[Value::Int(25)]).unwrap();
        assert_eq!(big.to_string(), "15511210043330985984000000");
    }

    #[test]
    fn test_round_single_argument_is_half_even() {
        assert_eq!(round(&[Value::Float(2.5)]).unwrap(), Value::Int(2));
        assert_eq!(round(&[Value::Float(3.5)]).unwrap(), Value::Int(4));
        assert_eq!(round(&[Value::Float(-0.5)]).unwrap(), Value::Int(0));
        assert!(matches!(round(&[Value::Float(2.6)]).unwrap(), Value::Int(3)));
        assert!(matches!(round(&[Value::Int(7)]).unwrap(), Value::Int(7)));
    }

    #[test]
    fn test_round_to_places() {
        assert_eq!(
            float(round(&[Value::Float(1.23456), Value::Int(2)]).unwrap()),
            1.23
        );
        assert_eq!(
            float(round(&[Value::Float(1234.5), Value::Int(-2)]).unwrap()),
            1200.0
        );
        assert_eq!(
            float(round(&[Value::Float(1.5), Value::Int(400)]).unwrap()),
            1.5
        );
        assert_eq!(
            round(&[Value::Int(1250), Value::Int(-2)]).unwrap(),
            Value::Int(1200)
        );
        assert_eq!(
            round(&[Value::Int(1350), Value::Int(-2)]).unwrap(),
            Value::Int(1400)
        );
        assert_eq!(
            round(&[Value::Int(-1351), Value::Int(-2)]).unwrap(),
            Value::Int(-1400)
        );
        assert_eq!(
            round(&[Value::Int(42), Value::Int(-5)]).unwrap(),
            Value::Int(0)
        );
        assert_eq!(round(&[Value::Int(42), Value::Int(3)]).unwrap(), Value::Int(42));
    }

    #[test]
    fn test_round_uses_exact_binary_value() {
        // 2.675 is stored as 2.67499999..., so it is not a tie.
        assert_eq!(
            float(round(&[Value::Float(2.675), Value::Int(2)]).unwrap()),
            2.67
        );
        assert_eq!(
            float(round(&[Value::Float(1.005), Value::Int(2)]).unwrap()),
            1.0
        );
        assert_eq!(
            float(round(&[Value::Float(0.125), Value::Int(2)]).unwrap()),
            0.12
        );
        assert_eq!(
            float(round(&[Value::Float(1250.5), Value::Int(-2)]).unwrap()),
            1300.0
        );
        assert_eq!(
            float(round(&[Value::Float(-1250.0), Value::Int(-2)]).unwrap()),
            -1200.0
        );
        assert_eq!(
            float(round(&[Value::Float(1e300), Value::Int(-400)]).unwrap()),
            0.0
        );
    }

    #[test]
    fn test_round_complex_classification() {
        let z = Value::Complex(Complex64::new(1.5, 1.0));
        assert_eq!(round(&[z.clone()]).unwrap_err().kind, ErrorKind::Runtime);
        let err = round(&[z, Value::Int(1)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::Type);
        assert_eq!(err.message, "ROUND decimal places must be an integer.");
    }

    #[test]
    fn test_logarithms_of_huge_integers() {
        let fact200 = factorial(&[Value::Int(200)]).unwrap();
        assert!(matches!(fact200, Value::BigInt(_)));
        let natural = float(ln(&[fact200]).unwrap());
        assert!((natural - 863.2319871924054).abs() < 1e-9, "got {}", natural);

        let log = float(log10(&[Value::BigInt(BigInt::from(10).pow(400))]).unwrap());
        assert!((log - 400.0).abs() < 1e-9, "got {}", log);

        // Small big integers agree with the direct f64 path.
        let just_big = Value::BigInt(BigInt::from(i64::MAX) * 2);
        let expected = (i64::MAX as f64 * 2.0).ln();
        assert!((float(ln(&[just_big]).unwrap()) - expected).abs() < 1e-12);
    }

    #[test]
    fn test_complex_construction() {
        let z = complex(&[Value::Int(3), Value::Int(4)]).unwrap();
        assert_eq!(z, Value::Complex(Complex64::new(3.0, 4.0)));
        let nested = complex(&[z, Value::Int(1)]).unwrap();
        assert_eq!(nested, Value::Complex(Complex64::new(3.0, 5.0)));
    }

    #[test]
    fn test_complex_accessors() {
        let z = [Value::Complex(Complex64::new(3.0, 4.0))];
        assert_eq!(float(real_part(&z).unwrap()), 3.0);
        assert_eq!(float(imag_part(&z).unwrap()), 4.0);
        assert_eq!(
            conjugate(&z).unwrap(),
            Value::Complex(Complex64::new(3.0, -4.0))
        );
        assert_eq!(float(magnitude(&z).unwrap()), 5.0);
        assert_eq!(
            float(phase(&[Value::Complex(Complex64::new(0.0, 1.0))]).unwrap()),
            1.0f64.atan2(0.0)
        );
        assert_eq!(real_part(&[Value::Int(1)]).unwrap_err().kind, ErrorKind::Type);
    }
}
