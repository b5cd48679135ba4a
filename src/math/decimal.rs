//! Arbitrary-precision decimal values
//!
//! A `BigDecimal` is an unbounded unsigned magnitude, a sign flag and a
//! scale (digit count to the right of the separator). Values are always
//! held in canonical form: trailing fractional zeros are trimmed and zero
//! carries no sign. Addition, subtraction and multiplication are exact;
//! division truncates toward zero at a caller-chosen digit budget.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use num_bigint::{BigInt, BigUint, Sign};
use num_traits::{One, Pow, Zero};

use crate::errors::{CalcError, Result};

/// 10^n as an unbounded magnitude
fn pow10(n: u64) -> BigUint {
    Pow::pow(BigUint::from(10u32), n)
}

/// Decimal digit count of a magnitude; zero counts as zero digits
fn count_digits(value: &BigUint) -> u64 {
    if value.is_zero() {
        0
    } else {
        value.to_str_radix(10).len() as u64
    }
}

/// Integer exponentiation by halving, so the multiplication count stays
/// logarithmic in the exponent
fn pow_magnitude(value: &BigUint, power: u64) -> BigUint {
    if power == 0 {
        return BigUint::one();
    }
    if power == 1 {
        return value.clone();
    }
    if power == 2 {
        return value * value;
    }

    let left = power / 2;
    let right = power - left;

    let left_result = pow_magnitude(value, left);
    if left == right {
        return &left_result * &left_result;
    }

    &left_result * &pow_magnitude(value, right)
}

/// Unbounded-precision decimal number in canonical form
#[derive(Debug, Clone)]
pub struct BigDecimal {
    /// Decimal digits without sign or separator
    magnitude: BigUint,

    /// Sign flag; always false when the magnitude is zero
    negative: bool,

    /// Digit count to the right of the separator
    scale: u64,

    /// Cached decimal digit count of the magnitude
    digit_count: u64,
}

impl BigDecimal {
    /// Default number of extra fractional digits carried by division when
    /// the caller does not choose a budget explicitly
    pub const DEFAULT_FLOAT_DIGITS: u64 = 8;

    /// Builds a canonical value from an integer and a scale.
    ///
    /// Trailing zeros inside the fractional part are trimmed and the sign
    /// of zero is dropped, so two equal numbers always share one
    /// representation.
    pub fn with_scale(value: BigInt, scale: u64) -> Self {
        let (sign, magnitude) = value.into_parts();
        Self::from_parts(magnitude, sign == Sign::Minus, scale)
    }

    /// Builds an integer-valued decimal (scale 0)
    pub fn new(value: BigInt) -> Self {
        Self::with_scale(value, 0)
    }

    fn from_parts(mut magnitude: BigUint, negative: bool, mut scale: u64) -> Self {
        while scale > 0 && (&magnitude % 10u32).is_zero() {
            magnitude = &magnitude / 10u32;
            scale -= 1;
        }

        let negative = negative && !magnitude.is_zero();
        let digit_count = count_digits(&magnitude);

        Self {
            magnitude,
            negative,
            scale,
            digit_count,
        }
    }

    /// Parses a decimal literal.
    ///
    /// Grammar: optional `-`, digits, optional `.` followed by digits.
    /// Leading zeros are consumed silently and a leading `.` reads as
    /// "zero before the separator". Any other character makes the parse
    /// fail with `None` rather than an error, so callers validating user
    /// input get a plain yes/no answer.
    pub fn parse(text: &str) -> Option<Self> {
        if text.is_empty() {
            return None;
        }

        let bytes = text.as_bytes();
        let mut i = 0;

        let negative = bytes[0] == b'-';
        if negative {
            i += 1;
        }

        while i < bytes.len() && bytes[i] == b'0' {
            i += 1;
        }

        let mut value = BigUint::zero();
        while i < bytes.len() {
            let c = bytes[i];
            if c == b'.' {
                break;
            }
            if !c.is_ascii_digit() {
                return None;
            }
            value = value * 10u32 + u32::from(c - b'0');
            i += 1;
        }

        // Either we stopped on the separator or ran off the end; stepping
        // past it is harmless in both cases.
        i += 1;
        let mut scale: u64 = 0;
        while i < bytes.len() {
            let c = bytes[i];
            if !c.is_ascii_digit() {
                return None;
            }
            value = value * 10u32 + u32::from(c - b'0');
            scale += 1;
            i += 1;
        }

        let sign = if negative { Sign::Minus } else { Sign::Plus };
        Some(Self::with_scale(BigInt::from_biguint(sign, value), scale))
    }

    /// Magnitude digits without sign or separator
    pub fn magnitude(&self) -> &BigUint {
        &self.magnitude
    }

    /// Whether the value is below zero
    pub fn is_negative(&self) -> bool {
        self.negative
    }

    /// Digit count to the right of the separator
    pub fn scale(&self) -> u64 {
        self.scale
    }

    /// Total decimal digit count of the magnitude; excludes sign and
    /// separator, zero for a zero value
    pub fn digit_count(&self) -> u64 {
        self.digit_count
    }

    /// Absolute value
    pub fn abs(&self) -> Self {
        Self {
            magnitude: self.magnitude.clone(),
            negative: false,
            scale: self.scale,
            digit_count: self.digit_count,
        }
    }

    /// Truncates toward zero to an integer
    pub fn to_bigint(&self) -> BigInt {
        let truncated = &self.magnitude / pow10(self.scale);
        let sign = if self.negative { Sign::Minus } else { Sign::Plus };
        BigInt::from_biguint(sign, truncated)
    }

    /// Magnitude rescaled to carry exactly `scale` fractional digits.
    /// Callers only ever grow the scale; canonical form guarantees the
    /// stored scale is minimal.
    fn to_scaled_magnitude(&self, scale: u64) -> BigUint {
        if self.scale == scale {
            return self.magnitude.clone();
        }
        &self.magnitude * pow10(scale - self.scale)
    }

    fn to_scaled_bigint(&self, scale: u64) -> BigInt {
        let sign = if self.negative { Sign::Minus } else { Sign::Plus };
        BigInt::from_biguint(sign, self.to_scaled_magnitude(scale))
    }

    /// Divides `dividend` by `divisor`, carrying `float_digits` fractional
    /// digits in the result and truncating toward zero.
    ///
    /// A zero divisor fails with [`CalcError::DivideByZero`] unless the
    /// dividend is zero too: 0/0 is defined as 1 so that the x/x = 1
    /// identity holds for every x.
    pub fn divide(dividend: &Self, divisor: &Self, float_digits: u64) -> Result<Self> {
        if divisor.magnitude.is_zero() {
            if dividend.magnitude.is_zero() {
                return Ok(Self::from(1));
            }
            return Err(CalcError::DivideByZero);
        }

        let align = dividend.scale.max(divisor.scale);
        let int_dividend = dividend.to_scaled_magnitude(align + float_digits);
        let int_divisor = divisor.to_scaled_magnitude(align);

        let quotient = int_dividend / int_divisor;
        let negative = dividend.negative != divisor.negative;

        Ok(Self::from_parts(quotient, negative, float_digits))
    }

    /// Remainder left after dividing at the given digit budget:
    /// `dividend - divide(dividend, divisor) * divisor`
    pub fn remainder(dividend: &Self, divisor: &Self, float_digits: u64) -> Result<Self> {
        let quotient = Self::divide(dividend, divisor, float_digits)?;
        Ok(dividend - &(&quotient * divisor))
    }

    /// Raises the value to an integer exponent.
    ///
    /// Positive exponents square-and-multiply the magnitude exactly; the
    /// result is negative iff the base is negative and the exponent odd.
    /// A negative exponent raises to the positive exponent first and then
    /// takes the reciprocal through [`Self::divide`] at `float_digits`
    /// precision, so 0 to a negative power fails with
    /// [`CalcError::DivideByZero`].
    pub fn power(&self, exponent: i64, float_digits: u64) -> Result<Self> {
        if exponent == 0 {
            return Ok(Self::from(1));
        }
        if exponent == 1 {
            return Ok(self.clone());
        }

        let reciprocal = exponent < 0;
        let exponent = exponent.unsigned_abs();

        let magnitude = pow_magnitude(&self.magnitude, exponent);
        let negative = self.negative && exponent % 2 == 1;
        let raised = Self::from_parts(magnitude, negative, self.scale * exponent);

        if reciprocal {
            Self::divide(&Self::from(1), &raised, float_digits)
        } else {
            Ok(raised)
        }
    }
}

impl Ord for BigDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.negative != other.negative {
            return if self.negative {
                Ordering::Less
            } else {
                Ordering::Greater
            };
        }

        let scale = self.scale.max(other.scale);
        let a = self.to_scaled_magnitude(scale);
        let b = other.to_scaled_magnitude(scale);

        if self.negative {
            b.cmp(&a)
        } else {
            a.cmp(&b)
        }
    }
}

impl PartialOrd for BigDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for BigDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BigDecimal {}

impl Add for &BigDecimal {
    type Output = BigDecimal;

    fn add(self, other: Self) -> BigDecimal {
        let scale = self.scale.max(other.scale);
        let sum = self.to_scaled_bigint(scale) + other.to_scaled_bigint(scale);
        BigDecimal::with_scale(sum, scale)
    }
}

impl Sub for &BigDecimal {
    type Output = BigDecimal;

    fn sub(self, other: Self) -> BigDecimal {
        let scale = self.scale.max(other.scale);
        let difference = self.to_scaled_bigint(scale) - other.to_scaled_bigint(scale);
        BigDecimal::with_scale(difference, scale)
    }
}

impl Mul for &BigDecimal {
    type Output = BigDecimal;

    fn mul(self, other: Self) -> BigDecimal {
        BigDecimal::from_parts(
            &self.magnitude * &other.magnitude,
            self.negative != other.negative,
            self.scale + other.scale,
        )
    }
}

macro_rules! forward_binop {
    ($trait:ident, $method:ident) => {
        impl $trait for BigDecimal {
            type Output = BigDecimal;
            fn $method(self, other: BigDecimal) -> BigDecimal {
                $trait::$method(&self, &other)
            }
        }

        impl $trait<&BigDecimal> for BigDecimal {
            type Output = BigDecimal;
            fn $method(self, other: &BigDecimal) -> BigDecimal {
                $trait::$method(&self, other)
            }
        }

        impl $trait<BigDecimal> for &BigDecimal {
            type Output = BigDecimal;
            fn $method(self, other: BigDecimal) -> BigDecimal {
                $trait::$method(self, &other)
            }
        }
    };
}

forward_binop!(Add, add);
forward_binop!(Sub, sub);
forward_binop!(Mul, mul);

impl Neg for &BigDecimal {
    type Output = BigDecimal;

    fn neg(self) -> BigDecimal {
        BigDecimal {
            magnitude: self.magnitude.clone(),
            negative: !self.negative && !self.magnitude.is_zero(),
            scale: self.scale,
            digit_count: self.digit_count,
        }
    }
}

impl Neg for BigDecimal {
    type Output = BigDecimal;

    fn neg(self) -> BigDecimal {
        -&self
    }
}

impl Zero for BigDecimal {
    fn zero() -> Self {
        Self::from(0)
    }

    fn is_zero(&self) -> bool {
        self.magnitude.is_zero()
    }
}

impl One for BigDecimal {
    fn one() -> Self {
        Self::from(1)
    }
}

impl From<BigInt> for BigDecimal {
    fn from(value: BigInt) -> Self {
        Self::new(value)
    }
}

impl From<BigUint> for BigDecimal {
    fn from(value: BigUint) -> Self {
        Self::from_parts(value, false, 0)
    }
}

impl From<i32> for BigDecimal {
    fn from(value: i32) -> Self {
        Self::new(BigInt::from(value))
    }
}

impl From<i64> for BigDecimal {
    fn from(value: i64) -> Self {
        Self::new(BigInt::from(value))
    }
}

impl From<u32> for BigDecimal {
    fn from(value: u32) -> Self {
        Self::new(BigInt::from(value))
    }
}

impl From<u64> for BigDecimal {
    fn from(value: u64) -> Self {
        Self::new(BigInt::from(value))
    }
}

/// Failure of [`BigDecimal::from_str`]; carries no detail because the
/// grammar is small enough that the offending input says it all
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseBigDecimalError;

impl fmt::Display for ParseBigDecimalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid decimal literal")
    }
}

impl std::error::Error for ParseBigDecimalError {}

impl FromStr for BigDecimal {
    type Err = ParseBigDecimalError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        BigDecimal::parse(s).ok_or(ParseBigDecimalError)
    }
}

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.magnitude.is_zero() {
            return f.write_str("0");
        }

        let digits = self.magnitude.to_str_radix(10);
        let len = digits.len() as u64;
        let mut out = String::with_capacity(digits.len() + 2);

        if self.negative {
            out.push('-');
        }

        if self.scale == 0 {
            out.push_str(&digits);
        } else if self.scale >= len {
            out.push_str("0.");
            for _ in 0..(self.scale - len) {
                out.push('0');
            }
            out.push_str(&digits);
        } else {
            let split = (len - self.scale) as usize;
            out.push_str(&digits[..split]);
            out.push('.');
            out.push_str(&digits[split..]);
        }

        f.write_str(&out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(text: &str) -> BigDecimal {
        BigDecimal::parse(text).expect("test literal should parse")
    }

    #[test]
    fn test_canonical_trim() {
        let value = BigDecimal::with_scale(BigInt::from(12300), 3);
        assert_eq!(value.scale(), 1);
        assert_eq!(value.digit_count(), 3);
        assert_eq!(value.to_string(), "12.3");
    }

    #[test]
    fn test_zero_has_no_sign_and_no_scale() {
        let value = BigDecimal::with_scale(BigInt::from(0), 7);
        assert!(!value.is_negative());
        assert_eq!(value.scale(), 0);
        assert_eq!(value.digit_count(), 0);
        assert_eq!(value.to_string(), "0");

        let negated = -BigDecimal::from(0);
        assert!(!negated.is_negative());
    }

    #[test]
    fn test_parse_basic_forms() {
        assert_eq!(dec("12.345").to_string(), "12.345");
        assert_eq!(dec("-0.5").to_string(), "-0.5");
        assert_eq!(dec(".5").to_string(), "0.5");
        assert_eq!(dec("007").to_string(), "7");
        assert_eq!(dec("42").to_string(), "42");
    }

    #[test]
    fn test_parse_degenerate_forms_read_as_zero() {
        assert_eq!(dec("-"), BigDecimal::from(0));
        assert_eq!(dec("."), BigDecimal::from(0));
        assert_eq!(dec("-."), BigDecimal::from(0));
        assert_eq!(dec("000"), BigDecimal::from(0));
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert!(BigDecimal::parse("").is_none());
        assert!(BigDecimal::parse("12a").is_none());
        assert!(BigDecimal::parse("1.2.3").is_none());
        assert!(BigDecimal::parse("1,5").is_none());
        assert!(BigDecimal::parse("+5").is_none());
    }

    #[test]
    fn test_from_str_round_trip() {
        let value: BigDecimal = "-12.345".parse().expect("should parse");
        assert_eq!(value.to_string(), "-12.345");
        assert!("abc".parse::<BigDecimal>().is_err());
    }

    #[test]
    fn test_add_aligns_scales() {
        assert_eq!(dec("0.1") + dec("0.2"), dec("0.3"));
        assert_eq!(dec("1.05") + dec("2"), dec("3.05"));
        assert_eq!(dec("-1.5") + dec("0.5"), dec("-1"));
    }

    #[test]
    fn test_sub_is_exact() {
        assert_eq!(dec("1") - dec("0.999"), dec("0.001"));
        assert_eq!(dec("0.3") - dec("0.3"), BigDecimal::from(0));
        assert_eq!(dec("-2") - dec("3.25"), dec("-5.25"));
    }

    #[test]
    fn test_mul_signs_and_scales() {
        assert_eq!(dec("1.25") * dec("-0.4"), dec("-0.5"));
        assert_eq!(dec("-3") * dec("-7"), dec("21"));
        assert_eq!(dec("0.01") * dec("0.01"), dec("0.0001"));
    }

    #[test]
    fn test_divide_truncates_toward_zero() {
        let third = BigDecimal::divide(&dec("1"), &dec("3"), 8).expect("division should succeed");
        assert_eq!(third.to_string(), "0.33333333");

        let negative = BigDecimal::divide(&dec("-7"), &dec("2"), 0).expect("division should succeed");
        assert_eq!(negative.to_string(), "-3");

        let halves = BigDecimal::divide(&dec("7"), &dec("-2"), 3).expect("division should succeed");
        assert_eq!(halves.to_string(), "-3.5");

        let mixed = BigDecimal::divide(&dec("12.345"), &dec("0.5"), 4).expect("division should succeed");
        assert_eq!(mixed.to_string(), "24.69");
    }

    #[test]
    fn test_divide_by_zero() {
        let err = BigDecimal::divide(&dec("1"), &dec("0"), 8);
        assert_eq!(err, Err(CalcError::DivideByZero));
    }

    #[test]
    fn test_zero_over_zero_is_one() {
        let result = BigDecimal::divide(&dec("0"), &dec("0"), 8).expect("0/0 is defined");
        assert_eq!(result, BigDecimal::from(1));
    }

    #[test]
    fn test_x_over_x_is_one() {
        for text in ["3", "-0.25", "123456789.000001"] {
            let x = dec(text);
            let result = BigDecimal::divide(&x, &x, 12).expect("division should succeed");
            assert_eq!(result, BigDecimal::from(1), "failed for {text}");
        }
    }

    #[test]
    fn test_remainder() {
        let r = BigDecimal::remainder(&dec("7"), &dec("2"), 0).expect("remainder should succeed");
        assert_eq!(r, dec("1"));

        let r = BigDecimal::remainder(&dec("7.5"), &dec("2"), 0).expect("remainder should succeed");
        assert_eq!(r, dec("1.5"));
    }

    #[test]
    fn test_power_positive() {
        assert_eq!(dec("1.5").power(2, 8).expect("power"), dec("2.25"));
        assert_eq!(dec("-2").power(3, 8).expect("power"), dec("-8"));
        assert_eq!(dec("-0.3").power(2, 8).expect("power"), dec("0.09"));
        assert_eq!(dec("-0.3").power(3, 8).expect("power"), dec("-0.027"));
        assert_eq!(dec("2").power(10, 8).expect("power"), dec("1024"));
    }

    #[test]
    fn test_power_trivial_exponents() {
        assert_eq!(dec("9.9").power(0, 8).expect("power"), BigDecimal::from(1));
        assert_eq!(dec("9.9").power(1, 8).expect("power"), dec("9.9"));
    }

    #[test]
    fn test_power_negative_exponent_is_reciprocal() {
        assert_eq!(dec("0.5").power(-2, 8).expect("power"), dec("4"));
        assert_eq!(dec("-2").power(-3, 8).expect("power"), dec("-0.125"));
        assert_eq!(dec("10").power(-3, 8).expect("power"), dec("0.001"));
    }

    #[test]
    fn test_zero_to_negative_power_fails() {
        let err = dec("0").power(-2, 8);
        assert_eq!(err, Err(CalcError::DivideByZero));
    }

    #[test]
    fn test_ordering() {
        assert!(dec("0.5") < dec("0.75"));
        assert!(dec("-0.75") < dec("-0.5"));
        assert!(dec("-1") < dec("0"));
        assert!(dec("10") > dec("9.999999"));
        assert_eq!(dec("1.50").cmp(&dec("1.5")), Ordering::Equal);
    }

    #[test]
    fn test_equality_ignores_representation() {
        assert_eq!(BigDecimal::with_scale(BigInt::from(150), 2), dec("1.5"));
        assert_eq!(dec("0"), dec("0.000"));
    }

    #[test]
    fn test_to_bigint_truncates() {
        assert_eq!(dec("3.99").to_bigint(), BigInt::from(3));
        assert_eq!(dec("-3.99").to_bigint(), BigInt::from(-3));
        assert_eq!(dec("42").to_bigint(), BigInt::from(42));
    }

    #[test]
    fn test_display_pads_small_fractions() {
        assert_eq!(BigDecimal::with_scale(BigInt::from(5), 3).to_string(), "0.005");
        assert_eq!(BigDecimal::with_scale(BigInt::from(-5), 1).to_string(), "-0.5");
    }

    #[test]
    fn test_abs_and_neg() {
        assert_eq!(dec("-4.2").abs(), dec("4.2"));
        assert_eq!(dec("4.2").abs(), dec("4.2"));
        assert_eq!(-dec("4.2"), dec("-4.2"));
        assert_eq!(-dec("-4.2"), dec("4.2"));
    }

    #[test]
    fn test_zero_one_traits() {
        assert!(BigDecimal::zero().is_zero());
        assert!(!dec("0.1").is_zero());
        assert_eq!(BigDecimal::one(), dec("1"));
    }
}
