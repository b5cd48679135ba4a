//! Arbitrary-precision fractions with partial auto-reduction
//!
//! A `BigRational` keeps its sign in the numerator and holds the
//! invariant `denominator >= 1`. After every operation the fraction is
//! compressed: an exactly-dividing denominator collapses to 1, otherwise
//! a fixed list of small primes is trial-divided out of both sides. This
//! is deliberately not a full GCD reduction: common factors above 31, or
//! factors only exposed after earlier primes are gone, survive. That is a
//! documented limitation of the representation, not a defect.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigInt;
use num_traits::{One, Pow, Signed, Zero};

use crate::errors::{CalcError, Result};
use crate::math::decimal::BigDecimal;

/// Trial-division primes for the partial reduction
const REDUCTION_PRIMES: [u32; 11] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31];

/// Unbounded-precision fraction; sign lives in the numerator and the
/// denominator is always at least 1
#[derive(Debug, Clone)]
pub struct BigRational {
    numerator: BigInt,
    denominator: BigInt,
}

impl BigRational {
    /// Builds a whole-number fraction (denominator 1)
    pub fn from_integer(numerator: BigInt) -> Self {
        Self {
            numerator,
            denominator: BigInt::one(),
        }
    }

    /// Builds a fraction, rejecting denominators below 1
    pub fn from_fraction(numerator: BigInt, denominator: BigInt) -> Result<Self> {
        if denominator < BigInt::one() {
            return Err(CalcError::NonPositiveDenominator { value: denominator });
        }

        let mut value = Self {
            numerator,
            denominator,
        };
        value.compress();
        Ok(value)
    }

    /// Value before division
    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    /// Value dividing the numerator; at least 1
    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Applies the partial-reduction invariant.
    ///
    /// Collapse to denominator 1 when the division is exact; otherwise
    /// walk the prime list in ascending order, dividing a prime out of
    /// both sides for as long as it divides both, and stopping once a
    /// prime exceeds either the denominator or the numerator magnitude.
    fn compress(&mut self) {
        if self.denominator.is_one() {
            return;
        }

        if (&self.numerator % &self.denominator).is_zero() {
            self.numerator = &self.numerator / &self.denominator;
            self.denominator = BigInt::one();
            return;
        }

        let mut index = 0;
        while index < REDUCTION_PRIMES.len() {
            let prime = BigInt::from(REDUCTION_PRIMES[index]);

            if prime > self.denominator || prime > self.numerator.abs() {
                break;
            }

            if (&self.numerator % &prime).is_zero() && (&self.denominator % &prime).is_zero() {
                self.numerator = &self.numerator / &prime;
                self.denominator = &self.denominator / &prime;
                continue;
            }

            index += 1;
        }
    }

    /// Adds a whole number
    pub fn add_int(&self, value: &BigInt) -> Self {
        let mut result = self.clone();
        result.numerator += value * &self.denominator;
        result.compress();
        result
    }

    /// Subtracts a whole number
    pub fn sub_int(&self, value: &BigInt) -> Self {
        let mut result = self.clone();
        result.numerator -= value * &self.denominator;
        result.compress();
        result
    }

    /// Multiplies by a whole number
    pub fn mul_int(&self, value: &BigInt) -> Self {
        let mut result = self.clone();
        result.numerator *= value;
        result.compress();
        result
    }

    /// Divides by a whole number, moving its sign into the numerator so
    /// the denominator invariant holds
    pub fn div_int(&self, value: &BigInt) -> Result<Self> {
        if value.is_zero() {
            return Err(CalcError::DivideByZero);
        }

        let mut result = self.clone();
        if value.is_negative() {
            result.numerator = -result.numerator;
            result.denominator *= -value;
        } else {
            result.denominator *= value;
        }
        result.compress();
        Ok(result)
    }

    /// Adds another fraction: equal denominators combine numerators
    /// directly, otherwise the denominators cross-multiply first
    pub fn add(&self, other: &Self) -> Self {
        let mut result = self.clone();
        if self.denominator == other.denominator {
            result.numerator += &other.numerator;
        } else {
            result.denominator *= &other.denominator;
            result.numerator *= &other.denominator;
            result.numerator += &other.numerator * &self.denominator;
        }
        result.compress();
        result
    }

    /// Subtracts another fraction, mirroring [`Self::add`]
    pub fn sub(&self, other: &Self) -> Self {
        let mut result = self.clone();
        if self.denominator == other.denominator {
            result.numerator -= &other.numerator;
        } else {
            result.denominator *= &other.denominator;
            result.numerator *= &other.denominator;
            result.numerator -= &other.numerator * &self.denominator;
        }
        result.compress();
        result
    }

    /// Multiplies by another fraction. Equal denominators combine the
    /// numerators directly, leaving the shared denominator in place;
    /// distinct denominators cross-multiply.
    pub fn mul(&self, other: &Self) -> Self {
        let mut result = self.clone();
        if self.denominator == other.denominator {
            result.numerator *= &other.numerator;
        } else {
            result.denominator *= &other.denominator;
            result.numerator *= &other.numerator;
        }
        result.compress();
        result
    }

    /// Divides by another fraction by multiplying with its reciprocal:
    /// the operand's numerator and denominator swap roles, and the sign
    /// moves into the numerator. A zero-valued operand fails with
    /// [`CalcError::DivideByZero`].
    pub fn divide(&self, other: &Self) -> Result<Self> {
        if other.numerator.is_zero() {
            return Err(CalcError::DivideByZero);
        }

        let mut result = self.clone();
        result.numerator *= &other.denominator;
        if other.numerator.is_negative() {
            result.numerator = -result.numerator;
            result.denominator *= -&other.numerator;
        } else {
            result.denominator *= &other.numerator;
        }
        result.compress();
        Ok(result)
    }

    /// Raises to an integer exponent. Positive exponents raise numerator
    /// and denominator independently by fast exponentiation; negative
    /// exponents swap the two roles first and then re-derive the sign so
    /// the denominator stays positive. Zero to a negative power fails
    /// with [`CalcError::DivideByZero`].
    pub fn power(&self, exponent: i64) -> Result<Self> {
        if exponent == 0 {
            return Ok(Self::from_integer(BigInt::one()));
        }
        if exponent == 1 {
            return Ok(self.clone());
        }

        if exponent > 1 {
            let mut result = Self {
                numerator: Pow::pow(&self.numerator, exponent as u64),
                denominator: Pow::pow(&self.denominator, exponent as u64),
            };
            result.compress();
            return Ok(result);
        }

        if self.numerator.is_zero() {
            return Err(CalcError::DivideByZero);
        }

        let exponent = exponent.unsigned_abs();
        let mut numerator = Pow::pow(&self.denominator, exponent);
        let mut denominator = Pow::pow(&self.numerator, exponent);

        if denominator.is_negative() {
            numerator = -numerator;
            denominator = -denominator;
        }

        let mut result = Self {
            numerator,
            denominator,
        };
        result.compress();
        Ok(result)
    }

    /// Converts to a decimal by dividing numerator by denominator at the
    /// given fractional digit budget
    pub fn to_decimal(&self, float_digits: u64) -> Result<BigDecimal> {
        let numerator = BigDecimal::new(self.numerator.clone());
        let denominator = BigDecimal::new(self.denominator.clone());
        BigDecimal::divide(&numerator, &denominator, float_digits)
    }
}

impl Ord for BigRational {
    /// Cross-multiplied comparison; valid because denominators are
    /// always positive
    fn cmp(&self, other: &Self) -> Ordering {
        if self.denominator == other.denominator {
            return self.numerator.cmp(&other.numerator);
        }

        let left = &self.numerator * &other.denominator;
        let right = &other.numerator * &self.denominator;
        left.cmp(&right)
    }
}

impl PartialOrd for BigRational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for BigRational {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BigRational {}

impl fmt::Display for BigRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BigRational({} / {})", self.numerator, self.denominator)
    }
}
