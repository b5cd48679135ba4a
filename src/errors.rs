//! Error types for the pilab core
//!
//! Every failure is local and synchronous: an error surfaces to the
//! immediate caller of the operation that produced it and is never
//! retried internally.

use num_bigint::BigInt;
use thiserror::Error;

/// Main error type for the arithmetic core and the calculator factory
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalcError {
    /// Division with a zero divisor and a non-zero dividend.
    /// Zero divided by zero is not an error: it is defined as 1 so the
    /// x/x = 1 identity holds everywhere.
    #[error("divisor can only be zero when the dividend is zero")]
    DivideByZero,

    /// Rational construction with a denominator below 1
    #[error("denominator must be at least 1, got {value}")]
    NonPositiveDenominator { value: BigInt },

    /// Calculator factory called with an unrecognized method id
    #[error("unrecognized method: {name}")]
    UnknownMethod { name: String },
}

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, CalcError>;
