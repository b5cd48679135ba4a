//! Exact arithmetic value types
//!
//! Unbounded-precision decimals and fractions, plus the scalar functions
//! built on them.

pub mod decimal;
pub mod functions;
pub mod rational;

pub use decimal::BigDecimal;
pub use functions::sqrt;
pub use rational::BigRational;
