//! Convergence-tracked pi calculators
//!
//! The engine drives an algorithm one refinement step at a time and
//! reports stabilized digits and completion through callbacks; the
//! concrete algorithms live in their own modules and the factory below
//! hands drivers a boxed calculator for a chosen method.

pub mod arctan;
pub mod engine;
pub mod gauss_legendre;
pub mod machin;
pub mod method;
pub mod slow;

pub use arctan::ArctanSeries;
pub use engine::{Algorithm, Phase, PiCalculator, StepCalculator, StepOutcome};
pub use gauss_legendre::GaussLegendre;
pub use machin::Machin;
pub use method::Method;
pub use slow::SlowSeries;

use crate::errors::Result;

/// Builds a calculator for the chosen method.
///
/// `decimal_digits` is the precision the driver wants to display;
/// `margin` guard digits are computed on top of it to absorb truncation
/// drift during iteration.
pub fn create(method: Method, decimal_digits: u64, margin: u64) -> Result<Box<dyn PiCalculator>> {
    Ok(match method {
        Method::Slow => Box::new(StepCalculator::new(
            SlowSeries::new(decimal_digits, margin)?,
            decimal_digits,
            margin,
        )?),
        Method::Machin => Box::new(StepCalculator::new(
            Machin::new(decimal_digits, margin)?,
            decimal_digits,
            margin,
        )?),
        Method::GaussLegendre => Box::new(StepCalculator::new(
            GaussLegendre::new(decimal_digits, margin)?,
            decimal_digits,
            margin,
        )?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_builds_every_method() {
        for method in Method::all() {
            let calc = create(method, 5, 5).expect("factory should build");
            assert_eq!(calc.decimal_digits(), 5);
            assert_eq!(calc.digits(), 10);
            assert!(!calc.is_complete());
            assert!(calc.estimate().is_none());
        }
    }
}
