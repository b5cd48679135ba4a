//! Leibniz series baseline
//!
//! pi = 4 * arctan(1), summed one term at a time. Convergence is linear
//! and extremely slow; the method exists as a contrast baseline for the
//! fast ones, not as a practical way to compute digits.

use crate::calculator::arctan::ArctanSeries;
use crate::calculator::engine::{Algorithm, StepCalculator};
use crate::errors::Result;
use crate::math::BigDecimal;

use num_traits::Zero;

/// Baseline state: a single embedded arctan(1) sub-calculator
pub struct SlowSeries {
    arctan_one: StepCalculator<ArctanSeries>,
}

impl SlowSeries {
    pub fn new(decimal_digits: u64, margin: u64) -> Result<Self> {
        let digits = decimal_digits + margin;
        Ok(Self {
            arctan_one: StepCalculator::new(
                ArctanSeries::new(BigDecimal::from(1), digits),
                decimal_digits,
                margin,
            )?,
        })
    }
}

impl Algorithm for SlowSeries {
    fn step_eval(&mut self) -> Result<BigDecimal> {
        self.arctan_one.step()?;

        let arctan = self.arctan_one.estimate().cloned().unwrap_or_else(BigDecimal::zero);
        Ok(&BigDecimal::from(4) * &arctan)
    }
}
