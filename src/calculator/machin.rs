//! Machin-style combination of two arctangent series
//!
//! pi = 4 * (4*arctan(1/5) - arctan(1/239)). Each outer step advances
//! both sub-calculators one term and recombines. The sub-calculators are
//! full convergence engines of their own: once one of them reaches exact
//! convergence its estimate freezes, which is what eventually freezes
//! the combined estimate too.

use crate::calculator::arctan::ArctanSeries;
use crate::calculator::engine::{Algorithm, StepCalculator};
use crate::errors::Result;
use crate::math::BigDecimal;

use num_traits::Zero;

/// Combination state: the two embedded arctan sub-calculators
pub struct Machin {
    arctan_fifth: StepCalculator<ArctanSeries>,
    arctan_239th: StepCalculator<ArctanSeries>,
}

impl Machin {
    pub fn new(decimal_digits: u64, margin: u64) -> Result<Self> {
        let digits = decimal_digits + margin;
        let one = BigDecimal::from(1);

        let fifth = BigDecimal::divide(&one, &BigDecimal::from(5), digits)?;
        let x239 = BigDecimal::divide(&one, &BigDecimal::from(239), digits)?;

        Ok(Self {
            arctan_fifth: StepCalculator::new(ArctanSeries::new(fifth, digits), decimal_digits, margin)?,
            arctan_239th: StepCalculator::new(ArctanSeries::new(x239, digits), decimal_digits, margin)?,
        })
    }
}

impl Algorithm for Machin {
    fn step_eval(&mut self) -> Result<BigDecimal> {
        self.arctan_fifth.step()?;
        self.arctan_239th.step()?;

        // Both sub-calculators have at least one estimate after the
        // step calls above; zero stands in the same way an unstarted
        // calculator reads as zero.
        let fifth = self.arctan_fifth.estimate().cloned().unwrap_or_else(BigDecimal::zero);
        let x239 = self.arctan_239th.estimate().cloned().unwrap_or_else(BigDecimal::zero);

        let four = BigDecimal::from(4);
        Ok(&four * &(&(&four * &fifth) - &x239))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::engine::StepOutcome;

    #[test]
    fn test_converges_to_pi_at_five_digits() {
        let mut calc = StepCalculator::new(
            Machin::new(5, 5).expect("machin should build"),
            5,
            5,
        )
        .expect("engine should build");

        let mut steps = 0;
        loop {
            steps += 1;
            if calc.step().expect("step should succeed") == StepOutcome::Complete {
                break;
            }
            assert!(steps < 100, "did not converge");
        }

        assert_eq!(steps, 7);
        assert_eq!(
            calc.estimate().expect("final estimate").to_string(),
            "3.1415926544"
        );
    }
}
