//! Incremental arctangent series
//!
//! One term of `arctan(x) = x - x^3/3 + x^5/5 - ...` per step. The
//! running power and alternating sign are carried between steps so each
//! step costs one division and one multiply-accumulate.

use crate::calculator::engine::Algorithm;
use crate::errors::Result;
use crate::math::BigDecimal;

use num_traits::Zero;

/// Term-at-a-time evaluation state for `arctan(x)`
pub struct ArctanSeries {
    /// Working digit budget for the per-term division
    digits: u64,

    /// Running partial sum
    sum: BigDecimal,

    /// Current odd divisor: 1, 3, 5, ...
    i: BigDecimal,

    /// Alternating sign of the next term
    signal: BigDecimal,

    /// Running power of x: x, x^3, x^5, ...
    pot: BigDecimal,

    /// Cached x^2 used to advance the power
    x_sqr: BigDecimal,
}

impl ArctanSeries {
    pub fn new(x: BigDecimal, digits: u64) -> Self {
        let x_sqr = &x * &x;
        Self {
            digits,
            sum: BigDecimal::zero(),
            i: BigDecimal::from(1),
            signal: BigDecimal::from(1),
            pot: x,
            x_sqr,
        }
    }
}

impl Algorithm for ArctanSeries {
    fn step_eval(&mut self) -> Result<BigDecimal> {
        let term = BigDecimal::divide(&self.pot, &self.i, self.digits)?;
        self.sum = &self.sum + &(&self.signal * &term);
        Ok(self.sum.clone())
    }

    fn after_step(&mut self) {
        self.pot = &self.pot * &self.x_sqr;
        self.signal = -&self.signal;
        self.i = &self.i + &BigDecimal::from(2);
    }
}
