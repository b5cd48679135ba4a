//! Gauss-Legendre arithmetic-geometric-mean iteration
//!
//! Quadratic convergence: the stabilized digit count roughly doubles per
//! step. State (a, b, t, p) is seeded with (1, 1/sqrt(2), 1/4, 1); each
//! step stages the next quadruple and the estimate (a+b)^2 / (4t), and
//! the commit happens in `after_step` so a failed evaluation leaves the
//! committed state untouched.

use crate::calculator::engine::Algorithm;
use crate::errors::Result;
use crate::math::{sqrt, BigDecimal};

/// AGM iteration state
pub struct GaussLegendre {
    digits: u64,

    // Committed state from the previous step
    a0: BigDecimal,
    b0: BigDecimal,
    t0: BigDecimal,
    p0: BigDecimal,

    // Staged state, committed by after_step
    a: BigDecimal,
    b: BigDecimal,
    t: BigDecimal,
    p: BigDecimal,
}

impl GaussLegendre {
    pub fn new(decimal_digits: u64, margin: u64) -> Result<Self> {
        let digits = decimal_digits + margin;
        let one = BigDecimal::from(1);

        let root_two = sqrt(&BigDecimal::from(2), digits)?;
        let b0 = BigDecimal::divide(&one, &root_two, digits)?;
        let t0 = BigDecimal::divide(&one, &BigDecimal::from(4), digits)?;

        Ok(Self {
            digits,
            a0: one.clone(),
            b0,
            t0,
            p0: one.clone(),
            a: one.clone(),
            b: one.clone(),
            t: one.clone(),
            p: one,
        })
    }
}

impl Algorithm for GaussLegendre {
    fn step_eval(&mut self) -> Result<BigDecimal> {
        let two = BigDecimal::from(2);
        let four = BigDecimal::from(4);

        self.a = BigDecimal::divide(&(&self.a0 + &self.b0), &two, self.digits)?;
        self.b = sqrt(&(&self.a0 * &self.b0), self.digits)?;

        let delta_a = &self.a0 - &self.a;
        self.t = &self.t0 - &(&(&self.p0 * &delta_a) * &delta_a);
        self.p = &two * &self.p0;

        let a_plus_b = &self.a + &self.b;
        BigDecimal::divide(&(&a_plus_b * &a_plus_b), &(&four * &self.t), self.digits)
    }

    fn after_step(&mut self) {
        self.a0 = self.a.clone();
        self.b0 = self.b.clone();
        self.t0 = self.t.clone();
        self.p0 = self.p.clone();
    }
}
