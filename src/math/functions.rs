//! Scalar functions over decimals
//!
//! Only the square root lives here: the iteration methods need it and
//! nothing else. It runs Newton's method at a fixed digit budget until
//! the iterate stops moving, which truncation guarantees happens.

use crate::errors::Result;
use crate::math::decimal::BigDecimal;

/// Square root of `x` by Newton iteration at `digits` fractional digits.
///
/// Starts from `x` itself and refines `r = (r + x/r) / 2` until two
/// consecutive iterates compare equal. With truncating division the
/// iterates reach an exact fixed point, so the loop terminates without
/// an epsilon.
pub fn sqrt(x: &BigDecimal, digits: u64) -> Result<BigDecimal> {
    let two = BigDecimal::from(2);
    let mut result = x.clone();
    let mut last_result = result.clone();

    loop {
        let quotient = BigDecimal::divide(x, &result, digits)?;
        result = BigDecimal::divide(&(&result + &quotient), &two, digits)?;

        if result == last_result {
            break;
        }

        last_result = result.clone();
    }

    Ok(result)
}
