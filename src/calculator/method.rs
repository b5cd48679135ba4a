//! Calculation method selection

use std::fmt;
use std::str::FromStr;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::errors::CalcError;

/// Available computation methods, slowest first
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Method {
    /// Leibniz series, 4*arctan(1): linear and very slow
    Slow,

    /// Machin's formula, 4*(4*arctan(1/5) - arctan(1/239)): near-linear
    /// with a much better ratio
    Machin,

    /// Gauss-Legendre AGM iteration: quadratic, digits double per step
    GaussLegendre,
}

impl Method {
    /// Every method, in display order
    pub fn all() -> [Method; 3] {
        [Method::Slow, Method::Machin, Method::GaussLegendre]
    }

    /// Stable identifier used on the command line and in config files
    pub fn id(&self) -> &'static str {
        match self {
            Method::Slow => "slow",
            Method::Machin => "machin",
            Method::GaussLegendre => "gauss-legendre",
        }
    }

    /// One-line description for listings
    pub fn describe(&self) -> &'static str {
        match self {
            Method::Slow => "Leibniz series 4*arctan(1); linear convergence, baseline only",
            Method::Machin => "Machin's formula 4*(4*arctan(1/5) - arctan(1/239))",
            Method::GaussLegendre => "Gauss-Legendre AGM iteration; quadratic convergence",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for Method {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "slow" => Ok(Method::Slow),
            "machin" => Ok(Method::Machin),
            "gauss-legendre" | "agm" => Ok(Method::GaussLegendre),
            other => Err(CalcError::UnknownMethod {
                name: other.to_string(),
            }),
        }
    }
}
