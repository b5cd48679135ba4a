//! Command-line argument parsing for pilab
//!
//! Provides clap-based CLI with subcommands and verbosity control.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::calculator::Method;

/// pilab - compute pi with exact arithmetic and watch it converge
#[derive(Parser, Debug)]
#[command(name = "pilab")]
#[command(version)]
#[command(about = "Terminal workbench for exact-arithmetic computation of pi", long_about = None)]
pub struct Args {
    /// Decimal digits of pi to compute
    #[arg(value_name = "DIGITS")]
    pub digits: Option<u64>,

    /// Computation method
    #[arg(short, long, value_enum)]
    pub method: Option<Method>,

    /// Guard digits computed beyond the requested precision
    #[arg(long)]
    pub margin: Option<u64>,

    /// Stop after this many steps even if not converged
    #[arg(long)]
    pub max_steps: Option<u64>,

    /// Emit machine-readable JSON events instead of a progress bar
    #[arg(long)]
    pub json: bool,

    /// Configuration file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Verbosity level: default (normal), -v (verbose)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Quiet mode (suppress all output except the final value)
    #[arg(short, long)]
    pub quiet: bool,

    /// Subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the available computation methods
    Methods,

    /// Display current configuration
    Config,
}

/// Verbosity level enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    Quiet,
    Normal,
    Verbose,
}

impl Args {
    /// Get verbosity level based on flags
    pub fn verbosity(&self) -> Verbosity {
        if self.quiet {
            Verbosity::Quiet
        } else if self.verbose > 0 {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }

    /// Check argument consistency
    pub fn validate(&self) -> Result<(), String> {
        if self.command.is_some() && self.digits.is_some() {
            return Err("Cannot specify a digit count with a subcommand.".to_string());
        }

        if let Some(0) = self.max_steps {
            return Err("--max-steps must be at least 1.".to_string());
        }

        Ok(())
    }
}

impl Verbosity {
    /// Check if the progress bar should be shown
    pub fn show_progress(&self) -> bool {
        !matches!(self, Verbosity::Quiet)
    }

    /// Check if per-update details should be printed
    pub fn show_events(&self) -> bool {
        matches!(self, Verbosity::Verbose)
    }
}
