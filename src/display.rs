//! Terminal and machine-readable output
//!
//! Three rendering modes: an indicatif progress bar for humans, JSON
//! lines for scripts, and quiet for pipelines that only want the final
//! value on stdout.

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;

use crate::math::BigDecimal;

/// One event of a calculation run, for the JSON output mode
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum CalcEvent {
    Progress {
        progress: f64,
        stabilized_digits: u64,
        estimate: String,
    },
    Complete {
        requested_digits: u64,
        value: String,
    },
    Cancelled {
        steps: u64,
    },
    StepLimit {
        steps: u64,
    },
}

impl CalcEvent {
    /// Prints the event as one JSON line on stdout
    pub fn emit(&self) {
        match serde_json::to_string(self) {
            Ok(line) => println!("{line}"),
            Err(e) => eprintln!("{}: could not serialize event: {e}", "Warning".yellow()),
        }
    }
}

/// Builds the convergence progress bar (position is percent stabilized)
pub fn convergence_bar() -> ProgressBar {
    let pb = ProgressBar::new(100);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} Converging [{bar:40.cyan/blue}] {pos}% | {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}

/// Formats a final value to exactly `decimal_digits` fractional digits,
/// truncating extra guard digits and zero-padding if the canonical form
/// carries fewer (trailing zeros are trimmed away by canonicalization).
pub fn format_to_digits(value: &BigDecimal, decimal_digits: u64) -> String {
    let text = value.to_string();
    let digits = decimal_digits as usize;

    let (integer, fraction) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), f.to_string()),
        None => (text, String::new()),
    };

    if digits == 0 {
        return integer;
    }

    let mut fraction = fraction;
    fraction.truncate(digits);
    while fraction.len() < digits {
        fraction.push('0');
    }

    format!("{integer}.{fraction}")
}

/// Prints the completion summary for terminal mode
pub fn show_summary(value: &str, steps: u64, elapsed: std::time::Duration) {
    println!();
    println!("{}", "Converged.".green().bold());
    println!("{value}");
    println!(
        "{}",
        format!("{} steps in {:.2?}", steps, elapsed).dimmed()
    );
}

/// Prints the cancellation notice for terminal mode
pub fn show_cancelled(steps: u64) {
    println!();
    println!("{} after {} steps", "Cancelled".yellow().bold(), steps);
}

/// Prints the step-limit notice for terminal mode
pub fn show_step_limit(steps: u64) {
    println!();
    println!(
        "{} step limit reached after {} steps without convergence",
        "Stopped:".yellow().bold(),
        steps
    );
}
