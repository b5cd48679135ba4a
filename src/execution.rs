//! Calculation run loop
//!
//! Owns one calculator on the calling thread and drives it step by step
//! until convergence, cancellation or the optional step limit. The
//! cancellation flag is polled between steps only; a single step is
//! never interrupted once started.

use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::calculator::{create, Method};
use crate::cli::Verbosity;
use crate::display::{self, CalcEvent};

/// Everything a single run needs to know
#[derive(Debug, Clone, Copy)]
pub struct RunSettings {
    pub method: Method,
    pub decimal_digits: u64,
    pub margin: u64,
    pub max_steps: Option<u64>,
    pub json: bool,
    pub verbosity: Verbosity,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// Exact convergence; `value` is formatted to the requested digits
    Converged {
        value: String,
        steps: u64,
        elapsed: Duration,
    },

    /// The cancellation flag was observed between steps
    Cancelled { steps: u64 },

    /// The optional step limit ran out before convergence
    StepLimit { steps: u64 },
}

/// Runs one calculation to completion, cancellation or the step limit.
///
/// Progress and completion notifications are delivered synchronously on
/// this thread, wired either to the progress bar or to JSON events
/// depending on the settings.
pub fn run_calculation(settings: &RunSettings, cancel: &AtomicBool) -> Result<RunOutcome> {
    let mut calc = create(settings.method, settings.decimal_digits, settings.margin)?;

    let bar = if !settings.json && settings.verbosity.show_progress() {
        Some(display::convergence_bar())
    } else {
        None
    };

    let json = settings.json;
    let verbose = settings.verbosity.show_events();

    let progress_bar = bar.clone();
    calc.set_on_progress(Box::new(move |progress, estimate, stabilized| {
        if json {
            CalcEvent::Progress {
                progress,
                stabilized_digits: stabilized,
                estimate: estimate.to_string(),
            }
            .emit();
        } else if let Some(pb) = &progress_bar {
            pb.set_position((progress * 100.0) as u64);
            pb.set_message(format!("{stabilized} digits stable"));
            if verbose {
                pb.println(format!("[{stabilized}] {estimate}"));
            }
        }
    }));

    let complete_bar = bar.clone();
    calc.set_on_complete(Box::new(move |value, requested| {
        if json {
            CalcEvent::Complete {
                requested_digits: requested,
                value: display::format_to_digits(value, requested),
            }
            .emit();
        } else if let Some(pb) = &complete_bar {
            pb.set_position(100);
            pb.finish_and_clear();
        }
    }));

    let started = Instant::now();
    let mut steps: u64 = 0;

    loop {
        if cancel.load(Ordering::SeqCst) {
            if let Some(pb) = &bar {
                pb.finish_and_clear();
            }
            if json {
                CalcEvent::Cancelled { steps }.emit();
            }
            return Ok(RunOutcome::Cancelled { steps });
        }

        steps += 1;
        if calc.step()?.is_complete() {
            break;
        }

        if let Some(limit) = settings.max_steps {
            if steps >= limit {
                if let Some(pb) = &bar {
                    pb.finish_and_clear();
                }
                if json {
                    CalcEvent::StepLimit { steps }.emit();
                }
                return Ok(RunOutcome::StepLimit { steps });
            }
        }
    }

    let value = calc
        .estimate()
        .map(|v| display::format_to_digits(v, settings.decimal_digits))
        .context("calculator completed without an estimate")?;

    Ok(RunOutcome::Converged {
        value,
        steps,
        elapsed: started.elapsed(),
    })
}
