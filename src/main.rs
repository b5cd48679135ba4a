//! pilab - Main CLI Entry Point

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;

use pilab::calculator::Method;
use pilab::cli::{Args, Commands, Verbosity};
use pilab::config::Config;
use pilab::display;
use pilab::execution::{run_calculation, RunOutcome, RunSettings};

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    if let Err(message) = args.validate() {
        eprintln!("{}: {}", "Error".red(), message);
        std::process::exit(1);
    }

    let config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    match &args.command {
        Some(Commands::Methods) => {
            show_methods();
            return Ok(());
        }
        Some(Commands::Config) => return show_config(&config),
        None => {}
    }

    run(args, config).await
}

fn show_methods() {
    println!("Available methods:");
    for method in Method::all() {
        println!("  {:<16} {}", method.id().cyan(), method.describe());
    }
}

fn show_config(config: &Config) -> Result<()> {
    println!("Configuration file: {}", Config::config_path()?.display());
    println!();
    print!("{}", toml::to_string_pretty(config)?);
    Ok(())
}

async fn run(args: Args, config: Config) -> Result<()> {
    let settings = RunSettings {
        method: args.method.unwrap_or(config.calculation.default_method),
        decimal_digits: args.digits.unwrap_or(config.calculation.default_digits),
        margin: args.margin.unwrap_or(config.calculation.default_margin),
        max_steps: args.max_steps,
        json: args.json,
        verbosity: args.verbosity(),
    };

    // Cooperative cancellation: Ctrl-C flips the flag, the worker polls
    // it between steps and stops calling.
    let cancel = Arc::new(AtomicBool::new(false));
    let signal_flag = Arc::clone(&cancel);
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            signal_flag.store(true, Ordering::SeqCst);
        }
    });

    if !settings.json && settings.verbosity.show_progress() {
        println!(
            "Computing pi to {} digits ({})",
            settings.decimal_digits, settings.method
        );
    }

    let worker_cancel = Arc::clone(&cancel);
    let outcome =
        tokio::task::spawn_blocking(move || run_calculation(&settings, &worker_cancel)).await??;

    match outcome {
        RunOutcome::Converged {
            value,
            steps,
            elapsed,
        } => {
            if settings.json {
                // The completion event already went out inside the run.
            } else if settings.verbosity == Verbosity::Quiet {
                println!("{value}");
            } else {
                display::show_summary(&value, steps, elapsed);
            }
        }
        RunOutcome::Cancelled { steps } => {
            if !settings.json && settings.verbosity != Verbosity::Quiet {
                display::show_cancelled(steps);
            }
        }
        RunOutcome::StepLimit { steps } => {
            if !settings.json && settings.verbosity != Verbosity::Quiet {
                display::show_step_limit(steps);
            }
        }
    }

    Ok(())
}
