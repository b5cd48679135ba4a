//! End-to-end convergence tests across the calculation methods
//!
//! Drives whole calculators through the factory the way the terminal
//! driver does and checks convergence speed, cross-method agreement and
//! notification discipline against known-good values.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use pilab::calculator::{create, Method};
use pilab::display::format_to_digits;
use pilab::{PiCalculator, StepOutcome};

/// Steps a calculator until completion, panicking past the cap
fn drive(calc: &mut Box<dyn PiCalculator>, cap: u64) -> u64 {
    let mut steps = 0;
    loop {
        steps += 1;
        assert!(steps <= cap, "no convergence within {cap} steps");
        if calc.step().expect("step should succeed") == StepOutcome::Complete {
            return steps;
        }
    }
}

#[test]
fn test_gauss_legendre_twenty_digits() {
    let mut calc = create(Method::GaussLegendre, 20, 5).expect("factory should build");
    let steps = drive(&mut calc, 12);

    // Quadratic convergence: roughly log2(20) + 2 calls.
    assert_eq!(steps, 6);

    let value = calc.estimate().expect("final estimate");
    assert_eq!(format_to_digits(value, 20), "3.14159265358979323846");
}

#[test]
fn test_gauss_legendre_fifty_digits() {
    let mut calc = create(Method::GaussLegendre, 50, 5).expect("factory should build");
    let steps = drive(&mut calc, 14);

    assert_eq!(steps, 8);

    let value = calc.estimate().expect("final estimate");
    assert_eq!(
        format_to_digits(value, 50),
        "3.14159265358979323846264338327950288419716939937510"
    );
}

#[test]
fn test_cross_method_agreement_at_twenty_digits() {
    let mut agm = create(Method::GaussLegendre, 20, 5).expect("factory should build");
    let mut machin = create(Method::Machin, 20, 5).expect("factory should build");

    let agm_steps = drive(&mut agm, 12);
    let machin_steps = drive(&mut machin, 100);

    let agm_value = format_to_digits(agm.estimate().expect("estimate"), 20);
    let machin_value = format_to_digits(machin.estimate().expect("estimate"), 20);

    assert_eq!(agm_value, machin_value);

    // Same answer, very different effort: Machin gains a fixed digit
    // count per step, the AGM doubles it.
    assert_eq!(machin_steps, 18);
    assert!(machin_steps > agm_steps);
}

#[test]
fn test_slow_series_agrees_at_one_digit() {
    // The Leibniz baseline takes hundreds of steps for a single digit;
    // a thin margin keeps the test quick.
    let mut slow = create(Method::Slow, 1, 2).expect("factory should build");
    let mut agm = create(Method::GaussLegendre, 1, 5).expect("factory should build");

    let slow_steps = drive(&mut slow, 10_000);
    let agm_steps = drive(&mut agm, 12);

    assert_eq!(slow_steps, 501);
    assert_eq!(agm_steps, 5);

    let slow_value = format_to_digits(slow.estimate().expect("estimate"), 1);
    let agm_value = format_to_digits(agm.estimate().expect("estimate"), 1);
    assert_eq!(slow_value, agm_value);
    assert_eq!(slow_value, "3.1");
}

#[test]
fn test_completion_is_idempotent_and_fires_once() {
    let mut calc = create(Method::Machin, 5, 5).expect("factory should build");

    let completions = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&completions);
    calc.set_on_complete(Box::new(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    drive(&mut calc, 100);
    assert_eq!(completions.load(Ordering::SeqCst), 1);

    let frozen = calc.estimate().expect("estimate").clone();
    for _ in 0..3 {
        assert_eq!(
            calc.step().expect("step should succeed"),
            StepOutcome::Complete
        );
    }

    assert_eq!(completions.load(Ordering::SeqCst), 1);
    assert_eq!(calc.estimate().expect("estimate"), &frozen);
}

#[test]
fn test_progress_notifications_are_monotonic() {
    let mut calc = create(Method::Machin, 20, 5).expect("factory should build");

    let log: Arc<Mutex<Vec<(f64, u64)>>> = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&log);
    calc.set_on_progress(Box::new(move |progress, _, stabilized| {
        sink.lock().expect("test lock").push((progress, stabilized));
    }));

    drive(&mut calc, 100);

    let log = log.lock().expect("test lock");
    assert!(!log.is_empty(), "expected progress notifications");

    for window in log.windows(2) {
        assert!(window[1].0 >= window[0].0, "progress went backwards");
        assert!(window[1].1 > window[0].1, "stabilized count did not grow");
    }

    for (progress, _) in log.iter() {
        assert!((0.0..=1.0).contains(progress));
    }
}

#[test]
fn test_completion_notification_carries_requested_digits() {
    let mut calc = create(Method::GaussLegendre, 20, 5).expect("factory should build");

    let seen: Arc<Mutex<Option<(String, u64)>>> = Arc::new(Mutex::new(None));
    let sink = Arc::clone(&seen);
    calc.set_on_complete(Box::new(move |value, requested| {
        *sink.lock().expect("test lock") = Some((value.to_string(), requested));
    }));

    drive(&mut calc, 12);

    let seen = seen.lock().expect("test lock").clone();
    let (value, requested) = seen.expect("completion should have fired");
    assert_eq!(requested, 20);

    // The engine guarantees at least the requested precision; guard
    // digits beyond it are the driver's to trim.
    assert_eq!(value, "3.141592653589793238462642");
}

#[test]
fn test_progress_accessors_track_callbacks() {
    let mut calc = create(Method::Machin, 10, 5).expect("factory should build");

    assert_eq!(calc.progress(), 0.0);
    assert_eq!(calc.stabilized_digits(), 0);
    assert!(!calc.is_complete());

    drive(&mut calc, 100);

    assert!(calc.is_complete());
    assert_eq!(calc.progress(), 1.0);
}
