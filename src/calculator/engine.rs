//! Step-driven convergence engine
//!
//! A calculator is an [`Algorithm`] (the refinement rule) wrapped in a
//! [`StepCalculator`] (the convergence state machine). Each call to
//! [`StepCalculator::step`] produces one refined estimate, measures the
//! delta against the previous one, and reports stabilized leading digits
//! through synchronous callbacks. Completion is exact: the run is over
//! only when two consecutive estimates are identical, never when some
//! epsilon is undercut.

use crate::errors::Result;
use crate::math::BigDecimal;

use num_traits::Zero;

/// Progress callback: fraction in [0, 1], current estimate, stabilized
/// leading digit count
pub type ProgressFn = dyn FnMut(f64, &BigDecimal, u64) + Send;

/// Completion callback: final estimate and the originally requested
/// decimal digit count
pub type CompleteFn = dyn FnMut(&BigDecimal, u64) + Send;

/// Refinement rule plugged into the engine.
///
/// `step_eval` reads and updates the algorithm's private accumulator
/// state and returns the next estimate; the optional hooks run
/// immediately before evaluation and after the engine has finished
/// bookkeeping for the call.
pub trait Algorithm: Send {
    /// Bookkeeping before the estimate is recomputed
    fn before_step(&mut self) {}

    /// Computes the next estimate
    fn step_eval(&mut self) -> Result<BigDecimal>;

    /// State transition for the next call
    fn after_step(&mut self) {}
}

/// Engine phase; `Complete` is terminal and never resets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// No estimate recorded yet
    Fresh,

    /// At least one estimate recorded, not yet converged
    Running,

    /// Two consecutive estimates were identical (terminal)
    Complete,
}

impl Phase {
    /// Check if this is the terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Complete)
    }
}

/// Outcome of a single [`StepCalculator::step`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    /// More steps are needed
    Running,

    /// The estimate has converged exactly
    Complete,
}

impl StepOutcome {
    pub fn is_complete(&self) -> bool {
        matches!(self, StepOutcome::Complete)
    }
}

/// Convergence state machine around one algorithm instance.
///
/// Single-threaded and non-reentrant: exactly one owner drives `step()`
/// in a sequential loop. Notifications fire synchronously inside the
/// `step()` call that produced them; consumers on another thread must
/// redispatch themselves.
pub struct StepCalculator<A> {
    algorithm: A,
    decimal_digits: u64,
    margin: u64,
    digits: u64,
    phase: Phase,
    eval: Option<BigDecimal>,
    stabilized: u64,
    ten_scale: BigDecimal,
    progress: f64,
    on_progress: Option<Box<ProgressFn>>,
    on_complete: Option<Box<CompleteFn>>,
}

impl<A: Algorithm> StepCalculator<A> {
    /// Wraps an algorithm, targeting `decimal_digits` output digits with
    /// `margin` guard digits of working precision on top
    pub fn new(algorithm: A, decimal_digits: u64, margin: u64) -> Result<Self> {
        let digits = decimal_digits + margin;
        let ten_scale = BigDecimal::divide(&BigDecimal::from(1), &BigDecimal::from(10), digits)?;

        Ok(Self {
            algorithm,
            decimal_digits,
            margin,
            digits,
            phase: Phase::Fresh,
            eval: None,
            stabilized: 0,
            ten_scale,
            progress: 0.0,
            on_progress: None,
            on_complete: None,
        })
    }

    /// Advances the computation by one refinement step.
    ///
    /// Once complete, further calls return [`StepOutcome::Complete`]
    /// immediately without re-firing the completion notification.
    pub fn step(&mut self) -> Result<StepOutcome> {
        if self.phase.is_terminal() {
            return Ok(StepOutcome::Complete);
        }

        self.algorithm.before_step();
        let eval = self.algorithm.step_eval()?;

        match self.eval.take() {
            None => {
                // First estimate: nothing to compare against, no
                // notification either.
                self.phase = Phase::Running;
            }
            Some(previous) => {
                let delta = (&eval - &previous).abs();

                if delta.is_zero() {
                    self.progress = 1.0;
                    self.phase = Phase::Complete;
                    if let Some(callback) = self.on_complete.as_mut() {
                        callback(&eval, self.decimal_digits);
                    }
                    self.eval = Some(eval);
                    self.algorithm.after_step();
                    return Ok(StepOutcome::Complete);
                }

                let ten = BigDecimal::from(10);
                let mut computed = self.stabilized;
                while delta < self.ten_scale {
                    computed += 1;
                    self.ten_scale = BigDecimal::divide(&self.ten_scale, &ten, self.digits)?;
                }

                if computed > self.stabilized {
                    self.progress = computed as f64 / self.digits as f64;
                    if let Some(callback) = self.on_progress.as_mut() {
                        callback(self.progress, &eval, computed);
                    }
                    self.stabilized = computed;
                }
            }
        }

        self.eval = Some(eval);
        self.algorithm.after_step();
        Ok(StepOutcome::Running)
    }

    /// Latest estimate; `None` until the first step has run
    pub fn estimate(&self) -> Option<&BigDecimal> {
        self.eval.as_ref()
    }

    /// Fraction of the working digits that have stabilized, in [0, 1]
    pub fn progress(&self) -> f64 {
        self.progress
    }

    /// Count of leading digits no longer changing between steps
    pub fn stabilized_digits(&self) -> u64 {
        self.stabilized
    }

    /// Requested output precision
    pub fn decimal_digits(&self) -> u64 {
        self.decimal_digits
    }

    /// Guard digits beyond the requested precision
    pub fn margin(&self) -> u64 {
        self.margin
    }

    /// Working digit budget for intermediate arithmetic
    pub fn digits(&self) -> u64 {
        self.digits
    }

    /// Current engine phase
    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_complete(&self) -> bool {
        self.phase.is_terminal()
    }

    /// Installs the progress notification sink
    pub fn set_on_progress(&mut self, callback: Box<ProgressFn>) {
        self.on_progress = Some(callback);
    }

    /// Installs the completion notification sink
    pub fn set_on_complete(&mut self, callback: Box<CompleteFn>) {
        self.on_complete = Some(callback);
    }
}

/// Object-safe driver facade over any [`StepCalculator`], so drivers can
/// hold calculators for different algorithms behind one handle type
pub trait PiCalculator: Send {
    /// Advances by one step
    fn step(&mut self) -> Result<StepOutcome>;

    /// Latest estimate, if any step has run
    fn estimate(&self) -> Option<&BigDecimal>;

    /// Progress fraction in [0, 1]
    fn progress(&self) -> f64;

    /// Stabilized leading digit count
    fn stabilized_digits(&self) -> u64;

    /// Whether the computation reached exact convergence
    fn is_complete(&self) -> bool;

    /// Requested output precision
    fn decimal_digits(&self) -> u64;

    /// Working digit budget
    fn digits(&self) -> u64;

    /// Installs the progress notification sink
    fn set_on_progress(&mut self, callback: Box<ProgressFn>);

    /// Installs the completion notification sink
    fn set_on_complete(&mut self, callback: Box<CompleteFn>);
}

impl<A: Algorithm> PiCalculator for StepCalculator<A> {
    fn step(&mut self) -> Result<StepOutcome> {
        StepCalculator::step(self)
    }

    fn estimate(&self) -> Option<&BigDecimal> {
        StepCalculator::estimate(self)
    }

    fn progress(&self) -> f64 {
        StepCalculator::progress(self)
    }

    fn stabilized_digits(&self) -> u64 {
        StepCalculator::stabilized_digits(self)
    }

    fn is_complete(&self) -> bool {
        StepCalculator::is_complete(self)
    }

    fn decimal_digits(&self) -> u64 {
        StepCalculator::decimal_digits(self)
    }

    fn digits(&self) -> u64 {
        StepCalculator::digits(self)
    }

    fn set_on_progress(&mut self, callback: Box<ProgressFn>) {
        StepCalculator::set_on_progress(self, callback)
    }

    fn set_on_complete(&mut self, callback: Box<CompleteFn>) {
        StepCalculator::set_on_complete(self, callback)
    }
}
