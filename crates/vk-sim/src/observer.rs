//! Simulation observer trait for progress reporting, data collection and
//! cooperative cancellation.

use vk_core::{Step, Vec2, VicsekConfig};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at step boundaries.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.  None of them is called mid-step.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SimObserver for ProgressPrinter {
///     fn on_step_end(&mut self, step: Step, links: usize) {
///         if step.0 % self.interval == 0 {
///             println!("{step}: {links} neighbor links");
///         }
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once before frame 0 is reported.
    fn on_run_start(&mut self, _config: &VicsekConfig) {}

    /// Called before the neighbor phase of `step`.
    fn on_step_start(&mut self, _step: Step) {}

    /// Called after frame `step` has been computed and stored.
    ///
    /// `neighbor_links` counts the set entries of the relation used for the
    /// step, self-links included.
    fn on_step_end(&mut self, _step: Step, _neighbor_links: usize) {}

    /// Called for frame 0 and then every `config.output_interval` steps.
    ///
    /// Gives read-only access to the frame so that output writers can record
    /// it without the sim needing to know about any specific output format.
    fn on_frame(&mut self, _step: Step, _positions: &[Vec2], _headings: &[Vec2]) {}

    /// Called once after the final frame completes.
    fn on_run_end(&mut self, _final_step: Step) {}

    /// Polled once per step boundary.  Returning `true` aborts the run with
    /// [`SimError::Cancelled`][crate::SimError::Cancelled].
    fn should_stop(&mut self) -> bool {
        false
    }
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Adapts a closure `f(step, last_step)` into a per-step progress callback.
pub struct ProgressFn<F> {
    f:    F,
    last: Step,
}

impl<F: FnMut(Step, Step)> ProgressFn<F> {
    pub fn new(f: F) -> Self {
        Self { f, last: Step::ZERO }
    }
}

impl<F: FnMut(Step, Step)> SimObserver for ProgressFn<F> {
    fn on_run_start(&mut self, config: &VicsekConfig) {
        self.last = Step(config.steps.saturating_sub(1) as u64);
    }

    fn on_step_end(&mut self, step: Step, _neighbor_links: usize) {
        (self.f)(step, self.last);
    }
}
