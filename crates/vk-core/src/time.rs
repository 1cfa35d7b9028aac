//! Simulation time model.
//!
//! # Design
//!
//! Time is represented as a monotonically increasing `Step` counter, which
//! is also the frame index into the output sequences.  The mapping to
//! simulated time is held in `SimClock`:
//!
//!   sim_time = step * dt
//!
//! Frame 0 is the initial condition; a run of `T` frames ends at
//! `Step(T - 1)`.

use std::fmt;

// ── Step ──────────────────────────────────────────────────────────────────────

/// An absolute simulation step (frame index).
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Step(pub u64);

impl Step {
    pub const ZERO: Step = Step(0);

    /// The step immediately after `self`.
    #[inline]
    pub fn next(self) -> Step {
        Step(self.0 + 1)
    }

    /// Cast to `usize` for indexing a `FrameSeries`.
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::ops::Add<u64> for Step {
    type Output = Step;
    #[inline]
    fn add(self, rhs: u64) -> Step {
        Step(self.0 + rhs)
    }
}

impl std::ops::Sub for Step {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Step) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "t{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Tracks the current step and converts it to simulated time.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SimClock {
    /// Duration of one step.
    pub dt: f64,
    /// The current step — advanced by `SimClock::advance()` each iteration.
    pub current: Step,
}

impl SimClock {
    pub fn new(dt: f64) -> Self {
        Self { dt, current: Step::ZERO }
    }

    /// Advance the clock by one step.
    #[inline]
    pub fn advance(&mut self) {
        self.current = self.current.next();
    }

    /// Simulated time elapsed since frame 0.
    #[inline]
    pub fn elapsed(&self) -> f64 {
        self.time_at(self.current)
    }

    /// Simulated time of an arbitrary step.
    #[inline]
    pub fn time_at(&self, step: Step) -> f64 {
        step.0 as f64 * self.dt
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (t = {:.3})", self.current, self.elapsed())
    }
}
