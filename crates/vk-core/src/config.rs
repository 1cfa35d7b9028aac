//! Run configuration.
//!
//! `VicsekConfig` is supplied once when the simulation is built and never
//! mutated afterwards.  Applications either fill it in directly or load it
//! from a TOML/JSON file (feature `serde`), then call
//! [`VicsekConfig::validate`] before running.

use std::fmt;

use crate::{VkError, VkResult};

// ── Run-mode enums ────────────────────────────────────────────────────────────

/// How pairwise separation is corrected for the periodic domain.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PeriodicRule {
    /// Shift each axis difference by a multiple of `L` so that it lies in
    /// `[-L/2, L/2]` (toroidal minimum image).  Symmetric.
    #[default]
    MinimumImage,
    /// Subtract `(L/2)²` from an axis difference that exceeds `(L/2)²`.
    /// Matches the classic reference script. Shifts positive
    /// differences only, so the relation can be asymmetric.
    Legacy,
}

/// How frame-0 positions are drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum InitialPlacement {
    /// Uniform over `[0, L)²`.
    #[default]
    Uniform,
    /// `L · U[0, L)` per axis, i.e. uniform over `[0, L²)²`.  Frame 0 is
    /// left unwrapped; positions fall into `[0, L)` from frame 1 on.
    LegacyScaled,
}

/// What happens when an agent's post-noise heading has zero (or
/// non-finite) norm and cannot be renormalized.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DegeneratePolicy {
    /// Abort the run with a degenerate-heading error.
    #[default]
    Fail,
    /// Keep the agent's heading from the previous frame.
    RetainPrevious,
}

// ── VicsekConfig ──────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VicsekConfig {
    /// Number of agents `N`.
    pub agents: usize,

    /// Side length `L` of the periodic square domain.
    pub domain: f64,

    /// Interaction radius `R`.
    pub radius: f64,

    /// Standard deviation `eta` of the per-axis Gaussian heading noise.
    pub noise: f64,

    /// Agent speed `v`.
    pub speed: f64,

    /// Step duration `dt`.
    pub dt: f64,

    /// Number of frames `T` to produce, including the initial condition.
    pub steps: usize,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    pub periodic_rule: PeriodicRule,

    pub placement: InitialPlacement,

    pub degenerate: DegeneratePolicy,

    /// Report a frame to observers every N steps (frame 0 included).
    /// 0 disables frame callbacks.
    pub output_interval: u64,
}

impl Default for VicsekConfig {
    fn default() -> Self {
        Self {
            agents:          100,
            domain:          10.0,
            radius:          1.0,
            noise:           0.1,
            speed:           1.0,
            dt:              0.1,
            steps:           1000,
            seed:            0,
            periodic_rule:   PeriodicRule::default(),
            placement:       InitialPlacement::default(),
            degenerate:      DegeneratePolicy::default(),
            output_interval: 1,
        }
    }
}

impl VicsekConfig {
    /// Reject configurations that cannot produce a meaningful run.
    pub fn validate(&self) -> VkResult<()> {
        if self.agents == 0 {
            return Err(config_err("agent count must be positive"));
        }
        if u32::try_from(self.agents).is_err() {
            return Err(config_err(format!("agent count {} exceeds u32::MAX", self.agents)));
        }
        if !(self.domain.is_finite() && self.domain > 0.0) {
            return Err(config_err(format!("domain size must be positive, got {}", self.domain)));
        }
        if !(self.radius.is_finite() && self.radius >= 0.0) {
            return Err(config_err(format!(
                "interaction radius must be non-negative, got {}",
                self.radius
            )));
        }
        if !(self.noise.is_finite() && self.noise >= 0.0) {
            return Err(config_err(format!("noise must be non-negative, got {}", self.noise)));
        }
        if !self.speed.is_finite() {
            return Err(config_err(format!("speed must be finite, got {}", self.speed)));
        }
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(config_err(format!("time step must be positive, got {}", self.dt)));
        }
        if self.steps < 2 {
            return Err(config_err(format!("need at least 2 frames, got {}", self.steps)));
        }
        Ok(())
    }

    /// Compare against the bounds an interactive front end exposes.
    ///
    /// Advisory only: values outside these ranges are still valid input to
    /// the engine.  Returns one entry per parameter out of range.
    pub fn check_interactive_bounds(&self) -> Vec<BoundViolation> {
        let checks: [(&'static str, f64, f64, f64); 7] = [
            ("agents", self.agents as f64, 1.0,  1000.0),
            ("domain", self.domain,        1.0,  100.0),
            ("radius", self.radius,        0.1,  10.0),
            ("noise",  self.noise,         0.01, 1.0),
            ("speed",  self.speed,         0.1,  10.0),
            ("dt",     self.dt,            0.01, 1.0),
            ("steps",  self.steps as f64,  10.0, 300.0),
        ];
        checks
            .into_iter()
            .filter(|&(_, value, min, max)| !(min..=max).contains(&value))
            .map(|(param, value, min, max)| BoundViolation { param, value, min, max })
            .collect()
    }

    /// Squared interaction radius, the quantity the neighbor test compares.
    #[inline]
    pub fn radius_squared(&self) -> f64 {
        self.radius * self.radius
    }
}

fn config_err(msg: impl Into<String>) -> VkError {
    VkError::Config(msg.into())
}

/// Tail-length bounds offered by the interactive front end.
pub const TAIL_LENGTH_BOUNDS: (usize, usize) = (1, 10);

// ── BoundViolation ────────────────────────────────────────────────────────────

/// One parameter outside its interactive range.
#[derive(Clone, Debug, PartialEq)]
pub struct BoundViolation {
    pub param: &'static str,
    pub value: f64,
    pub min:   f64,
    pub max:   f64,
}

impl fmt::Display for BoundViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {} outside [{}, {}]", self.param, self.value, self.min, self.max)
    }
}
