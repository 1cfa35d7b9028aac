//! Deterministic per-agent and simulation-level RNG wrappers.
//!
//! # Determinism strategy
//!
//! Initial conditions are drawn sequentially from one `SimRng` seeded with
//! the run's global seed.  Heading noise comes from one `AgentRng` per
//! agent, seeded by:
//!
//!   seed = global_seed XOR ((agent_id + 1) * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio,
//! which spreads consecutive agent IDs uniformly across the seed space.  The
//! `+ 1` keeps agent 0's stream distinct from the `SimRng` stream.  This
//! means:
//!
//! - Noise draws do not depend on the order agents are processed in, so the
//!   parallel step produces bit-identical output to the sequential one.
//! - All RNG calls are local to the owning thread; no synchronisation needed.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;

use crate::{AgentId, Vec2};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

// ── AgentRng ──────────────────────────────────────────────────────────────────

/// Per-agent deterministic RNG.
///
/// Stored in [`AgentRngs`], one per agent, indexed by `AgentId`.
pub struct AgentRng(SmallRng);

impl AgentRng {
    /// Seed deterministically from the run's global seed and an agent ID.
    pub fn new(global_seed: u64, agent: AgentId) -> Self {
        let seed = global_seed ^ (agent.0 as u64 + 1).wrapping_mul(MIXING_CONSTANT);
        AgentRng(SmallRng::seed_from_u64(seed))
    }

    /// Expose the inner `SmallRng` for use with `rand` distribution types.
    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    /// One draw from the standard normal distribution.
    #[inline]
    pub fn standard_normal(&mut self) -> f64 {
        self.0.sample(StandardNormal)
    }

    /// Two independent `N(0, sigma²)` draws, x first then y.
    #[inline]
    pub fn gaussian_vec(&mut self, sigma: f64) -> Vec2 {
        let x = self.standard_normal();
        let y = self.standard_normal();
        Vec2::new(sigma * x, sigma * y)
    }
}

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// One [`AgentRng`] per agent, in `AgentId` order.
///
/// Kept apart from the frame data so the step can hold `&mut AgentRngs`
/// alongside shared borrows of the previous frame.  Rayon's
/// `par_iter_mut()` hands each worker exclusive access to its agents' RNGs.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
}

impl AgentRngs {
    /// Allocate and seed `count` per-agent RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = AgentId::range(count)
            .map(|id| AgentRng::new(global_seed, id))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one agent's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── SimRng ────────────────────────────────────────────────────────────────────

/// Simulation-level RNG for drawing the initial condition.
///
/// Used only in single-threaded contexts.
pub struct SimRng(SmallRng);

impl SimRng {
    pub fn new(seed: u64) -> Self {
        SimRng(SmallRng::seed_from_u64(seed))
    }

    #[inline]
    pub fn inner(&mut self) -> &mut SmallRng {
        &mut self.0
    }

    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }

    /// Uniform angle in `[0, 2π)`.
    #[inline]
    pub fn angle(&mut self) -> f64 {
        self.0.gen_range(0.0..std::f64::consts::TAU)
    }
}
