//! The `Sim` struct and its step loop.

use vk_core::{
    AgentRngs, OrientationSequence, SimClock, Step, Trajectory, Vec2, VicsekConfig,
};
use vk_spatial::{BruteForce, NeighborResolver};

use crate::step::{StepParams, step};
use crate::{SimError, SimObserver, SimResult};

/// The most recent frame, kept apart from the history so every agent of the
/// next step reads one immutable snapshot.
pub(crate) struct Snapshot {
    pub(crate) positions: Vec<Vec2>,
    pub(crate) headings:  Vec<Vec2>,
}

// ── SimOutput ─────────────────────────────────────────────────────────────────

/// The finished product of a run: all `T` frames of both sequences.
#[derive(Clone, Debug, PartialEq)]
pub struct SimOutput {
    pub positions: Trajectory,
    pub headings:  OrientationSequence,
}

impl SimOutput {
    pub fn into_parts(self) -> (Trajectory, OrientationSequence) {
        (self.positions, self.headings)
    }

    /// Number of frames (equals `config.steps`).
    pub fn frame_count(&self) -> usize {
        self.positions.len()
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<N>` holds frame 0 and everything needed to derive the rest.  Each
/// step runs two phases:
///
/// 1. **Neighbor phase**: resolve the relation from the previous frame's
///    positions via the [`NeighborResolver`].
/// 2. **Update phase** (optionally parallel with the `parallel` feature):
///    align, add noise, renormalize and advance every agent.
///
/// [`run`](Self::run) consumes the sim, so a failed or cancelled run leaves
/// no partial trajectory behind.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<N: NeighborResolver = BruteForce> {
    /// Run configuration (agent count, domain, radius, seed, …).
    pub config: VicsekConfig,

    /// Step counter and simulated-time conversion.
    pub clock: SimClock,

    pub(crate) params:    StepParams,
    pub(crate) rngs:      AgentRngs,
    pub(crate) positions: Trajectory,
    pub(crate) headings:  OrientationSequence,
    pub(crate) snapshot:  Snapshot,
    pub(crate) resolver:  N,
}

impl<N: NeighborResolver> Sim<N> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Frame-0 positions.
    pub fn initial_positions(&self) -> &[Vec2] {
        self.positions.frame(0).unwrap_or_default()
    }

    /// Frame-0 headings.
    pub fn initial_headings(&self) -> &[Vec2] {
        self.headings.frame(0).unwrap_or_default()
    }

    /// Produce frames `1 .. config.steps` and return the full history.
    ///
    /// Calls observer hooks at every step boundary and polls
    /// [`SimObserver::should_stop`] before each step.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(mut self, observer: &mut O) -> SimResult<SimOutput> {
        let interval = self.config.output_interval;
        let last = Step(self.config.steps as u64 - 1);

        tracing::info!(
            agents = self.config.agents,
            frames = self.config.steps,
            domain = self.config.domain,
            radius = self.config.radius,
            noise  = self.config.noise,
            seed   = self.config.seed,
            "starting run"
        );
        observer.on_run_start(&self.config);
        if interval > 0 {
            observer.on_frame(Step::ZERO, &self.snapshot.positions, &self.snapshot.headings);
        }

        while self.clock.current < last {
            if observer.should_stop() {
                tracing::info!(completed = %self.clock.current, "run cancelled");
                return Err(SimError::Cancelled { completed: self.clock.current });
            }
            self.clock.advance();
            let now = self.clock.current;

            observer.on_step_start(now);
            let links = self.process_step(now)?;
            observer.on_step_end(now, links);

            if interval > 0 && now.0.is_multiple_of(interval) {
                observer.on_frame(now, &self.snapshot.positions, &self.snapshot.headings);
            }
        }

        observer.on_run_end(self.clock.current);
        tracing::info!(final_step = %self.clock.current, sim_time = self.clock.elapsed(), "run complete");

        Ok(SimOutput {
            positions: self.positions,
            headings:  self.headings,
        })
    }

    // ── Core step processing ──────────────────────────────────────────────

    /// Compute and store frame `now`; returns the neighbor link count.
    fn process_step(&mut self, now: Step) -> SimResult<usize> {
        // ── Phase 1: neighbor relation from the previous frame ────────────
        let neighbors = self.resolver.resolve(
            &self.snapshot.positions,
            self.config.domain,
            self.config.radius,
            self.config.periodic_rule,
        );
        let links = neighbors.link_count();

        // ── Phase 2: update every agent from the same snapshot ────────────
        let (positions, headings) = step(
            &self.snapshot.positions,
            &self.snapshot.headings,
            &neighbors,
            &self.params,
            &mut self.rngs,
            now,
        )?;

        self.positions.push_frame(&positions);
        self.headings.push_frame(&headings);
        self.snapshot = Snapshot { positions, headings };

        tracing::debug!(step = %now, links, "step complete");
        Ok(links)
    }
}
