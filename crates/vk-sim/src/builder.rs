//! Fluent builder for constructing a [`Sim`].

use vk_core::{
    AgentRngs, FrameSeries, InitialPlacement, SimClock, SimRng, Vec2, VicsekConfig,
};
use vk_spatial::{BruteForce, NeighborResolver};

use crate::sim::Snapshot;
use crate::step::StepParams;
use crate::{Sim, SimError, SimResult};

/// Tolerance on `‖e‖ − 1` for caller-supplied initial headings.
const UNIT_TOLERANCE: f64 = 1e-6;

/// Fluent builder for [`Sim<N>`].
///
/// # Required inputs
///
/// - [`VicsekConfig`] — agent count, domain, radius, noise, seed, …
///
/// # Optional inputs (have defaults)
///
/// | Method                   | Default                                     |
/// |--------------------------|---------------------------------------------|
/// | `.initial_positions(v)`  | Drawn per `config.placement`                |
/// | `.initial_headings(v)`   | `(cos θ, sin θ)`, `θ ~ U[0, 2π)`            |
/// | `.resolver(r)`           | [`BruteForce`]                              |
///
/// Only the parts of frame 0 that are not supplied are drawn, positions
/// first, from one RNG seeded with `config.seed`.
///
/// # Example
///
/// ```rust,ignore
/// let output = SimBuilder::new(config)
///     .resolver(CellList::default())
///     .build()?
///     .run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<N: NeighborResolver = BruteForce> {
    config:    VicsekConfig,
    positions: Option<Vec<Vec2>>,
    headings:  Option<Vec<Vec2>>,
    resolver:  N,
}

impl SimBuilder<BruteForce> {
    /// Create a builder with the required configuration.
    pub fn new(config: VicsekConfig) -> Self {
        Self {
            config,
            positions: None,
            headings:  None,
            resolver:  BruteForce,
        }
    }
}

impl<N: NeighborResolver> SimBuilder<N> {
    /// Supply frame-0 positions (must be length `config.agents`).
    ///
    /// Used as given; they are not wrapped into the domain.
    pub fn initial_positions(mut self, positions: Vec<Vec2>) -> Self {
        self.positions = Some(positions);
        self
    }

    /// Supply frame-0 headings (must be length `config.agents`, each a unit
    /// vector).
    pub fn initial_headings(mut self, headings: Vec<Vec2>) -> Self {
        self.headings = Some(headings);
        self
    }

    /// Replace the neighbor search strategy.
    pub fn resolver<M: NeighborResolver>(self, resolver: M) -> SimBuilder<M> {
        SimBuilder {
            config:    self.config,
            positions: self.positions,
            headings:  self.headings,
            resolver,
        }
    }

    /// Validate inputs, draw the missing parts of frame 0, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<N>> {
        self.config.validate()?;
        for violation in self.config.check_interactive_bounds() {
            tracing::debug!(%violation, "parameter outside interactive range");
        }

        let n = self.config.agents;
        let mut rng = SimRng::new(self.config.seed);

        // ── Positions ─────────────────────────────────────────────────────
        let positions = match self.positions {
            Some(p) => {
                check_len(&p, n, "initial positions")?;
                if let Some(i) = p.iter().position(|v| !v.is_finite()) {
                    return Err(SimError::Config(format!(
                        "initial position of agent {i} is not finite"
                    )));
                }
                p
            }
            None => draw_positions(&mut rng, &self.config),
        };

        // ── Headings ──────────────────────────────────────────────────────
        let headings = match self.headings {
            Some(h) => {
                check_len(&h, n, "initial headings")?;
                if let Some(i) = h
                    .iter()
                    .position(|v| !v.is_finite() || (v.norm() - 1.0).abs() > UNIT_TOLERANCE)
                {
                    return Err(SimError::Config(format!(
                        "initial heading of agent {i} is not a unit vector"
                    )));
                }
                h
            }
            None => (0..n).map(|_| Vec2::from_angle(rng.angle())).collect(),
        };

        let mut pos_series = FrameSeries::with_capacity(n, self.config.steps);
        let mut head_series = FrameSeries::with_capacity(n, self.config.steps);
        pos_series.push_frame(&positions);
        head_series.push_frame(&headings);

        Ok(Sim {
            clock:     SimClock::new(self.config.dt),
            params:    StepParams::from(&self.config),
            rngs:      AgentRngs::new(n, self.config.seed),
            config:    self.config,
            positions: pos_series,
            headings:  head_series,
            snapshot:  Snapshot { positions, headings },
            resolver:  self.resolver,
        })
    }
}

fn check_len(v: &[Vec2], expected: usize, what: &'static str) -> SimResult<()> {
    if v.len() != expected {
        return Err(SimError::AgentCountMismatch { expected, got: v.len(), what });
    }
    Ok(())
}

/// Draw frame-0 positions, x then y per agent.
fn draw_positions(rng: &mut SimRng, config: &VicsekConfig) -> Vec<Vec2> {
    let l = config.domain;
    let mut coord = || match config.placement {
        InitialPlacement::Uniform => rng.gen_range(0.0..l),
        InitialPlacement::LegacyScaled => l * rng.gen_range(0.0..l),
    };
    (0..config.agents)
        .map(|_| {
            let x = coord();
            let y = coord();
            Vec2::new(x, y)
        })
        .collect()
}
