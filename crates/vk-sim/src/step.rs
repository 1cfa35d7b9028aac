//! The Vicsek update rule for one step.
//!
//! Per agent `i`, reading only the previous frame:
//!
//! ```text
//! ① align      e_raw = mean { e_prev[j] : j neighbor of i }   (i included)
//! ② noise      e_raw += eta · (N(0,1), N(0,1))
//! ③ normalize  e_new = e_raw / ‖e_raw‖
//! ④ advance    x_new = (x_prev + v · e_new · dt) mod L
//! ```
//!
//! Every agent reads the same pre-step snapshot, so the per-agent work is
//! independent and runs on Rayon with the `parallel` feature.

use vk_core::{AgentId, AgentRng, AgentRngs, DegeneratePolicy, Step, Vec2, VicsekConfig};
use vk_spatial::NeighborMatrix;

use crate::{SimError, SimResult};

/// The subset of [`VicsekConfig`] the update rule reads.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct StepParams {
    pub domain:     f64,
    pub speed:      f64,
    pub noise:      f64,
    pub dt:         f64,
    pub degenerate: DegeneratePolicy,
}

impl From<&VicsekConfig> for StepParams {
    fn from(c: &VicsekConfig) -> Self {
        Self {
            domain:     c.domain,
            speed:      c.speed,
            noise:      c.noise,
            dt:         c.dt,
            degenerate: c.degenerate,
        }
    }
}

/// Compute frame `at` from the previous frame.
///
/// Returns `(positions, headings)`, each indexed by `AgentId`.  Fails only
/// on a degenerate heading under [`DegeneratePolicy::Fail`].
pub fn step(
    prev_positions: &[Vec2],
    prev_headings:  &[Vec2],
    neighbors:      &NeighborMatrix,
    params:         &StepParams,
    rngs:           &mut AgentRngs,
    at:             Step,
) -> SimResult<(Vec<Vec2>, Vec<Vec2>)> {
    let n = prev_positions.len();
    if prev_headings.len() != n || neighbors.len() != n || rngs.len() != n {
        return Err(SimError::AgentCountMismatch {
            expected: n,
            got:      prev_headings.len().min(neighbors.len()).min(rngs.len()),
            what:     "step inputs",
        });
    }

    let advance = |(i, rng): (usize, &mut AgentRng)| {
        advance_agent(AgentId(i as u32), prev_positions, prev_headings, neighbors, params, rng, at)
    };

    #[cfg(not(feature = "parallel"))]
    let updated: Vec<(Vec2, Vec2)> = rngs
        .inner
        .iter_mut()
        .enumerate()
        .map(advance)
        .collect::<SimResult<_>>()?;

    #[cfg(feature = "parallel")]
    let updated: Vec<(Vec2, Vec2)> = {
        use rayon::prelude::*;
        rngs.inner
            .par_iter_mut()
            .enumerate()
            .map(advance)
            .collect::<SimResult<_>>()?
    };

    Ok(updated.into_iter().unzip())
}

/// Steps ① – ④ for a single agent.
fn advance_agent(
    agent:          AgentId,
    prev_positions: &[Vec2],
    prev_headings:  &[Vec2],
    neighbors:      &NeighborMatrix,
    params:         &StepParams,
    rng:            &mut AgentRng,
    at:             Step,
) -> SimResult<(Vec2, Vec2)> {
    let i = agent.index();

    // ① The diagonal is always set, so count ≥ 1.
    let mut sum = Vec2::ZERO;
    let mut count = 0usize;
    for j in neighbors.neighbors_of(agent) {
        sum += prev_headings[j.index()];
        count += 1;
    }
    let aligned = sum / count as f64;

    // ②
    let raw = aligned + rng.gaussian_vec(params.noise);

    // ③
    let heading = match (raw.normalized(), params.degenerate) {
        (Some(h), _) => h,
        (None, DegeneratePolicy::Fail) => {
            return Err(SimError::DegenerateHeading { agent, step: at });
        }
        (None, DegeneratePolicy::RetainPrevious) => {
            tracing::warn!(%agent, step = %at, "degenerate heading, keeping previous");
            prev_headings[i]
        }
    };

    // ④
    let position = (prev_positions[i] + heading * params.speed * params.dt).wrap(params.domain);

    Ok((position, heading))
}
