//! Dense time-indexed storage for per-agent vectors.
//!
//! A `FrameSeries` holds `frames × agents` values in one contiguous,
//! frame-major `Vec<Vec2>`: frame `t` occupies
//! `data[t * agents .. (t + 1) * agents]`.  The whole history is kept so a
//! consumer can address any frame directly (the tail renderer looks back
//! several frames from every animation frame).

use crate::{AgentId, Step, Vec2};

/// Ordered sequence of position frames.
pub type Trajectory = FrameSeries;

/// Ordered sequence of heading frames (unit vectors).
pub type OrientationSequence = FrameSeries;

/// Frame-major `T × N` array of [`Vec2`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FrameSeries {
    agents: usize,
    data:   Vec<Vec2>,
}

impl FrameSeries {
    /// Empty series for `agents` agents, with room for `frames` frames.
    pub fn with_capacity(agents: usize, frames: usize) -> Self {
        Self {
            agents,
            data: Vec::with_capacity(agents * frames),
        }
    }

    /// Append one complete frame.
    ///
    /// # Panics
    /// Panics if `frame.len()` differs from the agent count; frames are
    /// produced by the driver, which always sizes them correctly.
    pub fn push_frame(&mut self, frame: &[Vec2]) {
        assert_eq!(frame.len(), self.agents, "frame width must equal agent count");
        self.data.extend_from_slice(frame);
    }

    /// Number of agents per frame.
    #[inline]
    pub fn agent_count(&self) -> usize {
        self.agents
    }

    /// Number of frames stored.
    #[inline]
    pub fn len(&self) -> usize {
        if self.agents == 0 { 0 } else { self.data.len() / self.agents }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// All agents' vectors at frame `t`, indexed by `AgentId`.
    #[inline]
    pub fn frame(&self, t: usize) -> Option<&[Vec2]> {
        let start = t.checked_mul(self.agents)?;
        self.data.get(start..start + self.agents)
    }

    /// Vector of one agent at frame `step`.
    #[inline]
    pub fn get(&self, step: Step, agent: AgentId) -> Option<Vec2> {
        self.frame(step.index())?.get(agent.index()).copied()
    }

    /// The most recently pushed frame.
    #[inline]
    pub fn last_frame(&self) -> Option<&[Vec2]> {
        self.len().checked_sub(1).and_then(|t| self.frame(t))
    }

    /// Iterate over frames in time order.
    pub fn frames(&self) -> impl ExactSizeIterator<Item = &[Vec2]> + '_ {
        // `chunks_exact(0)` panics, so an agentless series yields nothing.
        let chunk = self.agents.max(1);
        self.data[..self.len() * self.agents].chunks_exact(chunk)
    }

    /// Copy into the nested `[T][N][2]` shape of the engine API.
    pub fn to_nested(&self) -> Vec<Vec<[f64; 2]>> {
        self.frames()
            .map(|frame| frame.iter().map(|v| v.to_array()).collect())
            .collect()
    }

    /// Flat frame-major view of the raw data.
    #[inline]
    pub fn as_slice(&self) -> &[Vec2] {
        &self.data
    }
}
