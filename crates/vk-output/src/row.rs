//! Plain data row types written by output backends.

/// One agent's position and heading at a given step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentFrameRow {
    pub step:     u64,
    pub agent_id: u32,
    pub x:        f64,
    pub y:        f64,
    /// Heading components; `(hx, hy)` is a unit vector.
    pub hx:       f64,
    pub hy:       f64,
}

/// Summary for one simulation step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepSummaryRow {
    pub step:           u64,
    pub sim_time:       f64,
    /// Set entries of the neighbor relation, self-links included.
    pub neighbor_links: u64,
}
