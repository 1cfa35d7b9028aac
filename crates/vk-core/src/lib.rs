//! `vk-core` — foundational types for the `vicsek` flocking engine.
//!
//! This crate is a dependency of every other `vk-*` crate.  It intentionally
//! has no `vk-*` dependencies and minimal external ones (`rand`,
//! `rand_distr` and `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`                                             |
//! | [`vec2`]        | `Vec2` position / heading vector, periodic wrap       |
//! | [`time`]        | `Step`, `SimClock`                                    |
//! | [`frames`]      | `FrameSeries` (`Trajectory`, `OrientationSequence`)   |
//! | [`config`]      | `VicsekConfig`, run-mode enums, interactive bounds    |
//! | [`rng`]         | `AgentRng`/`AgentRngs` (noise), `SimRng` (frame 0)    |
//! | [`error`]       | `VkError`, `VkResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to data and config types.  |

pub mod config;
pub mod error;
pub mod frames;
pub mod ids;
pub mod rng;
pub mod time;
pub mod vec2;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{
    BoundViolation, DegeneratePolicy, InitialPlacement, PeriodicRule, TAIL_LENGTH_BOUNDS, VicsekConfig,
};
pub use error::{VkError, VkResult};
pub use frames::{FrameSeries, OrientationSequence, Trajectory};
pub use ids::AgentId;
pub use rng::{AgentRng, AgentRngs, SimRng};
pub use time::{SimClock, Step};
pub use vec2::Vec2;
