//! `vk-sim` — step function and run driver for the vicsek flocking engine.
//!
//! # Two-phase step loop
//!
//! ```text
//! frame 0: positions and headings drawn (or supplied), reported to observers
//! for t in 1..config.steps:
//!   ① Neighbors — NeighborResolver on frame t−1 positions.
//!   ② Update    — per agent: mean neighbor heading, Gaussian noise,
//!                 renormalize, advance and wrap (parallel with `parallel`).
//! return all frames
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the update phase on Rayon's thread pool.          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use vk_core::VicsekConfig;
//! use vk_sim::simulate;
//!
//! let (positions, headings) = simulate(&VicsekConfig { steps: 30, ..Default::default() })?;
//! assert_eq!(positions.len(), 30);
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod sim;
pub mod step;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, ProgressFn, SimObserver};
pub use sim::{Sim, SimOutput};
pub use step::{StepParams, step};

use vk_core::{OrientationSequence, Trajectory, VicsekConfig};

/// Run a complete simulation with random initial conditions and the default
/// resolver.  Returns `(positions, headings)`, each `config.steps` frames of
/// `config.agents` vectors.
pub fn simulate(config: &VicsekConfig) -> SimResult<(Trajectory, OrientationSequence)> {
    let output = SimBuilder::new(config.clone()).build()?.run(&mut NoopObserver)?;
    Ok(output.into_parts())
}
