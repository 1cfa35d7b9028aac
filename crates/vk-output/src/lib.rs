//! `vk-output` — consumers of vicsek simulation output.
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`csv`]      | `CsvWriter` → `positions.csv`, `steps.csv`                 |
//! | [`observer`] | `SimOutputObserver` (streaming), `write_output` (batch)    |
//! | [`tail`]     | `TailPlan` — fading-trail animation frames, `tail.csv`     |
//!
//! All writers implement [`OutputWriter`].  [`SimOutputObserver`] implements
//! `vk_sim::SimObserver` and streams rows while the run progresses.
//!
//! # Usage
//!
//! ```rust,ignore
//! use vk_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output")).unwrap();
//! let mut obs = SimOutputObserver::new(writer, &config);
//! let output = sim.run(&mut obs).unwrap();
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod tail;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::{SimOutputObserver, write_output};
pub use row::{AgentFrameRow, StepSummaryRow};
pub use tail::{AnimationFrame, TailLayer, TailPlan, write_tail_csv};
pub use writer::OutputWriter;
