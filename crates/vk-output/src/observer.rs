//! `SimOutputObserver<W>` — bridges `SimObserver` to an `OutputWriter`, plus
//! batch export of a finished run.

use vk_core::{Step, Vec2, VicsekConfig};
use vk_sim::{SimObserver, SimOutput};

use crate::row::{AgentFrameRow, StepSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SimObserver`] that streams frames and step summaries to any
/// [`OutputWriter`] backend while the run progresses.
///
/// Errors from the writer are stored internally because `SimObserver` methods
/// have no return value.  After `sim.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    dt:         f64,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`, using `config` for simulated
    /// time conversion.
    pub fn new(writer: W, config: &VicsekConfig) -> Self {
        Self {
            writer,
            dt:         config.dt,
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `sim.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the sim).
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                tracing::warn!(error = %e, "output write failed");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SimObserver for SimOutputObserver<W> {
    fn on_step_end(&mut self, step: Step, neighbor_links: usize) {
        let row = StepSummaryRow {
            step:           step.0,
            sim_time:       step.0 as f64 * self.dt,
            neighbor_links: neighbor_links as u64,
        };
        let result = self.writer.write_step_summary(&row);
        self.store_err(result);
    }

    fn on_frame(&mut self, step: Step, positions: &[Vec2], headings: &[Vec2]) {
        let rows = frame_rows(step, positions, headings);
        if !rows.is_empty() {
            let result = self.writer.write_frame(&rows);
            self.store_err(result);
        }
    }

    fn on_run_end(&mut self, _final_step: Step) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}

/// Write every frame of a finished run, then `finish()` the writer.
///
/// Step summaries are not written: the neighbor relation is not kept in
/// the output.  Use [`SimOutputObserver`] during the run for those.
pub fn write_output<W: OutputWriter>(output: &SimOutput, writer: &mut W) -> OutputResult<()> {
    for (t, (positions, headings)) in output
        .positions
        .frames()
        .zip(output.headings.frames())
        .enumerate()
    {
        writer.write_frame(&frame_rows(Step(t as u64), positions, headings))?;
    }
    writer.finish()
}

fn frame_rows(step: Step, positions: &[Vec2], headings: &[Vec2]) -> Vec<AgentFrameRow> {
    positions
        .iter()
        .zip(headings)
        .enumerate()
        .map(|(i, (p, h))| AgentFrameRow {
            step:     step.0,
            agent_id: i as u32,
            x:        p.x,
            y:        p.y,
            hx:       h.x,
            hy:       h.y,
        })
        .collect()
}
