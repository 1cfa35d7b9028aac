//! The `OutputWriter` trait implemented by all backend writers.

use crate::{AgentFrameRow, OutputResult, StepSummaryRow};

/// Trait implemented by output backends.
///
/// When driven by [`SimOutputObserver`][crate::SimOutputObserver], errors
/// are stored and retrieved with
/// [`take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write all agents of one frame.
    fn write_frame(&mut self, rows: &[AgentFrameRow]) -> OutputResult<()>;

    /// Write one step summary row.
    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
