//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `positions.csv`
//! - `steps.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentFrameRow, OutputResult, StepSummaryRow};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    frames:    Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Open (or create) the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut frames = Writer::from_path(dir.join("positions.csv"))?;
        frames.write_record(["step", "agent_id", "x", "y", "hx", "hy"])?;

        let mut summaries = Writer::from_path(dir.join("steps.csv"))?;
        summaries.write_record(["step", "sim_time", "neighbor_links"])?;

        Ok(Self {
            frames,
            summaries,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_frame(&mut self, rows: &[AgentFrameRow]) -> OutputResult<()> {
        for row in rows {
            self.frames.write_record(&[
                row.step.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.hx.to_string(),
                row.hy.to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_step_summary(&mut self, row: &StepSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.step.to_string(),
            row.sim_time.to_string(),
            row.neighbor_links.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.frames.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
