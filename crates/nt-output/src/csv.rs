//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `agent_snapshots.csv`
//! - `tick_summaries.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

pub const SNAPSHOT_HEADER: [&str; 12] = [
    "agent_id", "tick", "x", "y", "z", "vx", "vy", "vz", "path_index", "path_len", "visible", "status",
];

pub const SUMMARY_HEADER: [&str; 8] = [
    "tick", "elapsed_secs", "agents", "running", "succeeded", "failed", "idle", "moving",
];

/// Writes world output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` (creating `dir` if needed) and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;

        let mut snapshots = Writer::from_path(dir.join("agent_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADER)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADER)?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.agent_id.to_string(),
                row.tick.to_string(),
                format!("{:.4}", row.x),
                format!("{:.4}", row.y),
                format!("{:.4}", row.z),
                format!("{:.4}", row.vx),
                format!("{:.4}", row.vy),
                format!("{:.4}", row.vz),
                row.path_index.to_string(),
                row.path_len.to_string(),
                row.visible.to_string(),
                row.status.to_owned(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            format!("{:.4}", row.elapsed_secs),
            row.agents.to_string(),
            row.running.to_string(),
            row.succeeded.to_string(),
            row.failed.to_string(),
            row.idle.to_string(),
            row.moving.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
