//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `step_metrics.csv`
//! - `agent_snapshots.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, StepMetricsRow};

pub const METRICS_FILE:   &str = "step_metrics.csv";
pub const SNAPSHOTS_FILE: &str = "agent_snapshots.csv";

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    metrics:   Writer<File>,
    snapshots: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create (or truncate) the two CSV files in `dir` and write the header
    /// rows.  `dir` must already exist.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut metrics = Writer::from_path(dir.join(METRICS_FILE))?;
        metrics.write_record(["step", "agent_count", "place_count", "mean_distance_to_goal"])?;

        let mut snapshots = Writer::from_path(dir.join(SNAPSHOTS_FILE))?;
        snapshots.write_record(["step", "agent_id", "x", "y", "goal_place_id", "steps_taken"])?;

        Ok(Self {
            metrics,
            snapshots,
            finished: false,
        })
    }
}

impl OutputWriter for CsvWriter {
    fn write_metrics(&mut self, row: &StepMetricsRow) -> OutputResult<()> {
        self.metrics.write_record(&[
            row.step.to_string(),
            row.agent_count.to_string(),
            row.place_count.to_string(),
            row.mean_distance_to_goal.to_string(),
        ])?;
        Ok(())
    }

    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.step.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.goal_place_id.map(|g| g.to_string()).unwrap_or_default(),
                row.steps_taken.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.metrics.flush()?;
        self.snapshots.flush()?;
        Ok(())
    }
}
