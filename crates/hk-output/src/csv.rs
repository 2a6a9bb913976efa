//! CSV output backend.
//!
//! Creates two files in the output directory:
//! - `agent_snapshots.csv`: `tick,agent_id,x,y,vx,vy,has_target`
//! - `tick_summaries.csv`: `tick,elapsed_secs,moving_agents`

use std::fs::File;
use std::io::Write;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

pub const SNAPSHOT_FILE: &str = "agent_snapshots.csv";
pub const SUMMARY_FILE: &str = "tick_summaries.csv";

/// Writes crowd trajectories as two CSV streams, normally the two files
/// created by [`new`](CsvSnapshotWriter::new).
pub struct CsvSnapshotWriter<W: Write = File> {
    snapshots: Writer<W>,
    summaries: Writer<W>,
    finished:  bool,
}

impl CsvSnapshotWriter<File> {
    /// Create `dir` if needed, (re)create both files in it, and write the
    /// header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        std::fs::create_dir_all(dir)?;
        let writer = Self::from_writers(
            File::create(dir.join(SNAPSHOT_FILE))?,
            File::create(dir.join(SUMMARY_FILE))?,
        )?;
        log::debug!("csv output opened in {}", dir.display());
        Ok(writer)
    }
}

impl<W: Write> CsvSnapshotWriter<W> {
    /// Wrap two arbitrary sinks and write the header rows.
    pub fn from_writers(snapshots: W, summaries: W) -> OutputResult<Self> {
        let mut snapshots = Writer::from_writer(snapshots);
        snapshots.write_record(["tick", "agent_id", "x", "y", "vx", "vy", "has_target"])?;

        let mut summaries = Writer::from_writer(summaries);
        summaries.write_record(["tick", "elapsed_secs", "moving_agents"])?;

        Ok(Self {
            snapshots,
            summaries,
            finished: false,
        })
    }
}

impl<W: Write> OutputWriter for CsvSnapshotWriter<W> {
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.agent_id.to_string(),
                row.x.to_string(),
                row.y.to_string(),
                row.vx.to_string(),
                row.vy.to_string(),
                (row.has_target as u8).to_string(),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.elapsed_secs.to_string(),
            row.moving_agents.to_string(),
        ])?;
        Ok(())
    }

    /// A failed flush leaves the writer unfinished so the next call retries.
    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.snapshots.flush()?;
        self.summaries.flush()?;
        self.finished = true;
        Ok(())
    }
}
