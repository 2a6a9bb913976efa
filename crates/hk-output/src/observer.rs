//! `SnapshotObserver<W>` — bridges `CrowdObserver` to an `OutputWriter`.

use hk_agent::AgentStore;
use hk_core::Tick;
use hk_crowd::CrowdObserver;

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`CrowdObserver`] that writes a snapshot of every agent plus one summary
/// row on every `interval`-th tick (tick 0 included).
///
/// Errors from the writer are stored because `CrowdObserver` methods have no
/// return value.  Call [`finish`](Self::finish) after the last tick, then
/// check [`take_error`](Self::take_error).
pub struct SnapshotObserver<W: OutputWriter> {
    writer:     W,
    interval:   u64,
    rows:       Vec<AgentSnapshotRow>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SnapshotObserver<W> {
    /// `interval` of 0 is treated as 1 (every tick).
    pub fn new(writer: W, interval: u64) -> Self {
        Self {
            writer,
            interval:   interval.max(1),
            rows:       Vec::new(),
            last_error: None,
        }
    }

    /// Flush the writer.  Safe to call more than once.
    pub fn finish(&mut self) {
        let result = self.writer.finish();
        self.store_err(result);
    }

    /// Take the first stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                log::error!("crowd output failed: {e}");
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> CrowdObserver for SnapshotObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, elapsed_secs: f64, agents: &AgentStore) {
        if tick.0 % self.interval != 0 {
            return;
        }

        self.rows.clear();
        self.rows.extend((0..agents.count).map(|i| {
            let p = agents.position[i];
            let v = agents.velocity[i];
            AgentSnapshotRow {
                tick:       tick.0,
                agent_id:   i as u32,
                x:          p.x,
                y:          p.y,
                vx:         v.x,
                vy:         v.y,
                has_target: agents.has_target[i],
            }
        }));

        if !self.rows.is_empty() {
            let result = self.writer.write_snapshots(&self.rows);
            self.store_err(result);
        }

        let summary = TickSummaryRow {
            tick:          tick.0,
            elapsed_secs,
            moving_agents: agents.moving_count() as u64,
        };
        let result = self.writer.write_tick_summary(&summary);
        self.store_err(result);
    }
}
