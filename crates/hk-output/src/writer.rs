//! The `OutputWriter` trait implemented by backend writers.

use crate::{AgentSnapshotRow, OutputResult, TickSummaryRow};

/// A sink for crowd snapshots.
///
/// Errors are stored by [`SnapshotObserver`][crate::SnapshotObserver] and
/// retrieved with its `take_error`.
pub trait OutputWriter {
    /// Write every agent's state for one tick.
    fn write_snapshots(&mut self, rows: &[AgentSnapshotRow]) -> OutputResult<()>;

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
