//! `hk-output` — trajectory export for the horde_kit crowd simulator.
//!
//! | Backend | Files created                                |
//! |---------|----------------------------------------------|
//! | CSV     | `agent_snapshots.csv`, `tick_summaries.csv`  |
//!
//! Backends implement [`OutputWriter`] and are driven by [`SnapshotObserver`],
//! which implements `hk_crowd::CrowdObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use hk_output::{CsvSnapshotWriter, SnapshotObserver};
//!
//! let writer = CsvSnapshotWriter::new(Path::new("./output"))?;
//! let mut obs = SnapshotObserver::new(writer, /*interval=*/ 10);
//! crowd.run_ticks(600, &mut obs);
//! obs.finish();
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;


pub use csv::CsvSnapshotWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SnapshotObserver;
pub use row::{AgentSnapshotRow, TickSummaryRow};
pub use writer::OutputWriter;
