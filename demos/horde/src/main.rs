//! horde — boots a handful of mock services, then runs a crowd.
//!
//! ```text
//! RUST_LOG=info cargo run -p horde --release -- demos/horde/horde.json
//! ```
//!
//! Without an argument the built-in defaults are used.  Trajectories are
//! written as CSV when `output_dir` is set.

mod services;
mod settings;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use hk_boot::BootSequencer;
use hk_crowd::{ClearCause, CrowdBuilder, CrowdObserver};
use hk_core::{AgentId, Tick};
use hk_output::{CsvSnapshotWriter, OutputWriter, SnapshotObserver};

use services::{ConsoleProgress, MockService};
use settings::Settings;

// ── Observer: arrival / stuck counts on top of optional CSV output ───────────

struct RunStats<W: OutputWriter> {
    output:  Option<SnapshotObserver<W>>,
    arrived: u64,
    stuck:   u64,
}

impl<W: OutputWriter> CrowdObserver for RunStats<W> {
    fn on_target_cleared(&mut self, _tick: Tick, _agent: AgentId, cause: ClearCause) {
        match cause {
            ClearCause::Arrived => self.arrived += 1,
            ClearCause::Stuck => self.stuck += 1,
        }
    }

    fn on_tick_end(&mut self, tick: Tick, elapsed_secs: f64, agents: &hk_agent::AgentStore) {
        if let Some(out) = &mut self.output {
            out.on_tick_end(tick, elapsed_secs, agents);
        }
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(Path::new(&path))?,
        None => Settings::default(),
    };
    settings.crowd.validate()?;

    // 1. Boot.
    let mut boot = BootSequencer::new();
    for service in &settings.services {
        // Rejected registrations are logged by the sequencer; keep going.
        let _ = boot.register(MockService::new(service.clone()));
    }
    let summary = boot.run(&mut ConsoleProgress::default()).await?;
    log::info!(
        "{} of {} services up",
        summary.succeeded,
        summary.processed,
    );

    // 2. Crowd.
    let mut crowd = CrowdBuilder::new(settings.crowd.clone()).build()?;
    let output = match &settings.output_dir {
        Some(dir) => Some(SnapshotObserver::new(
            CsvSnapshotWriter::new(dir)?,
            settings.output_interval,
        )),
        None => None,
    };
    let mut stats = RunStats { output, arrived: 0, stuck: 0 };

    log::info!(
        "crowd: {} agents, field {}, {} ticks",
        crowd.len(),
        settings.crowd.field_size,
        settings.ticks,
    );
    let wall = Instant::now();
    crowd.run_ticks(settings.ticks, &mut stats);
    let wall = wall.elapsed();

    if let Some(out) = &mut stats.output {
        out.finish();
        if let Some(e) = out.take_error() {
            log::error!("output error: {e}");
        }
    }

    log::info!(
        "simulated {} in {:.2?} ({:.0} ticks/s)",
        crowd.clock(),
        wall,
        settings.ticks as f64 / wall.as_secs_f64().max(1e-9),
    );
    log::info!(
        "arrivals {}, stuck {}, moving at end {}/{}",
        stats.arrived,
        stats.stuck,
        crowd.moving_count(),
        crowd.len(),
    );

    // 3. Teardown.
    boot.shutdown();
    Ok(())
}
