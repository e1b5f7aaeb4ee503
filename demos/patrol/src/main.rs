//! patrol - guards walking waypoint loops around a split wall while a
//! chaser hunts whoever wanders into range.
//!
//! ```text
//! cargo run -p patrol -- demos/patrol/patrol.json
//! RUST_LOG=nt_sim=trace cargo run -p patrol
//! ```

mod scenario;

use std::path::PathBuf;
use std::time::Instant;

use anyhow::Result;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use nt_core::Tick;
use nt_output::{CsvWriter, OutputWriter, WorldOutputObserver};
use nt_sim::{Agent, TickSummary, WorldObserver};

use scenario::ScenarioConfig;

const DEFAULT_SCENARIO: &str = "demos/patrol/patrol.json";

// ── Observer wrapper to count rows ───────────────────────────────────────────

struct CountingObserver<W: OutputWriter> {
    inner:         WorldOutputObserver<W>,
    snapshot_rows: usize,
    summary_rows:  usize,
    peak_moving:   usize,
}

impl<W: OutputWriter> CountingObserver<W> {
    fn new(inner: WorldOutputObserver<W>) -> Self {
        Self { inner, snapshot_rows: 0, summary_rows: 0, peak_moving: 0 }
    }
}

impl<W: OutputWriter> WorldObserver for CountingObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        self.summary_rows += 1;
        self.peak_moving = self.peak_moving.max(summary.moving);
        self.inner.on_tick_end(summary);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[Agent]) {
        self.snapshot_rows += agents.len();
        self.inner.on_snapshot(tick, agents);
    }

    fn on_world_end(&mut self, final_tick: Tick) {
        self.inner.on_world_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(true)
        .init();

    let path = std::env::args().nth(1).map_or_else(|| PathBuf::from(DEFAULT_SCENARIO), PathBuf::from);
    let scenario = ScenarioConfig::load(&path)?;
    info!(
        scenario = %path.display(),
        patrols = scenario.patrols.len(),
        chasers = scenario.chasers.len(),
        obstacles = scenario.obstacles.len(),
        "scenario loaded"
    );

    let mut world = scenario.build_world()?;
    let stats = world.stats();
    info!(
        dims = ?stats.grid_dimensions,
        cells = stats.cell_count,
        walkable = stats.walkable_cells,
        agents = stats.agent_count,
        "world ready"
    );

    let writer = CsvWriter::new(&scenario.output_dir)?;
    let mut obs = CountingObserver::new(WorldOutputObserver::new(writer));

    let t0 = Instant::now();
    world.run(&mut obs)?;
    let wall = t0.elapsed();

    if let Some(e) = obs.inner.take_error() {
        warn!(error = %e, "output error");
    }

    let stats = world.stats();
    info!(
        ticks = stats.tick.0,
        sim_secs = format_args!("{:.1}", stats.elapsed_secs),
        wall_ms = wall.as_millis() as u64,
        snapshot_rows = obs.snapshot_rows,
        summary_rows = obs.summary_rows,
        peak_moving = obs.peak_moving,
        output = %scenario.output_dir.display(),
        "simulation complete"
    );

    println!("{:<8} {:<28} {:<10} {:<8}", "Agent", "Position", "Status", "Visible");
    println!("{}", "-".repeat(56));
    for agent in world.agents() {
        let status = agent.last_status().map_or("idle", |s| s.as_str());
        println!(
            "{:<8} {:<28} {:<10} {:<8}",
            agent.id().to_string(),
            agent.state.position.to_string(),
            status,
            agent.state.visible_agents.len()
        );
    }

    Ok(())
}
