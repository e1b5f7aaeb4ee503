//! `WorldOutputObserver<W>` - bridges `WorldObserver` to an `OutputWriter`.

use nt_core::Tick;
use nt_sim::{Agent, TickSummary, WorldObserver};

use crate::row::{AgentSnapshotRow, TickSummaryRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`WorldObserver`] that writes agent snapshots and tick summaries to an
/// [`OutputWriter`].
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After `world.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct WorldOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> WorldOutputObserver<W> {
    /// Create an observer backed by `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error (if any).  Only the first error is kept.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

fn snapshot_row(tick: Tick, agent: &Agent) -> AgentSnapshotRow {
    let s = &agent.state;
    AgentSnapshotRow {
        agent_id:   agent.id().0,
        tick:       tick.0,
        x:          s.position.x,
        y:          s.position.y,
        z:          s.position.z,
        vx:         s.velocity.x,
        vy:         s.velocity.y,
        vz:         s.velocity.z,
        path_index: s.current_path_index() as u32,
        path_len:   s.current_path().len() as u32,
        visible:    s.visible_agents.len() as u32,
        status:     match agent.last_status() {
            Some(status) => status.as_str(),
            None => "idle",
        },
    }
}

impl<W: OutputWriter> WorldObserver for WorldOutputObserver<W> {
    fn on_tick_end(&mut self, summary: &TickSummary) {
        let row = TickSummaryRow {
            tick:         summary.tick.0,
            elapsed_secs: summary.elapsed_secs,
            agents:       summary.agents as u64,
            running:      summary.running as u64,
            succeeded:    summary.succeeded as u64,
            failed:       summary.failed as u64,
            idle:         summary.idle as u64,
            moving:       summary.moving as u64,
        };
        let result = self.writer.write_tick_summary(&row);
        self.store_err(result);
    }

    fn on_snapshot(&mut self, tick: Tick, agents: &[Agent]) {
        let rows: Vec<AgentSnapshotRow> = agents.iter().map(|a| snapshot_row(tick, a)).collect();
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_world_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
