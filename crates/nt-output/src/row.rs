//! Plain data row types written by output backends.

/// One agent's kinematic and behavior state at a given tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshotRow {
    pub agent_id:   u32,
    pub tick:       u64,
    pub x:          f32,
    pub y:          f32,
    pub z:          f32,
    pub vx:         f32,
    pub vy:         f32,
    pub vz:         f32,
    /// Next waypoint index; equals `path_len` once arrived.
    pub path_index: u32,
    pub path_len:   u32,
    /// Agents seen this tick.
    pub visible:    u32,
    /// Root status: `running`, `success`, `failure`, or `idle` (no tree).
    pub status:     &'static str,
}

/// Outcome counts for one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:         u64,
    /// Simulated seconds at the end of the tick.
    pub elapsed_secs: f64,
    pub agents:       u64,
    pub running:      u64,
    pub succeeded:    u64,
    pub failed:       u64,
    pub idle:         u64,
    pub moving:       u64,
}
