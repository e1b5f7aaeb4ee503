//! Start-of-tick perception pass.
//!
//! Every agent's position is loaded into an R-tree once per tick; each
//! agent then queries the tree for neighbors within its range and filters by
//! its view cone.  Because the index is built before any behavior runs, all
//! agents perceive the same frozen world regardless of update order.

use nt_agent::Sighting;
use nt_core::AgentId;
use rstar::{PointDistance, RTree, RTreeObject, AABB};

use crate::Agent;

// ── R-tree entry ──────────────────────────────────────────────────────────────

#[derive(Clone)]
struct AgentEntry {
    point: [f32; 3],
    id:    AgentId,
}

impl RTreeObject for AgentEntry {
    type Envelope = AABB<[f32; 3]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for AgentEntry {
    fn distance_2(&self, point: &[f32; 3]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        let dz = self.point[2] - point[2];
        dx * dx + dy * dy + dz * dz
    }
}

// ── Snapshot ──────────────────────────────────────────────────────────────────

/// Positions of all agents frozen at the start of a tick.
pub struct PerceptionSnapshot {
    index: RTree<AgentEntry>,
}

impl PerceptionSnapshot {
    /// Index every agent with a finite position.
    pub fn capture(agents: &[Agent]) -> Self {
        let entries = agents
            .iter()
            .filter(|a| a.state.position.is_finite())
            .map(|a| AgentEntry { point: a.state.position.to_array(), id: a.id() })
            .collect();
        Self { index: RTree::bulk_load(entries) }
    }

    pub fn len(&self) -> usize {
        self.index.size()
    }

    pub fn is_empty(&self) -> bool {
        self.index.size() == 0
    }

    /// What `observer` sees: every other agent inside its range and view
    /// cone, nearest first, ties broken by id.
    pub fn sightings_for(&self, observer: &Agent) -> Vec<Sighting> {
        let state = &observer.state;
        let range = state.perception.range;
        if !state.position.is_finite() {
            return Vec::new();
        }
        let mut seen: Vec<Sighting> = self
            .index
            .locate_within_distance(state.position.to_array(), range * range)
            .filter(|e| e.id != state.id)
            .filter_map(|e| {
                let position = nt_core::Vec3::from_array(e.point);
                state
                    .perception
                    .sees(state.position, state.velocity, position)
                    .map(|distance| Sighting { id: e.id, position, distance })
            })
            .collect();
        seen.sort_by(|a, b| a.distance.total_cmp(&b.distance).then(a.id.cmp(&b.id)));
        seen
    }

    /// Sightings for every agent, in the same order as `agents`.
    #[cfg(not(feature = "parallel"))]
    pub fn sightings_for_all(&self, agents: &[Agent]) -> Vec<Vec<Sighting>> {
        agents.iter().map(|a| self.sightings_for(a)).collect()
    }

    /// Sightings for every agent, in the same order as `agents`.
    #[cfg(feature = "parallel")]
    pub fn sightings_for_all(&self, agents: &[Agent]) -> Vec<Vec<Sighting>> {
        use rayon::prelude::*;

        agents.par_iter().map(|a| self.sightings_for(a)).collect()
    }
}
