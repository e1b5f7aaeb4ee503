//! JSON scenario description and world construction.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use serde::Deserialize;

use nt_agent::{Locomotion, PerceptionConfig};
use nt_behavior::{BehaviorTree, Node, library};
use nt_core::{SimConfig, Vec3};
use nt_sim::{AgentSpec, World, WorldBuilder};
use nt_spatial::NavGrid;

#[derive(Debug, Deserialize)]
pub struct ScenarioConfig {
    pub sim:        SimConfig,
    pub grid:       GridConfig,
    #[serde(default)]
    pub obstacles:  Vec<ObstacleConfig>,
    #[serde(default)]
    pub patrols:    Vec<PatrolConfig>,
    #[serde(default)]
    pub chasers:    Vec<ChaserConfig>,
    pub output_dir: PathBuf,
}

#[derive(Debug, Deserialize)]
pub struct GridConfig {
    pub min:       Vec3,
    pub max:       Vec3,
    pub cell_size: f32,
}

/// Cells overlapping the sphere become unwalkable.
#[derive(Debug, Deserialize)]
pub struct ObstacleConfig {
    pub center: Vec3,
    pub radius: f32,
}

#[derive(Debug, Deserialize)]
pub struct PatrolConfig {
    pub start:      Vec3,
    pub waypoints:  Vec<Vec3>,
    #[serde(default)]
    pub locomotion: Locomotion,
    #[serde(default)]
    pub perception: PerceptionConfig,
}

#[derive(Debug, Deserialize)]
pub struct ChaserConfig {
    pub start:      Vec3,
    #[serde(default)]
    pub locomotion: Locomotion,
    #[serde(default)]
    pub perception: PerceptionConfig,
}

impl ScenarioConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading scenario {}", path.display()))?;
        let scenario: ScenarioConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing scenario {}", path.display()))?;
        for (i, p) in scenario.patrols.iter().enumerate() {
            if p.waypoints.is_empty() {
                bail!("patrol {i} has no waypoints");
            }
        }
        Ok(scenario)
    }

    pub fn build_grid(&self) -> Result<NavGrid> {
        let mut grid = NavGrid::generate(self.grid.min, self.grid.max, self.grid.cell_size)?;
        for obstacle in &self.obstacles {
            grid.mark_obstacle(obstacle.center, obstacle.radius);
        }
        Ok(grid)
    }

    /// Build the world: patrol agents first, then chasers.  Chasers share
    /// one tree.
    pub fn build_world(&self) -> Result<World> {
        let mut builder = WorldBuilder::new(self.sim.clone(), self.build_grid()?);

        for p in &self.patrols {
            let tree = BehaviorTree::new(library::patrol(p.waypoints.clone()))?;
            builder = builder.agent(
                AgentSpec::at(p.start)
                    .with_tree(Arc::new(tree))
                    .with_locomotion(p.locomotion)
                    .with_perception(p.perception),
            );
        }

        let hunt = Arc::new(BehaviorTree::new(chaser_tree())?);
        for c in &self.chasers {
            builder = builder.agent(
                AgentSpec::at(c.start)
                    .with_tree(hunt.clone())
                    .with_locomotion(c.locomotion)
                    .with_perception(c.perception),
            );
        }

        Ok(builder.build()?)
    }
}

/// Chase whoever is nearest; idle briefly when nobody is in sight.
fn chaser_tree() -> Node {
    Node::repeater(
        "hunt",
        0,
        Node::selector("chase or idle", vec![library::chase(), library::wait(0.5)]),
    )
}
