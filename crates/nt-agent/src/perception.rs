//! Perception parameters and the per-target visibility test.
//!
//! Visibility is purely geometric: Euclidean range plus an optional view
//! cone around the agent's heading.  There is no occlusion test; line of
//! sight against the navigation grid is left to callers that need it.

use nt_core::{AgentId, Vec3};

/// How far and how wide an agent can see.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerceptionConfig {
    /// Maximum sighting distance in world units.
    pub range: f32,
    /// Full view-cone angle in degrees, centered on the heading.  `None`
    /// sees in every direction.  A stationary agent (no heading) always
    /// sees in every direction.
    pub field_of_view_deg: Option<f32>,
}

impl Default for PerceptionConfig {
    fn default() -> Self {
        Self { range: 20.0, field_of_view_deg: None }
    }
}

/// Another agent seen during the perception pass at the start of a tick.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sighting {
    pub id:       AgentId,
    /// Position of the seen agent at the start of the tick.
    pub position: Vec3,
    /// Distance from the observer at the start of the tick.
    pub distance: f32,
}

impl PerceptionConfig {
    pub fn is_valid(&self) -> bool {
        self.range.is_finite()
            && self.range >= 0.0
            && self.field_of_view_deg.is_none_or(|fov| fov.is_finite() && fov > 0.0)
    }

    /// Distance to `target` if it is visible from `observer` facing
    /// `heading`, otherwise `None`.
    pub fn sees(&self, observer: Vec3, heading: Vec3, target: Vec3) -> Option<f32> {
        let to_target = target - observer;
        let distance = to_target.length();
        if distance > self.range {
            return None;
        }

        if let (Some(fov), Some(forward), Some(dir)) =
            (self.field_of_view_deg, heading.normalized(), to_target.normalized())
        {
            let cos_angle = forward.dot(dir).clamp(-1.0, 1.0);
            if cos_angle.acos().to_degrees() > fov * 0.5 {
                return None;
            }
        }
        Some(distance)
    }
}
