//! Fixed-speed waypoint following.

use nt_core::Vec3;

/// Movement parameters of one agent.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Locomotion {
    /// Travel speed in world units per second.
    pub max_speed: f32,
    /// A waypoint counts as reached once the agent is this close to it.
    pub arrival_radius: f32,
}

impl Default for Locomotion {
    fn default() -> Self {
        Self { max_speed: 5.0, arrival_radius: 0.1 }
    }
}

/// Result of one [`Locomotion::step_toward`] call.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome {
    /// Within `arrival_radius` of the target after the step.
    Arrived,
    /// Still travelling.
    Moving,
}

impl Locomotion {
    /// `true` if both parameters are usable (finite, speed > 0, radius ≥ 0).
    pub fn is_valid(&self) -> bool {
        self.max_speed.is_finite()
            && self.max_speed > 0.0
            && self.arrival_radius.is_finite()
            && self.arrival_radius >= 0.0
    }

    /// Move `position` straight toward `target` for `dt` seconds at
    /// `max_speed`, never overshooting.  `velocity` is set to the heading
    /// times `max_speed` while moving; it is left untouched when the agent
    /// is already within `arrival_radius`.
    pub fn step_toward(
        &self,
        position: &mut Vec3,
        velocity: &mut Vec3,
        target:   Vec3,
        dt:       f32,
    ) -> StepOutcome {
        let to_target = target - *position;
        let dist = to_target.length();
        if dist <= self.arrival_radius {
            return StepOutcome::Arrived;
        }

        let Some(dir) = to_target.normalized() else {
            return StepOutcome::Arrived;
        };
        let travel = (self.max_speed * dt.max(0.0)).min(dist);
        if travel >= dist {
            *position = target;
        } else {
            *position += dir * travel;
        }
        *velocity = dir * self.max_speed;

        if dist - travel <= self.arrival_radius {
            StepOutcome::Arrived
        } else {
            StepOutcome::Moving
        }
    }
}
