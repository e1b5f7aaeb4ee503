//! Unit tests for nt-agent.

#[cfg(test)]
mod blackboard {
    use nt_core::{AgentId, Vec3};

    use crate::{Blackboard, BlackboardValue};

    #[test]
    fn set_and_typed_get() {
        let mut bb = Blackboard::new();
        bb.set("alert", true);
        bb.set("count", 3i64);
        bb.set("timer", 1.5f64);
        bb.set("mode", "patrol");
        bb.set("target", Vec3::new(1.0, 2.0, 3.0));
        bb.set("prey", AgentId(4));

        assert_eq!(bb.get_bool("alert"), Some(true));
        assert_eq!(bb.get_int("count"), Some(3));
        assert_eq!(bb.get_float("timer"), Some(1.5));
        assert_eq!(bb.get_text("mode"), Some("patrol"));
        assert_eq!(bb.get_position("target"), Some(Vec3::new(1.0, 2.0, 3.0)));
        assert_eq!(bb.get_agent("prey"), Some(AgentId(4)));
        assert_eq!(bb.len(), 6);
    }

    #[test]
    fn wrong_variant_is_none() {
        let mut bb = Blackboard::new();
        bb.set("count", 3i64);
        assert_eq!(bb.get_bool("count"), None);
        assert_eq!(bb.get_float("count"), None);
        assert_eq!(bb.get_int("missing"), None);
    }

    #[test]
    fn overwrite_returns_previous() {
        let mut bb = Blackboard::new();
        assert_eq!(bb.set("k", 1i64), None);
        assert_eq!(bb.set("k", 2i64), Some(BlackboardValue::Int(1)));
        assert_eq!(bb.remove("k"), Some(BlackboardValue::Int(2)));
        assert!(bb.is_empty());
    }

    #[test]
    fn path_values() {
        let mut bb = Blackboard::new();
        let path = vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)];
        bb.set("route", path.clone());
        assert_eq!(bb.get_path("route"), Some(path.as_slice()));
        assert!(bb.contains("route"));
        bb.clear();
        assert!(!bb.contains("route"));
    }
}

#[cfg(test)]
mod state {
    use nt_core::{AgentId, Vec3};

    use crate::{AgentState, Sighting};

    fn agent() -> AgentState {
        AgentState::new(AgentId(0), Vec3::ZERO)
    }

    #[test]
    fn new_agent_has_no_path() {
        let a = agent();
        assert!(!a.has_path());
        assert!(!a.has_arrived());
        assert_eq!(a.next_waypoint(), None);
        assert_eq!(a.current_path_index(), 0);
    }

    #[test]
    fn set_path_resets_index() {
        let mut a = agent();
        a.set_path(vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)]);
        a.advance_waypoint();
        assert_eq!(a.current_path_index(), 1);
        a.set_path(vec![Vec3::new(5.0, 0.0, 0.0)]);
        assert_eq!(a.current_path_index(), 0);
        assert_eq!(a.destination(), Some(Vec3::new(5.0, 0.0, 0.0)));
    }

    #[test]
    fn advance_saturates_at_len() {
        let mut a = agent();
        a.set_path(vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)]);
        a.advance_waypoint();
        a.advance_waypoint();
        a.advance_waypoint();
        assert_eq!(a.current_path_index(), 2);
        assert!(a.has_arrived());
        assert!(!a.has_path());
    }

    #[test]
    fn clear_path() {
        let mut a = agent();
        a.set_path(vec![Vec3::ZERO]);
        a.clear_path();
        assert!(a.current_path().is_empty());
        assert!(!a.has_arrived());
    }

    #[test]
    fn sightings() {
        let mut a = agent();
        a.visible_agents = vec![
            Sighting { id: AgentId(2), position: Vec3::new(1.0, 0.0, 0.0), distance: 1.0 },
            Sighting { id: AgentId(5), position: Vec3::new(3.0, 0.0, 0.0), distance: 3.0 },
        ];
        assert_eq!(a.nearest_visible().map(|s| s.id), Some(AgentId(2)));
        assert!(a.can_see(AgentId(5)));
        assert!(!a.can_see(AgentId(7)));
    }
}

#[cfg(test)]
mod motion {
    use nt_core::Vec3;

    use crate::{Locomotion, StepOutcome};

    #[test]
    fn moves_at_max_speed() {
        let loco = Locomotion { max_speed: 2.0, arrival_radius: 0.01 };
        let mut pos = Vec3::ZERO;
        let mut vel = Vec3::ZERO;
        let out = loco.step_toward(&mut pos, &mut vel, Vec3::new(10.0, 0.0, 0.0), 0.5);
        assert_eq!(out, StepOutcome::Moving);
        assert_eq!(pos, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(vel, Vec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn never_overshoots() {
        let loco = Locomotion { max_speed: 100.0, arrival_radius: 0.01 };
        let mut pos = Vec3::ZERO;
        let mut vel = Vec3::ZERO;
        let target = Vec3::new(0.0, 3.0, 0.0);
        let out = loco.step_toward(&mut pos, &mut vel, target, 1.0);
        assert_eq!(out, StepOutcome::Arrived);
        assert_eq!(pos, target);
    }

    #[test]
    fn already_there() {
        let loco = Locomotion::default();
        let mut pos = Vec3::new(1.0, 1.0, 0.0);
        let mut vel = Vec3::ZERO;
        let out = loco.step_toward(&mut pos, &mut vel, Vec3::new(1.05, 1.0, 0.0), 0.1);
        assert_eq!(out, StepOutcome::Arrived);
        assert_eq!(pos, Vec3::new(1.0, 1.0, 0.0));
        assert_eq!(vel, Vec3::ZERO);
    }

    #[test]
    fn validity() {
        assert!(Locomotion::default().is_valid());
        assert!(!Locomotion { max_speed: 0.0, arrival_radius: 0.1 }.is_valid());
        assert!(!Locomotion { max_speed: 1.0, arrival_radius: -0.1 }.is_valid());
    }
}

#[cfg(test)]
mod perception {
    use nt_core::Vec3;

    use crate::PerceptionConfig;

    #[test]
    fn range_only() {
        let p = PerceptionConfig { range: 5.0, field_of_view_deg: None };
        assert_eq!(p.sees(Vec3::ZERO, Vec3::ZERO, Vec3::new(3.0, 4.0, 0.0)), Some(5.0));
        assert_eq!(p.sees(Vec3::ZERO, Vec3::ZERO, Vec3::new(3.0, 4.1, 0.0)), None);
    }

    #[test]
    fn view_cone_uses_heading() {
        let p = PerceptionConfig { range: 10.0, field_of_view_deg: Some(90.0) };
        let heading = Vec3::new(1.0, 0.0, 0.0);
        assert!(p.sees(Vec3::ZERO, heading, Vec3::new(5.0, 1.0, 0.0)).is_some());
        // Behind the agent.
        assert!(p.sees(Vec3::ZERO, heading, Vec3::new(-5.0, 0.0, 0.0)).is_none());
        // 60° off-axis is outside a 90° cone.
        assert!(p.sees(Vec3::ZERO, heading, Vec3::new(1.0, 1.8, 0.0)).is_none());
    }

    #[test]
    fn stationary_agent_sees_all_around() {
        let p = PerceptionConfig { range: 10.0, field_of_view_deg: Some(30.0) };
        assert!(p.sees(Vec3::ZERO, Vec3::ZERO, Vec3::new(-5.0, 0.0, 0.0)).is_some());
    }

    #[test]
    fn validity() {
        assert!(PerceptionConfig::default().is_valid());
        assert!(!PerceptionConfig { range: -1.0, field_of_view_deg: None }.is_valid());
        assert!(!PerceptionConfig { range: 1.0, field_of_view_deg: Some(0.0) }.is_valid());
    }
}
