//! Unit tests for hk-core primitives.

#[cfg(test)]
mod ids {
    use crate::AgentId;

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(AgentId::default(), AgentId::INVALID);
        assert_eq!(AgentId::INVALID.0, u32::MAX);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod vec2 {
    use crate::Vec2;

    #[test]
    fn normalize_zero_is_zero() {
        assert_eq!(Vec2::ZERO.normalize_or_zero(), Vec2::ZERO);
    }

    #[test]
    fn normalize_unit_length() {
        let n = Vec2::new(3.0, 4.0).normalize_or_zero();
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);
    }

    #[test]
    fn clamp_length_preserves_direction() {
        let v = Vec2::new(6.0, 8.0).clamp_length(5.0);
        assert!((v.length() - 5.0).abs() < 1e-5);
        assert!((v.x - 3.0).abs() < 1e-5 && (v.y - 4.0).abs() < 1e-5);
    }

    #[test]
    fn clamp_length_leaves_short_vectors() {
        let v = Vec2::new(1.0, 1.0);
        assert_eq!(v.clamp_length(5.0), v);
    }

    #[test]
    fn clamp_length_to_zero() {
        assert_eq!(Vec2::new(1.0, -2.0).clamp_length(0.0), Vec2::ZERO);
    }

    #[test]
    fn clamp_square_bounds() {
        let v = Vec2::new(12.0, -30.0).clamp_square(10.0);
        assert_eq!(v, Vec2::new(10.0, -10.0));
    }

    #[test]
    fn finiteness() {
        assert!(Vec2::new(1.0, -2.0).is_finite());
        assert!(!Vec2::new(f32::NAN, 0.0).is_finite());
        assert!(!Vec2::new(0.0, f32::NEG_INFINITY).is_finite());
    }
}

#[cfg(test)]
mod time {
    use crate::{StepClock, Tick};

    #[test]
    fn advance_counts_ticks_and_seconds() {
        let mut clock = StepClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.current_tick, Tick(2));
        assert!((clock.elapsed_secs - 0.75).abs() < 1e-9);
    }

    #[test]
    fn tick_display() {
        assert_eq!(Tick(3).to_string(), "T3");
        assert_eq!(Tick(3).offset(2), Tick(5));
    }
}

#[cfg(test)]
mod rng {
    use crate::SimRng;

    #[test]
    fn same_seed_same_points() {
        let mut a = SimRng::new(9);
        let mut b = SimRng::new(9);
        for _ in 0..10 {
            assert_eq!(a.point_in_square(5.0), b.point_in_square(5.0));
        }
    }

    #[test]
    fn points_stay_inside_square() {
        let mut rng = SimRng::new(1);
        for _ in 0..1_000 {
            let p = rng.point_in_square(2.5);
            assert!(p.x.abs() <= 2.5 && p.y.abs() <= 2.5, "{p}");
        }
    }

    #[test]
    fn child_streams_differ() {
        let mut root = SimRng::new(3);
        let mut c1 = root.child(1);
        let mut c2 = root.child(2);
        assert_ne!(c1.point_in_square(100.0), c2.point_in_square(100.0));
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, CrowdConfig, MIN_CELL_SIZE};

    #[test]
    fn default_is_valid() {
        CrowdConfig::default().validate().unwrap();
    }

    #[test]
    fn cell_size_has_floor() {
        let cfg = CrowdConfig { gap: 0.1, ..CrowdConfig::default() };
        assert_eq!(cfg.cell_size(), MIN_CELL_SIZE);
        let cfg = CrowdConfig { gap: 4.0, ..CrowdConfig::default() };
        assert_eq!(cfg.cell_size(), 2.0);
    }

    #[test]
    fn rejects_non_positive_field() {
        let cfg = CrowdConfig { field_size: 0.0, ..CrowdConfig::default() };
        match cfg.validate() {
            Err(CoreError::Config(msg)) => assert!(msg.contains("field_size"), "{msg}"),
            other => panic!("expected config error, got {other:?}"),
        }
    }

    #[test]
    fn rejects_zero_gap_and_nan() {
        assert!(CrowdConfig { gap: 0.0, ..CrowdConfig::default() }.validate().is_err());
        assert!(CrowdConfig { gap: f32::NAN, ..CrowdConfig::default() }.validate().is_err());
    }

    #[test]
    fn rejects_negative_speed_and_zero_agents() {
        assert!(CrowdConfig { max_speed: -1.0, ..CrowdConfig::default() }.validate().is_err());
        assert!(CrowdConfig { agent_count: 0, ..CrowdConfig::default() }.validate().is_err());
    }

    #[test]
    fn rejects_grids_too_large_to_allocate() {
        let cfg = CrowdConfig { field_size: 2.0e6, gap: 0.1, ..CrowdConfig::default() };
        match cfg.validate() {
            Err(CoreError::Config(msg)) => {
                assert!(msg.contains("field_size") && msg.contains("gap"), "{msg}");
            }
            other => panic!("expected config error, got {other:?}"),
        }
        // Just inside the limit: 4096 x 4096 cells.
        let cfg = CrowdConfig { field_size: 1024.0, gap: 0.5, ..CrowdConfig::default() };
        cfg.validate().unwrap();
    }

    #[test]
    fn zero_speed_is_allowed() {
        CrowdConfig { max_speed: 0.0, ..CrowdConfig::default() }.validate().unwrap();
    }
}
