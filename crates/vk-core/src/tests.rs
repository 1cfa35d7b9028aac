//! Unit tests for vk-core primitives.

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
    fn range_is_creation_order() {
        let ids: Vec<_> = AgentId::range(3).collect();
        assert_eq!(ids, [AgentId(0), AgentId(1), AgentId(2)]);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
    }
}

#[cfg(test)]
mod vec2 {
    use std::f64::consts::{FRAC_PI_2, PI};

    use crate::Vec2;

    #[test]
    fn from_angle_is_unit() {
        for k in 0..16 {
            let v = Vec2::from_angle(k as f64 * PI / 8.0);
            assert!((v.norm() - 1.0).abs() < 1e-12);
        }
        let up = Vec2::from_angle(FRAC_PI_2);
        assert!(up.x.abs() < 1e-12 && (up.y - 1.0).abs() < 1e-12);
    }

    #[test]
    fn normalized_rejects_zero() {
        assert_eq!(Vec2::ZERO.normalized(), None);
        assert_eq!(Vec2::new(f64::NAN, 1.0).normalized(), None);
        let n = Vec2::new(3.0, 4.0).normalized().unwrap();
        assert_eq!(n, Vec2::new(0.6, 0.8));
    }

    #[test]
    fn wrap_into_half_open_domain() {
        assert_eq!(Vec2::new(11.0, -1.0).wrap(10.0), Vec2::new(1.0, 9.0));
        assert_eq!(Vec2::new(10.0, 0.0).wrap(10.0), Vec2::new(0.0, 0.0));
        // rem_euclid rounds this up to exactly 10.0
        let w = Vec2::new(-1e-17, 5.0).wrap(10.0);
        assert!(w.x >= 0.0 && w.x < 10.0, "got {w}");
    }

    #[test]
    fn arithmetic() {
        let a = Vec2::new(1.0, 2.0);
        let b = Vec2::new(0.5, -1.0);
        assert_eq!(a + b, Vec2::new(1.5, 1.0));
        assert_eq!(a - b, Vec2::new(0.5, 3.0));
        assert_eq!(a * 2.0, Vec2::new(2.0, 4.0));
        assert_eq!(a / 2.0, Vec2::new(0.5, 1.0));
    }
}

#[cfg(test)]
mod time {
    use crate::{SimClock, Step};

    #[test]
    fn step_arithmetic() {
        let t = Step(10);
        assert_eq!(t + 5, Step(15));
        assert_eq!(t.next(), Step(11));
        assert_eq!(Step(15) - Step(10), 5u64);
    }

    #[test]
    fn clock_elapsed() {
        let mut clock = SimClock::new(0.25);
        assert_eq!(clock.elapsed(), 0.0);
        clock.advance();
        clock.advance();
        assert_eq!(clock.current, Step(2));
        assert_eq!(clock.elapsed(), 0.5);
        assert_eq!(clock.time_at(Step(8)), 2.0);
    }
}

#[cfg(test)]
mod frames {
    use crate::{AgentId, FrameSeries, Step, Vec2};

    fn series() -> FrameSeries {
        let mut s = FrameSeries::with_capacity(2, 3);
        s.push_frame(&[Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0)]);
        s.push_frame(&[Vec2::new(2.0, 0.0), Vec2::new(3.0, 1.0)]);
        s
    }

    #[test]
    fn frame_access() {
        let s = series();
        assert_eq!(s.len(), 2);
        assert_eq!(s.agent_count(), 2);
        assert_eq!(s.frame(1).unwrap()[0], Vec2::new(2.0, 0.0));
        assert_eq!(s.get(Step(1), AgentId(1)), Some(Vec2::new(3.0, 1.0)));
        assert!(s.frame(2).is_none());
        assert_eq!(s.last_frame().unwrap()[1], Vec2::new(3.0, 1.0));
    }

    #[test]
    fn nested_shape() {
        let nested = series().to_nested();
        assert_eq!(nested.len(), 2);
        assert_eq!(nested[0].len(), 2);
        assert_eq!(nested[1][1], [3.0, 1.0]);
    }

    #[test]
    fn frames_iterates_in_order() {
        let s = series();
        let firsts: Vec<_> = s.frames().map(|f| f[0].x).collect();
        assert_eq!(firsts, [0.0, 2.0]);
    }

    #[test]
    #[should_panic]
    fn wrong_width_panics() {
        let mut s = FrameSeries::with_capacity(2, 1);
        s.push_frame(&[Vec2::ZERO]);
    }
}

#[cfg(test)]
mod config {
    use crate::VicsekConfig;

    #[test]
    fn default_validates() {
        assert!(VicsekConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_invalid_values() {
        let bad = [
            VicsekConfig { agents: 0, ..Default::default() },
            VicsekConfig { domain: 0.0, ..Default::default() },
            VicsekConfig { domain: -3.0, ..Default::default() },
            VicsekConfig { radius: -0.1, ..Default::default() },
            VicsekConfig { noise: -1.0, ..Default::default() },
            VicsekConfig { dt: 0.0, ..Default::default() },
            VicsekConfig { steps: 1, ..Default::default() },
            VicsekConfig { speed: f64::NAN, ..Default::default() },
        ];
        for cfg in bad {
            assert!(cfg.validate().is_err(), "{cfg:?} should be rejected");
        }
    }

    #[test]
    fn zero_radius_and_noise_are_valid() {
        let cfg = VicsekConfig { radius: 0.0, noise: 0.0, steps: 2, ..Default::default() };
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn error_message_is_descriptive() {
        let err = VicsekConfig { steps: 1, ..Default::default() }.validate().unwrap_err();
        assert_eq!(err.to_string(), "invalid configuration: need at least 2 frames, got 1");
    }

    #[test]
    fn interactive_bounds() {
        // Default T = 1000 exceeds the interactive maximum of 300.
        let violations = VicsekConfig::default().check_interactive_bounds();
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].param, "steps");

        let cfg = VicsekConfig { steps: 30, ..Default::default() };
        assert!(cfg.check_interactive_bounds().is_empty());
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, AgentRngs, SimRng};

    #[test]
    fn deterministic_same_seed() {
        let mut r1 = AgentRng::new(12345, AgentId(0));
        let mut r2 = AgentRng::new(12345, AgentId(0));
        for _ in 0..100 {
            assert_eq!(r1.standard_normal(), r2.standard_normal());
        }
    }

    #[test]
    fn different_agents_differ() {
        let mut r0 = AgentRng::new(1, AgentId(0));
        let mut r1 = AgentRng::new(1, AgentId(1));
        assert_ne!(r0.standard_normal(), r1.standard_normal());
    }

    #[test]
    fn zero_sigma_gives_zero_noise() {
        let mut rngs = AgentRngs::new(4, 9);
        assert_eq!(rngs.len(), 4);
        let v = rngs.get_mut(AgentId(3)).gaussian_vec(0.0);
        assert_eq!(v.norm(), 0.0);
    }

    #[test]
    fn angle_in_bounds() {
        let mut rng = SimRng::new(0);
        for _ in 0..1000 {
            let a = rng.angle();
            assert!((0.0..std::f64::consts::TAU).contains(&a));
        }
    }
}
