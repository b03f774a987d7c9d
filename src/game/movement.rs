//! Movement System
//!
//! Advances the evader along its steering vector and every live pursuer
//! toward the evader, for one frame of `dt` milliseconds.

use crate::core::geometry::normalize_and_scale;
use crate::core::vec2::Vec2;
use crate::game::config::GameConfig;
use crate::game::render::{EntityKind, RenderSink};
use crate::game::state::SimulationState;

/// Move every entity for a frame of `dt` milliseconds.
///
/// Pursuers steer toward where the evader was at the *start* of the frame,
/// so all of them see the same snapshot. Each resolved position is reported
/// to `sink`; a pursuer sitting exactly on the evader does not move and is
/// not reported.
pub fn apply_movement(
    state: &mut SimulationState,
    config: &GameConfig,
    dt: f64,
    sink: &mut dyn RenderSink,
) {
    // A clock that runs backwards or returns garbage moves nothing
    let dt = if dt.is_finite() && dt > 0.0 { dt } else { 0.0 };

    let snapshot = state.evader.position;
    move_evader(state, config, dt, sink);

    let step = finite_step(config.pursuer_step(dt));
    let (width, height) = (config.field_width, config.field_height);

    for pursuer in state.pursuers.iter_mut().flatten() {
        let offset = pursuer.position - snapshot;
        if let Some(delta) = normalize_and_scale(offset.x, offset.y, step) {
            pursuer.position = (pursuer.position - delta).clamp_to_field(width, height);
            sink.entity_moved(EntityKind::Pursuer(pursuer.id), pursuer.position);
        }
    }
}

/// Cap a per-frame step so multiplying it by a zero component stays zero.
///
/// An overflowing step becomes `f64::MAX`; NaN (overflow times a zero
/// speed scale) becomes no movement.
#[inline]
fn finite_step(step: f64) -> f64 {
    if step.is_nan() {
        0.0
    } else {
        step.min(f64::MAX)
    }
}

/// Move the evader along the current steering vector, clamped to the field.
fn move_evader(state: &mut SimulationState, config: &GameConfig, dt: f64, sink: &mut dyn RenderSink) {
    let step = finite_step(config.evader_step(dt));
    let steering = state.steering;

    let displaced = state.evader.position + Vec2::new(steering.dx * step, steering.dy * step);
    state.evader.position = displaced.clamp_to_field(config.field_width, config.field_height);

    sink.entity_moved(EntityKind::Evader, state.evader.position);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::input::SteeringInput;
    use crate::game::render::{NullSink, RenderUpdate};
    use crate::game::state::Pursuer;
    use proptest::prelude::*;

    fn config() -> GameConfig {
        GameConfig { speed_scale: 1.0, ..GameConfig::for_field(1000.0, 500.0) }
    }

    #[test]
    fn test_still_steering_keeps_evader() {
        let config = config();
        let start = Vec2::new(200.0, 200.0);
        let mut state = SimulationState::with_layout(start, Vec::new(), 0.0);

        for dt in [0.0, 16.0, 1000.0, 1e9] {
            apply_movement(&mut state, &config, dt, &mut NullSink);
            assert_eq!(state.evader.position, start);
        }
    }

    #[test]
    fn test_evader_moves_along_steering() {
        let config = config();
        let mut state = SimulationState::with_layout(Vec2::new(100.0, 100.0), Vec::new(), 0.0);
        state.steering = SteeringInput::new(1.0, 0.0);

        apply_movement(&mut state, &config, 10.0, &mut NullSink);
        // 10 ms * 0.3 px/ms * 1.0
        assert!((state.evader.position.x - 103.0).abs() < 1e-12);
        assert_eq!(state.evader.position.y, 100.0);
    }

    #[test]
    fn test_pursuer_steers_toward_evader_snapshot() {
        let config = config();
        let mut state = SimulationState::with_layout(
            Vec2::new(100.0, 100.0),
            vec![Pursuer::new(0, Vec2::new(200.0, 100.0))],
            0.0,
        );
        // Evader moves down; the pursuer still aims at (100, 100)
        state.steering = SteeringInput::new(0.0, 1.0);

        let mut updates: Vec<RenderUpdate> = Vec::new();
        apply_movement(&mut state, &config, 10.0, &mut updates);

        let p = state.pursuer(0).unwrap();
        // 10 ms * 0.2 px/ms straight left
        assert!((p.position.x - 198.0).abs() < 1e-12);
        assert_eq!(p.position.y, 100.0);

        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].kind, EntityKind::Evader);
        assert_eq!(updates[1], RenderUpdate { kind: EntityKind::Pursuer(0), position: p.position });
    }

    #[test]
    fn test_colocated_pursuer_does_not_move() {
        let config = config();
        let spot = Vec2::new(50.0, 50.0);
        let mut state = SimulationState::with_layout(spot, vec![Pursuer::new(3, spot)], 0.0);

        let mut updates: Vec<RenderUpdate> = Vec::new();
        apply_movement(&mut state, &config, 16.0, &mut updates);

        assert_eq!(state.pursuer(3).unwrap().position, spot);
        assert_eq!(updates.len(), 1, "only the evader is reported");
    }

    #[test]
    fn test_tombstones_are_skipped() {
        let config = config();
        let mut state = SimulationState::with_layout(
            Vec2::new(0.0, 0.0),
            vec![Pursuer::new(0, Vec2::new(10.0, 10.0)), Pursuer::new(1, Vec2::new(90.0, 90.0))],
            0.0,
        );
        state.eliminate(0);

        let mut updates: Vec<RenderUpdate> = Vec::new();
        apply_movement(&mut state, &config, 16.0, &mut updates);
        assert_eq!(updates.len(), 2);
        assert!(state.pursuers[0].is_none());
    }

    #[test]
    fn test_negative_dt_moves_nothing() {
        let config = config();
        let mut state = SimulationState::with_layout(
            Vec2::new(100.0, 100.0),
            vec![Pursuer::new(0, Vec2::new(300.0, 300.0))],
            0.0,
        );
        state.steering = SteeringInput::new(1.0, 0.0);

        apply_movement(&mut state, &config, -50.0, &mut NullSink);
        assert_eq!(state.evader.position, Vec2::new(100.0, 100.0));
        assert_eq!(state.pursuer(0).unwrap().position, Vec2::new(300.0, 300.0));
    }

    #[test]
    fn test_overflowing_step_stays_in_field() {
        // Passes validation, but `dt * factor * scale` overflows to infinity
        let config = GameConfig {
            evader_speed_factor: 1e300,
            pursuer_speed_factor: 1e300,
            ..config()
        };
        let (width, height) = (config.field_width, config.field_height);
        assert!(config.validate().is_ok());
        assert!(config.evader_step(1e10).is_infinite());

        // Axis-aligned steering: the idle axis must not turn into NaN
        let mut state = SimulationState::with_layout(
            Vec2::new(500.0, 250.0),
            vec![Pursuer::new(0, Vec2::new(900.0, 250.0))],
            0.0,
        );
        state.steering = SteeringInput::new(0.0, 1.0);
        apply_movement(&mut state, &config, 1e10, &mut NullSink);

        assert_eq!(state.evader.position, Vec2::new(500.0, height));
        let p = state.pursuer(0).unwrap().position;
        assert!(p.is_in_field(width, height));
        // Pursuer flew left along its zero-y offset
        assert_eq!(p, Vec2::new(0.0, 250.0));

        // Still steering: the evader stays put
        let mut state = SimulationState::with_layout(Vec2::new(500.0, 250.0), Vec::new(), 0.0);
        apply_movement(&mut state, &config, 1e10, &mut NullSink);
        assert_eq!(state.evader.position, Vec2::new(500.0, 250.0));
    }

    #[test]
    fn test_overflow_times_zero_scale_moves_nothing() {
        let config = GameConfig {
            evader_speed_factor: 1e300,
            speed_scale: 0.0,
            ..config()
        };
        let mut state = SimulationState::with_layout(Vec2::new(10.0, 20.0), Vec::new(), 0.0);
        state.steering = SteeringInput::new(1.0, 0.0);

        apply_movement(&mut state, &config, 1e10, &mut NullSink);
        assert_eq!(state.evader.position, Vec2::new(10.0, 20.0));
    }

    proptest! {
        #[test]
        fn evader_stays_in_field(
            x in 0.0f64..=1000.0,
            y in 0.0f64..=500.0,
            angle in 0.0f64..std::f64::consts::TAU,
            dt in 0.0f64..1e9,
        ) {
            let config = config();
            let mut state = SimulationState::with_layout(Vec2::new(x, y), Vec::new(), 0.0);
            state.steering = SteeringInput::new(angle.cos(), angle.sin());

            apply_movement(&mut state, &config, dt, &mut NullSink);
            prop_assert!(state.evader.position.is_in_field(config.field_width, config.field_height));
        }

        #[test]
        fn pursuers_stay_in_field_and_never_overshoot_far(
            px in 0.0f64..=1000.0,
            py in 0.0f64..=500.0,
            dt in 0.0f64..100.0,
        ) {
            let config = config();
            let evader = Vec2::new(500.0, 250.0);
            let start = Vec2::new(px, py);
            let mut state = SimulationState::with_layout(evader, vec![Pursuer::new(0, start)], 0.0);

            apply_movement(&mut state, &config, dt, &mut NullSink);
            let end = state.pursuer(0).unwrap().position;
            prop_assert!(end.is_in_field(config.field_width, config.field_height));
            prop_assert!(end.distance_squared(start).sqrt() <= config.pursuer_step(dt) + 1e-9);
        }
    }
}
