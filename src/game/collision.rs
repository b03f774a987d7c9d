//! Collision Detection
//!
//! One pass over the x-sorted pursuer list finds:
//!
//! 1. **Capture**: any pursuer strictly within the collision radius of the
//!    evader ends the round in defeat, and the pass stops there.
//! 2. **Mutual elimination**: pursuer pairs strictly within the radius of
//!    each other are both removed.
//!
//! Because the list is ascending in x, the scan for partners of `i` stops at
//! the first `j` whose x-gap reaches the radius: every later `j` is farther.
//! Eliminated pursuers are only tombstoned here so indices stay stable;
//! cleanup compacts the list on the next frame.

use crate::core::vec2::Vec2;
use crate::game::events::GameEvent;
use crate::game::state::{Outcome, Phase, Pursuer, PursuerId, SimulationState};

/// What a collision pass found.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CollisionReport {
    /// Pursuer that caught the evader, if any
    pub capture: Option<PursuerId>,
    /// Pairs removed this pass
    pub eliminated: Vec<(PursuerId, PursuerId)>,
    /// Distance tests performed (for profiling the pruning)
    pub checks: u32,
}

impl CollisionReport {
    /// Number of pursuers removed.
    pub fn eliminated_count(&self) -> usize {
        self.eliminated.len() * 2
    }
}

/// Strictly-inside test on squared distance.
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius_sq: f64) -> bool {
    a.distance_squared(b) < radius_sq
}

/// Run the collision pass. Requires `state.pursuers` ascending by x.
pub fn detect_collisions(state: &mut SimulationState, collision_radius: f64) -> CollisionReport {
    let mut report = CollisionReport::default();
    let radius_sq = collision_radius * collision_radius;

    if let Some(catcher) = find_capture(state, radius_sq, &mut report) {
        let old_phase = state.phase;
        state.evader.alive = false;
        state.phase = Phase::Over(Outcome::Defeat);
        report.capture = Some(catcher.id);

        tracing::debug!(frame = state.frame, pursuer = catcher.id, "evader caught");
        state.push_event(GameEvent::evader_caught(state.frame, catcher.id, catcher.position));
        state.push_event(GameEvent::phase_changed(state.frame, old_phase, state.phase));
        return report;
    }

    eliminate_pairs(state, collision_radius, radius_sq, &mut report);
    report
}

/// First live pursuer (in list order) strictly within the radius of the evader.
fn find_capture(state: &SimulationState, radius_sq: f64, report: &mut CollisionReport) -> Option<Pursuer> {
    let evader = state.evader.position;
    for pursuer in state.live_pursuers() {
        report.checks += 1;
        if within_radius(pursuer.position, evader, radius_sq) {
            return Some(*pursuer);
        }
    }
    None
}

/// Pairwise pass with the sorted-x early exit.
fn eliminate_pairs(
    state: &mut SimulationState,
    collision_radius: f64,
    radius_sq: f64,
    report: &mut CollisionReport,
) {
    let len = state.pursuers.len();

    for i in 0..len {
        let Some(first) = state.pursuers[i] else {
            continue;
        };

        for j in (i + 1)..len {
            let Some(second) = state.pursuers[j] else {
                continue;
            };

            report.checks += 1;
            let dx = second.position.x - first.position.x;
            debug_assert!(dx >= 0.0, "pursuers not sorted by x: {} then {}", first.position.x, second.position.x);
            if dx >= collision_radius {
                break;
            }

            let dy = second.position.y - first.position.y;
            if dx * dx + dy * dy < radius_sq {
                state.eliminate(i);
                state.eliminate(j);
                report.eliminated.push((first.id, second.id));

                let midpoint = (first.position + second.position).scale(0.5);
                tracing::debug!(frame = state.frame, first = first.id, second = second.id, "pursuers eliminated");
                state.push_event(GameEvent::pursuers_eliminated(state.frame, first.id, second.id, midpoint));

                // `first` is gone; it must not pair again
                break;
            }
        }
    }
}

/// Reference O(n^2) pass without pruning, for cross-checking.
#[cfg(test)]
pub(crate) fn brute_force_pairs(pursuers: &[Option<Pursuer>], radius_sq: f64) -> Vec<(PursuerId, PursuerId)> {
    let mut slots = pursuers.to_vec();
    let mut pairs = Vec::new();
    for i in 0..slots.len() {
        for j in (i + 1)..slots.len() {
            if let (Some(a), Some(b)) = (slots[i], slots[j]) {
                if within_radius(a.position, b.position, radius_sq) {
                    slots[i] = None;
                    slots[j] = None;
                    pairs.push((a.id, b.id));
                    break;
                }
            }
        }
    }
    pairs
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const RADIUS: f64 = 29.0;

    fn state_with(evader: Vec2, positions: &[(f64, f64)]) -> SimulationState {
        let pursuers = positions
            .iter()
            .enumerate()
            .map(|(id, &(x, y))| Pursuer::new(id as PursuerId, Vec2::new(x, y)))
            .collect();
        SimulationState::with_layout(evader, pursuers, 0.0)
    }

    #[test]
    fn test_close_pair_is_eliminated() {
        let mut state = state_with(Vec2::new(500.0, 500.0), &[(100.0, 100.0), (105.0, 100.0)]);

        let report = detect_collisions(&mut state, RADIUS);

        assert_eq!(report.capture, None);
        assert_eq!(report.eliminated, vec![(0, 1)]);
        assert_eq!(report.eliminated_count(), 2);
        assert_eq!(state.live_count(), 0);
        // Tombstoned, not removed
        assert_eq!(state.pursuers.len(), 2);
        assert_eq!(state.phase, Phase::Running);
    }

    #[test]
    fn test_capture_ends_round() {
        let mut state = state_with(Vec2::new(200.0, 200.0), &[(210.0, 200.0)]);

        let report = detect_collisions(&mut state, RADIUS);

        assert_eq!(report.capture, Some(0));
        assert_eq!(state.phase, Phase::Over(Outcome::Defeat));
        assert!(!state.evader.alive);

        let events = state.take_events();
        assert!(matches!(events[0].data, crate::game::events::GameEventData::EvaderCaught { pursuer_id: 0, .. }));
    }

    #[test]
    fn test_capture_short_circuits_pairs() {
        // The pair at (100, 100) would collide, but the capture comes first
        let mut state = state_with(
            Vec2::new(400.0, 400.0),
            &[(100.0, 100.0), (101.0, 100.0), (400.0, 401.0)],
        );

        let report = detect_collisions(&mut state, RADIUS);

        assert_eq!(report.capture, Some(2));
        assert!(report.eliminated.is_empty());
        assert_eq!(state.live_count(), 3);
    }

    #[test]
    fn test_exact_radius_is_not_a_collision() {
        let mut state = state_with(Vec2::new(0.0, 0.0), &[(100.0, 100.0), (129.0, 100.0)]);
        let report = detect_collisions(&mut state, RADIUS);
        assert!(report.eliminated.is_empty());

        // Exactly on the radius from the evader: not caught either
        let mut state = state_with(Vec2::new(100.0, 100.0), &[(100.0, 129.0)]);
        assert_eq!(detect_collisions(&mut state, RADIUS).capture, None);
    }

    #[test]
    fn test_colocated_pursuer_is_captured() {
        let mut state = state_with(Vec2::new(50.0, 50.0), &[(50.0, 50.0)]);
        assert_eq!(detect_collisions(&mut state, RADIUS).capture, Some(0));
    }

    #[test]
    fn test_same_x_different_y() {
        // dx == 0 but too far in y
        let mut state = state_with(Vec2::new(900.0, 900.0), &[(100.0, 100.0), (100.0, 140.0)]);
        assert!(detect_collisions(&mut state, RADIUS).eliminated.is_empty());

        // dx == 0, close in y
        let mut state = state_with(Vec2::new(900.0, 900.0), &[(100.0, 100.0), (100.0, 120.0)]);
        assert_eq!(detect_collisions(&mut state, RADIUS).eliminated.len(), 1);
    }

    #[test]
    fn test_box_corner_is_not_a_collision() {
        // Within the radius on both axes but not in Euclidean distance
        let mut state = state_with(Vec2::new(900.0, 900.0), &[(100.0, 100.0), (125.0, 125.0)]);
        assert!(detect_collisions(&mut state, RADIUS).eliminated.is_empty());
    }

    #[test]
    fn test_pursuer_is_matched_once() {
        // Three pursuers all within range of each other: only one pair goes
        let mut state = state_with(
            Vec2::new(900.0, 900.0),
            &[(100.0, 100.0), (102.0, 100.0), (104.0, 100.0)],
        );

        let report = detect_collisions(&mut state, RADIUS);
        assert_eq!(report.eliminated, vec![(0, 1)]);
        assert_eq!(state.live_count(), 1);
        assert!(state.pursuer(2).is_some());
    }

    #[test]
    fn test_pruning_skips_far_pursuers() {
        let positions: Vec<(f64, f64)> = (0..10).map(|i| (i as f64 * 100.0, 0.0)).collect();
        let mut state = state_with(Vec2::new(5000.0, 5000.0), &positions);

        let report = detect_collisions(&mut state, RADIUS);

        // 10 capture checks + one pair check per i (except the last)
        assert_eq!(report.checks, 10 + 9);
        assert!(report.eliminated.is_empty());
    }

    proptest! {
        #[test]
        fn pruned_pass_matches_brute_force(
            positions in proptest::collection::vec((0.0f64..300.0, 0.0f64..300.0), 0..40),
        ) {
            let mut state = state_with(Vec2::new(10_000.0, 10_000.0), &positions);
            let expected = brute_force_pairs(&state.pursuers, RADIUS * RADIUS);

            let report = detect_collisions(&mut state, RADIUS);

            prop_assert_eq!(report.eliminated, expected);

            // Tombstoning never reorders the survivors
            let xs: Vec<f64> = state.live_pursuers().map(|p| p.position.x).collect();
            prop_assert!(xs.windows(2).all(|w| w[0] <= w[1]));
        }
    }
}
