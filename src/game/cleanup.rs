//! Cleanup System
//!
//! Drops the tombstones left by the previous collision pass, restores the
//! ascending-x order the next collision pass relies on, and declares
//! victory once at most one pursuer is left.

use crate::game::events::GameEvent;
use crate::game::state::{slot_order, Outcome, Phase, Pursuer, SimulationState};

/// Remaining pursuers at or below which the round is won.
pub const VICTORY_THRESHOLD: usize = 1;

/// What a cleanup pass did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CleanupReport {
    /// Tombstones removed
    pub removed: usize,
    /// Live pursuers afterwards
    pub remaining: usize,
    /// This pass ended the round in victory
    pub victory: bool,
}

/// Remove tombstones, producing a dense list.
pub fn compact_pursuers(pursuers: &mut Vec<Option<Pursuer>>) -> usize {
    let before = pursuers.len();
    pursuers.retain(Option::is_some);
    before - pursuers.len()
}

/// Sort ascending by x (ties by id, tombstones last).
pub fn sort_pursuers(pursuers: &mut [Option<Pursuer>]) {
    pursuers.sort_by(slot_order);
}

/// Run the cleanup pass.
pub fn run_cleanup(state: &mut SimulationState) -> CleanupReport {
    let removed = compact_pursuers(&mut state.pursuers);
    sort_pursuers(&mut state.pursuers);

    let remaining = state.pursuers.len();
    let mut report = CleanupReport { removed, remaining, victory: false };

    if remaining <= VICTORY_THRESHOLD && state.phase == Phase::Running {
        let old_phase = state.phase;
        state.phase = Phase::Over(Outcome::Victory);
        report.victory = true;

        tracing::debug!(frame = state.frame, remaining, "swarm reduced, round won");
        state.push_event(GameEvent::phase_changed(state.frame, old_phase, state.phase));
    }

    report
}
