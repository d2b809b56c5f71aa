//! Phase sequencing.
//!
//! Drives the turn cycle MOVEMENT -> RETREAT -> ADJUSTMENT across years,
//! eliding retreat phases with nothing dislodged and winters in which no
//! power owes a build or disband. Supply-center ownership recomputes
//! exactly once per year, when the fall resolution completes.

use crate::board::phase::{Phase, PhaseKind, Season};
use crate::board::province::{Power, ALL_POWERS, ALL_PROVINCES, SOLO_CENTER_COUNT};
use crate::board::state::GameState;

/// Captures supply centers: a center belongs to whoever stands on it; an
/// empty center keeps its owner (ownership is sticky between falls).
pub fn update_center_ownership(state: &mut GameState) {
    for prov in ALL_PROVINCES {
        if !prov.is_supply_center() {
            continue;
        }
        if let Some((power, _)) = state.units[prov as usize] {
            state.sc_owner[prov as usize] = Some(power);
        }
    }
}

/// True when some power's center and unit counts disagree.
pub fn any_adjustment_needed(state: &GameState) -> bool {
    ALL_POWERS.iter().any(|p| state.adjustment_delta(*p) != 0)
}

/// The power holding a winning center count, if any.
pub fn solo_winner(state: &GameState) -> Option<Power> {
    ALL_POWERS
        .iter()
        .copied()
        .find(|p| state.center_count(*p) >= SOLO_CENTER_COUNT)
}

/// Advances `state.phase` after the current phase's resolution has been
/// applied, handling center capture, elision, and the year rollover.
pub fn advance(state: &mut GameState, has_dislodgements: bool) {
    let current = state.phase;

    let fall_resolution_complete = current.season == Season::Fall
        && ((current.kind == PhaseKind::Movement && !has_dislodgements)
            || current.kind == PhaseKind::Retreat);
    if fall_resolution_complete {
        update_center_ownership(state);
    }

    let next = match (current.season, current.kind) {
        (season, PhaseKind::Movement) if has_dislodgements => {
            Phase::new(season, current.year, PhaseKind::Retreat)
        }
        (Season::Spring, PhaseKind::Movement) | (Season::Spring, PhaseKind::Retreat) => {
            Phase::new(Season::Fall, current.year, PhaseKind::Movement)
        }
        (Season::Fall, PhaseKind::Movement) | (Season::Fall, PhaseKind::Retreat) => {
            if any_adjustment_needed(state) {
                Phase::new(Season::Winter, current.year, PhaseKind::Adjustment)
            } else {
                Phase::new(Season::Spring, current.year + 1, PhaseKind::Movement)
            }
        }
        _ => Phase::new(Season::Spring, current.year + 1, PhaseKind::Movement),
    };

    state.phase = next;
    if next.kind != PhaseKind::Retreat {
        state.dislodged.clear();
    }
}
