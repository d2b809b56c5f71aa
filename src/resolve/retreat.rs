//! Retreat-phase resolution.
//!
//! Dislodged units may retreat to one of their precomputed legal
//! destinations or disband. Two retreats into the same province destroy
//! both units; a dislodged unit without a usable order disbands.

use crate::board::adjacency::reachable_locs;
use crate::board::loc::Loc;
use crate::board::order::{Order, OrderUnit};
use crate::board::province::{Power, Province};
use crate::board::state::{DislodgedUnit, GameState};
use crate::board::unit::UnitType;

use super::adjudicator::{Dislodgement, OrderOutcome};

/// A resolved retreat-phase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetreatResult {
    pub order: Order,
    pub power: Power,
    pub outcome: OrderOutcome,
}

/// Legal retreat destinations for a freshly dislodged unit.
///
/// A destination qualifies when it is reachable in one step for the unit
/// type, its province is vacant on the post-movement board, it saw no
/// standoff this turn, and it is not where the attacker came from.
pub fn retreat_destinations(
    state: &GameState,
    unit_type: UnitType,
    loc: Loc,
    attacker_from: Province,
    contested: &[Province],
) -> Vec<Loc> {
    reachable_locs(unit_type, loc)
        .into_iter()
        .filter(|dest| {
            dest.province != attacker_from
                && !contested.contains(&dest.province)
                && state.units[dest.province as usize].is_none()
        })
        .collect()
}

/// Resolves retreat-phase orders against the dislodgements in `state`.
///
/// Unordered dislodged units get a synthesized disband. A retreat to a
/// destination outside the unit's legal list fails (the unit disbands),
/// as do simultaneous retreats into the same province.
pub fn resolve_retreats(orders: &[(Order, Power)], state: &GameState) -> Vec<RetreatResult> {
    let mut results = Vec::new();

    // How many retreats aim at each parent province.
    let mut inbound = [0u8; crate::board::province::PROVINCE_COUNT];
    for (order, power) in orders {
        if let Order::Retreat { unit, dest } = order {
            if retreat_is_legal(state, unit, *power, *dest) {
                inbound[dest.province as usize] += 1;
            }
        }
    }

    let mut ordered: Vec<Province> = Vec::new();
    for (order, power) in orders {
        match order {
            Order::Disband { unit } => {
                let known = state
                    .dislodged_at(unit.loc.province)
                    .map(|d| d.power == *power)
                    .unwrap_or(false);
                if known {
                    ordered.push(unit.loc.province);
                }
                results.push(RetreatResult {
                    order: *order,
                    power: *power,
                    outcome: if known { OrderOutcome::Succeeded } else { OrderOutcome::Failed },
                });
            }
            Order::Retreat { unit, dest } => {
                let legal = retreat_is_legal(state, unit, *power, *dest);
                if legal {
                    ordered.push(unit.loc.province);
                }
                let outcome = if !legal {
                    OrderOutcome::Failed
                } else if inbound[dest.province as usize] > 1 {
                    OrderOutcome::Bounced
                } else {
                    OrderOutcome::Succeeded
                };
                results.push(RetreatResult { order: *order, power: *power, outcome });
            }
            _ => {
                results.push(RetreatResult {
                    order: *order,
                    power: *power,
                    outcome: OrderOutcome::Failed,
                });
            }
        }
    }

    // Anything dislodged and unaccounted for disbands.
    for d in &state.dislodged {
        if ordered.contains(&d.loc.province) {
            continue;
        }
        results.push(RetreatResult {
            order: Order::Disband {
                unit: OrderUnit::new(d.unit_type, d.loc),
            },
            power: d.power,
            outcome: OrderOutcome::Succeeded,
        });
    }

    results
}

fn retreat_is_legal(state: &GameState, unit: &OrderUnit, power: Power, dest: Loc) -> bool {
    match state.dislodged_at(unit.loc.province) {
        Some(d) => d.power == power && d.retreat_to.contains(&dest),
        None => false,
    }
}

/// Applies retreat results: survivors take their destinations, everything
/// else is gone, and the dislodgement list empties.
pub fn apply_retreats(state: &mut GameState, results: &[RetreatResult]) {
    for r in results {
        if r.outcome != OrderOutcome::Succeeded {
            continue;
        }
        if let Order::Retreat { unit, dest } = r.order {
            state.place_unit(r.power, unit.unit_type, dest);
        }
    }
    state.dislodged.clear();
}

/// Builds the dislodged-unit records for a post-movement state, each with
/// its legal retreat destinations baked in.
pub fn record_dislodgements(
    state: &GameState,
    dislodged: &[Dislodgement],
    contested: &[Province],
) -> Vec<DislodgedUnit> {
    let mut out: Vec<DislodgedUnit> = dislodged
        .iter()
        .map(|d| DislodgedUnit {
            power: d.power,
            unit_type: d.unit_type,
            loc: d.loc,
            retreat_to: retreat_destinations(state, d.unit_type, d.loc, d.attacker_from, contested),
        })
        .collect();
    out.sort_by_key(|d| d.loc.index());
    out
}
