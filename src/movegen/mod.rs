//! Legal order enumeration for the current phase: movement, retreat, and
//! adjustment, plus the per-power orderable-location listing.

pub mod build;
pub mod movement;
pub mod retreat;

use std::collections::BTreeMap;

use crate::board::loc::Loc;
use crate::board::order::Order;
use crate::board::phase::PhaseKind;
use crate::board::province::{Power, ALL_POWERS, ALL_PROVINCES};
use crate::board::state::GameState;

pub use build::legal_adjustments;
pub use movement::{convoy_destinations, legal_orders};
pub use retreat::legal_retreats;

/// The locations a power must (or may) order this phase, in loc order.
pub fn orderable_locations(power: Power, state: &GameState) -> Vec<Loc> {
    match state.phase.kind {
        PhaseKind::Movement => state.units_of(power).iter().map(|u| u.loc).collect(),
        PhaseKind::Retreat => state
            .dislodged
            .iter()
            .filter(|d| d.power == power)
            .map(|d| d.loc)
            .collect(),
        PhaseKind::Adjustment => {
            let delta = state.adjustment_delta(power);
            if delta > 0 {
                state.buildable_homes(power).into_iter().map(Loc::new).collect()
            } else if delta < 0 {
                state.units_of(power).iter().map(|u| u.loc).collect()
            } else {
                Vec::new()
            }
        }
    }
}

/// Every legal order at every orderable loc for the current phase.
pub fn all_possible_orders(state: &GameState) -> BTreeMap<Loc, Vec<Order>> {
    let mut map = BTreeMap::new();
    match state.phase.kind {
        PhaseKind::Movement => {
            for prov in ALL_PROVINCES {
                if let Some(loc) = state.unit_loc_at(prov) {
                    map.insert(loc, movement::legal_orders(prov, state));
                }
            }
        }
        PhaseKind::Retreat => {
            for d in &state.dislodged {
                map.insert(d.loc, retreat::legal_retreats(d.loc.province, state));
            }
        }
        PhaseKind::Adjustment => {
            for &power in &ALL_POWERS {
                let delta = state.adjustment_delta(power);
                if delta > 0 {
                    for home in state.buildable_homes(power) {
                        let mut orders = build::builds_at(home);
                        orders.push(Order::Waive);
                        map.insert(Loc::new(home), orders);
                    }
                } else if delta < 0 {
                    for unit in state.units_of(power) {
                        map.insert(
                            unit.loc,
                            vec![Order::Disband {
                                unit: crate::board::order::OrderUnit::new(unit.unit_type, unit.loc),
                            }],
                        );
                    }
                }
            }
        }
    }
    map
}
