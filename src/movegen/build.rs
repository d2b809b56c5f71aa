//! Adjustment-phase order enumeration.

use crate::board::loc::Loc;
use crate::board::order::{Order, OrderUnit};
use crate::board::province::{Power, Province, Terrain};
use crate::board::state::GameState;
use crate::board::unit::UnitType;

/// All legal adjustment orders for a power: builds (plus waive) when it
/// is owed units, disbands when it owes them, nothing when balanced.
pub fn legal_adjustments(power: Power, state: &GameState) -> Vec<Order> {
    let delta = state.adjustment_delta(power);
    if delta > 0 {
        let mut orders = vec![Order::Waive];
        for home in state.buildable_homes(power) {
            orders.extend(builds_at(home));
        }
        orders
    } else if delta < 0 {
        state
            .units_of(power)
            .iter()
            .map(|u| Order::Disband { unit: OrderUnit::new(u.unit_type, u.loc) })
            .collect()
    } else {
        Vec::new()
    }
}

/// Build orders available at one vacant home center.
pub fn builds_at(home: Province) -> Vec<Order> {
    let mut orders = Vec::new();
    if home.terrain() != Terrain::Water {
        orders.push(Order::Build {
            unit: OrderUnit::new(UnitType::Army, Loc::new(home)),
        });
    }
    if home.terrain() == Terrain::Coastal {
        if home.has_split_coasts() {
            for &coast in home.coasts() {
                orders.push(Order::Build {
                    unit: OrderUnit::new(UnitType::Fleet, Loc::with_coast(home, coast)),
                });
            }
        } else {
            orders.push(Order::Build {
                unit: OrderUnit::new(UnitType::Fleet, Loc::new(home)),
            });
        }
    }
    orders
}
