//! Retreat-phase order enumeration.

use crate::board::order::{Order, OrderUnit};
use crate::board::province::Province;
use crate::board::state::GameState;

/// All legal retreat-phase orders for the dislodged unit at `province`:
/// its precomputed retreat destinations plus disband. Empty when nothing
/// was dislodged there.
pub fn legal_retreats(province: Province, state: &GameState) -> Vec<Order> {
    let d = match state.dislodged_at(province) {
        Some(d) => d,
        None => return Vec::new(),
    };
    let unit = OrderUnit::new(d.unit_type, d.loc);

    let mut orders = vec![Order::Disband { unit }];
    for dest in &d.retreat_to {
        orders.push(Order::Retreat { unit, dest: *dest });
    }
    orders
}
