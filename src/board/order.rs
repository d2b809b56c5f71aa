//! Order types for all three phase kinds.
//!
//! `Order` is a tagged sum covering movement, retreat, and adjustment
//! orders. Variants carry exactly the data needed to specify the order;
//! cross-references to other units are by location, never by pointer.

use super::loc::Loc;
use super::unit::UnitType;

/// A unit reference inside an order: type plus current location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OrderUnit {
    pub unit_type: UnitType,
    pub loc: Loc,
}

impl OrderUnit {
    pub const fn new(unit_type: UnitType, loc: Loc) -> Self {
        OrderUnit { unit_type, loc }
    }
}

/// A Diplomacy order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Order {
    /// `A PAR H`
    Hold { unit: OrderUnit },

    /// `A PAR - BUR`, `F NTH - NWY`, `A LON - NWY VIA`
    Move { unit: OrderUnit, dest: Loc, via_convoy: bool },

    /// `A MUN S A BOH`
    SupportHold { unit: OrderUnit, target: OrderUnit },

    /// `A MUN S F KIE - BER`
    SupportMove { unit: OrderUnit, target: OrderUnit, dest: Loc },

    /// `F MAO C A BRE - LON`
    Convoy { unit: OrderUnit, army: OrderUnit, dest: Loc },

    /// `A SER R ALB`
    Retreat { unit: OrderUnit, dest: Loc },

    /// `F TRI D`
    Disband { unit: OrderUnit },

    /// `A VIE B`, `F STP/SC B`
    Build { unit: OrderUnit },

    /// `WAIVE`
    Waive,
}

impl Order {
    /// The location of the ordered unit, if the order names one.
    pub fn unit_loc(&self) -> Option<Loc> {
        self.unit().map(|u| u.loc)
    }

    /// The ordered unit, if the order names one.
    pub fn unit(&self) -> Option<OrderUnit> {
        match *self {
            Order::Hold { unit }
            | Order::Move { unit, .. }
            | Order::SupportHold { unit, .. }
            | Order::SupportMove { unit, .. }
            | Order::Convoy { unit, .. }
            | Order::Retreat { unit, .. }
            | Order::Disband { unit }
            | Order::Build { unit } => Some(unit),
            Order::Waive => None,
        }
    }

    pub fn is_move(&self) -> bool {
        matches!(self, Order::Move { .. })
    }
}
