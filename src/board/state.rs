//! Board snapshots.
//!
//! `GameState` is the complete picture of a game at one phase: unit
//! positions, supply-center ownership, influence, dislodgements awaiting
//! retreat, and per-power civil-disorder flags. Position data lives in
//! fixed arrays indexed by `Province as usize`. Once a state is archived
//! into history it is never mutated again.

use super::loc::Loc;
use super::phase::Phase;
use super::province::{Coast, Power, Province, ALL_PROVINCES, POWER_COUNT, PROVINCE_COUNT};
use super::unit::{Unit, UnitType};

/// A unit forced out of its province, with its precomputed retreat options.
///
/// `retreat_to` already accounts for adjacency, occupancy, contested
/// provinces, and the attacker's origin; the retreat solver and the
/// snapshot codec both treat it as the authority on retreat legality.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DislodgedUnit {
    pub power: Power,
    pub unit_type: UnitType,
    pub loc: Loc,
    pub retreat_to: Vec<Loc>,
}

/// Complete board state at a point in time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub phase: Phase,
    /// Occupying unit per province.
    pub units: [Option<(Power, UnitType)>; PROVINCE_COUNT],
    /// Coast occupied by a fleet on a split-coast province.
    pub fleet_coast: [Option<Coast>; PROVINCE_COUNT],
    /// Supply-center owner; None when neutral or not a supply center.
    pub sc_owner: [Option<Power>; PROVINCE_COUNT],
    /// Last power to occupy each province.
    pub influence: [Option<Power>; PROVINCE_COUNT],
    /// Units dislodged by the preceding movement phase, by loc index.
    pub dislodged: Vec<DislodgedUnit>,
    /// Powers that were auto-disbanded in a winter phase.
    pub civil_disorder: [bool; POWER_COUNT],
}

impl GameState {
    /// An empty board at the given phase.
    pub fn empty(phase: Phase) -> Self {
        GameState {
            phase,
            units: [None; PROVINCE_COUNT],
            fleet_coast: [None; PROVINCE_COUNT],
            sc_owner: [None; PROVINCE_COUNT],
            influence: [None; PROVINCE_COUNT],
            dislodged: Vec::new(),
            civil_disorder: [false; POWER_COUNT],
        }
    }

    /// The standard 1901 opening position: 22 units on their home centers.
    pub fn initial() -> Self {
        use Province::*;
        use UnitType::{Army, Fleet};

        let mut state = GameState::empty(Phase::initial());
        let opening: [(Power, UnitType, Province, Coast); 22] = [
            (Power::Austria, Army, Bud, Coast::None),
            (Power::Austria, Fleet, Tri, Coast::None),
            (Power::Austria, Army, Vie, Coast::None),
            (Power::England, Fleet, Edi, Coast::None),
            (Power::England, Fleet, Lon, Coast::None),
            (Power::England, Army, Lvp, Coast::None),
            (Power::France, Fleet, Bre, Coast::None),
            (Power::France, Army, Mar, Coast::None),
            (Power::France, Army, Par, Coast::None),
            (Power::Germany, Army, Ber, Coast::None),
            (Power::Germany, Fleet, Kie, Coast::None),
            (Power::Germany, Army, Mun, Coast::None),
            (Power::Italy, Fleet, Nap, Coast::None),
            (Power::Italy, Army, Rom, Coast::None),
            (Power::Italy, Army, Ven, Coast::None),
            (Power::Russia, Army, Mos, Coast::None),
            (Power::Russia, Fleet, Sev, Coast::None),
            (Power::Russia, Fleet, Stp, Coast::South),
            (Power::Russia, Army, War, Coast::None),
            (Power::Turkey, Fleet, Ank, Coast::None),
            (Power::Turkey, Army, Con, Coast::None),
            (Power::Turkey, Army, Smy, Coast::None),
        ];
        for (power, unit_type, province, coast) in opening {
            state.place_unit(power, unit_type, Loc::with_coast(province, coast));
            state.sc_owner[province as usize] = Some(power);
        }
        state
    }

    /// Places a unit. Returns false if the province is already occupied.
    pub fn place_unit(&mut self, power: Power, unit_type: UnitType, loc: Loc) -> bool {
        let idx = loc.province as usize;
        if self.units[idx].is_some() {
            return false;
        }
        self.units[idx] = Some((power, unit_type));
        self.fleet_coast[idx] = if loc.coast != Coast::None { Some(loc.coast) } else { None };
        self.influence[idx] = Some(power);
        true
    }

    /// Removes the unit at a province, if any.
    pub fn remove_unit(&mut self, province: Province) -> Option<(Power, UnitType)> {
        self.fleet_coast[province as usize] = None;
        self.units[province as usize].take()
    }

    /// The full loc (with coast) of the unit at a province.
    pub fn unit_loc_at(&self, province: Province) -> Option<Loc> {
        self.units[province as usize]?;
        let coast = self.fleet_coast[province as usize].unwrap_or(Coast::None);
        Some(Loc::with_coast(province, coast))
    }

    /// The unit at a province.
    pub fn unit_at(&self, province: Province) -> Option<Unit> {
        let (power, unit_type) = self.units[province as usize]?;
        Some(Unit { unit_type, power, loc: self.unit_loc_at(province).unwrap_or(Loc::new(province)) })
    }

    /// All of a power's units, in loc-index order.
    pub fn units_of(&self, power: Power) -> Vec<Unit> {
        let mut out = Vec::new();
        for p in ALL_PROVINCES {
            if let Some(unit) = self.unit_at(p) {
                if unit.power == power {
                    out.push(unit);
                }
            }
        }
        out
    }

    /// Supply centers owned by a power, in province order.
    pub fn centers_of(&self, power: Power) -> Vec<Province> {
        ALL_PROVINCES
            .iter()
            .copied()
            .filter(|p| self.sc_owner[*p as usize] == Some(power))
            .collect()
    }

    pub fn center_count(&self, power: Power) -> usize {
        self.sc_owner.iter().filter(|o| **o == Some(power)).count()
    }

    pub fn unit_count(&self, power: Power) -> usize {
        self.units
            .iter()
            .filter(|u| matches!(u, Some((p, _)) if *p == power))
            .count()
    }

    /// Winter delta: positive builds owed, negative disbands owed.
    pub fn adjustment_delta(&self, power: Power) -> i32 {
        self.center_count(power) as i32 - self.unit_count(power) as i32
    }

    /// Home centers currently available to build at: owned, vacant, home.
    pub fn buildable_homes(&self, power: Power) -> Vec<Province> {
        power
            .home_centers()
            .iter()
            .copied()
            .filter(|p| {
                self.sc_owner[*p as usize] == Some(power) && self.units[*p as usize].is_none()
            })
            .collect()
    }

    /// The dislodged unit that came from `province`, if any.
    pub fn dislodged_at(&self, province: Province) -> Option<&DislodgedUnit> {
        self.dislodged.iter().find(|d| d.loc.province == province)
    }
}
