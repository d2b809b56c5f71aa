//! Adjustment-phase (winter) resolution.
//!
//! Validates build/disband/waive orders against each power's supply-center
//! delta and applies civil disorder when a power under-submits disbands.
//! Civil disorder picks victims deterministically from precomputed
//! distance-to-home tables: one army table and one fleet table per power,
//! indexed by canonical loc index, with -1 marking locs the table never
//! disbands from.

use std::sync::LazyLock;

use crate::board::adjacency::{army_neighbors, fleet_edges};
use crate::board::loc::{Loc, ALL_LOCS, LOC_COUNT};
use crate::board::order::{Order, OrderUnit};
use crate::board::province::{
    Coast, Power, Province, Terrain, ALL_POWERS, POWER_COUNT, PROVINCE_COUNT,
};
use crate::board::state::GameState;
use crate::board::unit::UnitType;

use super::adjudicator::OrderOutcome;

/// A resolved adjustment-phase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildResult {
    pub order: Order,
    pub power: Power,
    pub outcome: OrderOutcome,
}

/// Everything the adjustment solver reports for one winter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AdjustmentOutcome {
    pub results: Vec<BuildResult>,
    /// Powers whose disbands had to be chosen by civil disorder.
    pub civil_disorder: Vec<Power>,
}

/// Resolves adjustment orders for all powers.
pub fn resolve_adjustments(orders: &[(Order, Power)], state: &GameState) -> AdjustmentOutcome {
    let mut results = Vec::new();
    let mut civil_disorder = Vec::new();

    for &power in &ALL_POWERS {
        let delta = state.adjustment_delta(power);

        if delta > 0 {
            resolve_power_builds(orders, power, delta as usize, state, &mut results);
        } else if delta < 0 {
            let shortfall =
                resolve_power_disbands(orders, power, (-delta) as usize, state, &mut results);
            if shortfall > 0 {
                let auto = civil_disorder_disbands(power, shortfall, state, &results);
                results.extend(auto);
                civil_disorder.push(power);
            }
        } else {
            // Balanced power: nothing is owed, everything submitted fails.
            for &(order, p) in orders {
                if p == power {
                    results.push(BuildResult { order, power, outcome: OrderOutcome::Failed });
                }
            }
        }
    }

    AdjustmentOutcome { results, civil_disorder }
}

fn resolve_power_builds(
    orders: &[(Order, Power)],
    power: Power,
    allowed: usize,
    state: &GameState,
    results: &mut Vec<BuildResult>,
) {
    let mut spent = 0usize;
    let mut sites: Vec<Province> = Vec::new();

    for &(order, p) in orders {
        if p != power {
            continue;
        }
        match order {
            Order::Build { unit } => {
                let site_taken = sites.contains(&unit.loc.province);
                let ok = spent < allowed && !site_taken && build_site_is_legal(&unit, power, state);
                if ok {
                    sites.push(unit.loc.province);
                    spent += 1;
                }
                results.push(BuildResult {
                    order,
                    power,
                    outcome: if ok { OrderOutcome::Succeeded } else { OrderOutcome::Failed },
                });
            }
            Order::Waive => {
                let ok = spent < allowed;
                if ok {
                    spent += 1;
                }
                results.push(BuildResult {
                    order,
                    power,
                    outcome: if ok { OrderOutcome::Succeeded } else { OrderOutcome::Failed },
                });
            }
            _ => {
                results.push(BuildResult { order, power, outcome: OrderOutcome::Failed });
            }
        }
    }
    // Unspent build rights are forfeited silently.
}

/// Validates a build site: an owned, vacant home center whose terrain fits
/// the unit, with the coast named when the province has split coasts.
pub fn build_site_is_legal(unit: &OrderUnit, power: Power, state: &GameState) -> bool {
    let prov = unit.loc.province;
    if prov.home_power() != Some(power) {
        return false;
    }
    if state.sc_owner[prov as usize] != Some(power) || state.units[prov as usize].is_some() {
        return false;
    }
    match unit.unit_type {
        UnitType::Army => unit.loc.coast == Coast::None && prov.terrain() != Terrain::Water,
        UnitType::Fleet => {
            if prov.terrain() != Terrain::Coastal {
                return false;
            }
            if prov.has_split_coasts() {
                prov.coasts().contains(&unit.loc.coast)
            } else {
                unit.loc.coast == Coast::None
            }
        }
    }
}

/// Processes a power's submitted disbands; returns how many are still owed.
fn resolve_power_disbands(
    orders: &[(Order, Power)],
    power: Power,
    needed: usize,
    state: &GameState,
    results: &mut Vec<BuildResult>,
) -> usize {
    let mut done = 0usize;
    let mut taken: Vec<Province> = Vec::new();

    for &(order, p) in orders {
        if p != power {
            continue;
        }
        let ok = match order {
            Order::Disband { unit } => {
                let prov = unit.loc.province;
                done < needed
                    && !taken.contains(&prov)
                    && matches!(state.units[prov as usize], Some((owner, _)) if owner == power)
            }
            _ => false,
        };
        if ok {
            if let Order::Disband { unit } = order {
                taken.push(unit.loc.province);
            }
            done += 1;
        }
        results.push(BuildResult {
            order,
            power,
            outcome: if ok { OrderOutcome::Succeeded } else { OrderOutcome::Failed },
        });
    }

    needed - done
}

/// Picks `count` auto-disbands for a deficient power.
///
/// Victims sort by descending table distance, fleets before armies, then
/// descending loc index. Units at `-1` locs are passed over; if the
/// eligible pool runs dry the remainder falls back to the same tie-break
/// without the distance key.
fn civil_disorder_disbands(
    power: Power,
    count: usize,
    state: &GameState,
    existing: &[BuildResult],
) -> Vec<BuildResult> {
    let mut taken: Vec<Province> = existing
        .iter()
        .filter(|r| r.power == power && r.outcome == OrderOutcome::Succeeded)
        .filter_map(|r| match r.order {
            Order::Disband { unit } => Some(unit.loc.province),
            _ => None,
        })
        .collect();

    let mut eligible: Vec<(i32, UnitType, Loc)> = Vec::new();
    let mut fallback: Vec<(UnitType, Loc)> = Vec::new();
    for unit in state.units_of(power) {
        if taken.contains(&unit.loc.province) {
            continue;
        }
        let dist = disband_distance(power, unit.unit_type, unit.loc);
        if dist >= 0 {
            eligible.push((dist, unit.unit_type, unit.loc));
        } else {
            fallback.push((unit.unit_type, unit.loc));
        }
    }

    let type_rank = |t: UnitType| if t == UnitType::Fleet { 0 } else { 1 };
    eligible.sort_by(|a, b| {
        b.0.cmp(&a.0)
            .then(type_rank(a.1).cmp(&type_rank(b.1)))
            .then(b.2.index().cmp(&a.2.index()))
    });
    fallback.sort_by(|a, b| {
        type_rank(a.0)
            .cmp(&type_rank(b.0))
            .then(b.1.index().cmp(&a.1.index()))
    });

    let mut out = Vec::new();
    let victims = eligible
        .into_iter()
        .map(|(_, t, l)| (t, l))
        .chain(fallback)
        .take(count);
    for (unit_type, loc) in victims {
        taken.push(loc.province);
        out.push(BuildResult {
            order: Order::Disband { unit: OrderUnit::new(unit_type, loc) },
            power,
            outcome: OrderOutcome::Succeeded,
        });
    }
    out
}

/// Applies adjustment results to the board.
pub fn apply_adjustments(state: &mut GameState, outcome: &AdjustmentOutcome) {
    for r in &outcome.results {
        if r.outcome != OrderOutcome::Succeeded {
            continue;
        }
        match r.order {
            Order::Build { unit } => {
                state.place_unit(r.power, unit.unit_type, unit.loc);
            }
            Order::Disband { unit } => {
                state.remove_unit(unit.loc.province);
            }
            _ => {}
        }
    }
    for &p in &outcome.civil_disorder {
        state.civil_disorder[p as usize] = true;
    }
}

/// Per-power disband distance tables, built once at startup.
struct DisbandTables {
    army: [[i32; LOC_COUNT]; POWER_COUNT],
    fleet: [[i32; LOC_COUNT]; POWER_COUNT],
}

static DISBAND_TABLES: LazyLock<DisbandTables> = LazyLock::new(|| {
    let mut tables = DisbandTables {
        army: [[-1; LOC_COUNT]; POWER_COUNT],
        fleet: [[-1; LOC_COUNT]; POWER_COUNT],
    };
    for &power in &ALL_POWERS {
        tables.army[power as usize] = army_distances(power);
        tables.fleet[power as usize] = fleet_distances(power);
    }
    tables
});

/// Table distance for a unit of the given power at `loc`; -1 = ineligible.
pub fn disband_distance(power: Power, unit_type: UnitType, loc: Loc) -> i32 {
    let tables = &*DISBAND_TABLES;
    match unit_type {
        UnitType::Army => tables.army[power as usize][loc.index()],
        UnitType::Fleet => tables.fleet[power as usize][loc.index()],
    }
}

/// Army distances: BFS over the combined army/fleet province graph from
/// the power's home centers, so convoy-reachable shores stay finite.
/// Water provinces and coasted locs are -1 (no army ever stands there).
fn army_distances(power: Power) -> [i32; LOC_COUNT] {
    let mut by_province = [-1i32; PROVINCE_COUNT];
    let mut queue: Vec<Province> = Vec::new();
    for &home in power.home_centers() {
        by_province[home as usize] = 0;
        queue.push(home);
    }

    let mut head = 0;
    while head < queue.len() {
        let current = queue[head];
        head += 1;
        let d = by_province[current as usize];
        let mut visit = |next: Province| {
            if by_province[next as usize] < 0 {
                by_province[next as usize] = d + 1;
                queue.push(next);
            }
        };
        for &n in army_neighbors(current) {
            visit(n);
        }
        for e in fleet_edges(current) {
            visit(e.to);
        }
    }

    let mut out = [-1i32; LOC_COUNT];
    for loc in ALL_LOCS {
        if loc.coast != Coast::None || loc.province.terrain() == Terrain::Water {
            continue;
        }
        out[loc.index()] = by_province[loc.province as usize];
    }
    out
}

/// Fleet distances: BFS over fleet edges on coast-resolved locs from the
/// power's coastal home centers. Inland provinces and the bare parents of
/// split-coast provinces are -1 (no fleet ever stands there).
fn fleet_distances(power: Power) -> [i32; LOC_COUNT] {
    let mut out = [-1i32; LOC_COUNT];
    let mut queue: Vec<Loc> = Vec::new();

    for &home in power.home_centers() {
        if home.terrain() != Terrain::Coastal {
            continue;
        }
        if home.has_split_coasts() {
            for &c in home.coasts() {
                let loc = Loc::with_coast(home, c);
                out[loc.index()] = 0;
                queue.push(loc);
            }
        } else {
            let loc = Loc::new(home);
            out[loc.index()] = 0;
            queue.push(loc);
        }
    }

    let mut head = 0;
    while head < queue.len() {
        let current = queue[head];
        head += 1;
        let d = out[current.index()];
        for e in fleet_edges(current.province) {
            if e.from_coast != Coast::None && e.from_coast != current.coast {
                continue;
            }
            let next = Loc::with_coast(e.to, e.to_coast);
            if out[next.index()] < 0 {
                out[next.index()] = d + 1;
                queue.push(next);
            }
        }
    }
    out
}
