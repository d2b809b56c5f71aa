//! Movement-phase order enumeration.
//!
//! Lists every legal order the unit at a province could submit: hold,
//! moves (including convoy routes over fleets currently at sea), supports,
//! and convoys for fleets in open water.

use crate::board::adjacency::{fleet_edges, reachable_locs};
use crate::board::loc::Loc;
use crate::board::order::{Order, OrderUnit};
use crate::board::province::{Province, Terrain, ALL_PROVINCES};
use crate::board::state::GameState;
use crate::board::unit::UnitType;

/// Provinces an army could reach by convoy over the fleets currently at
/// sea. Any fleet in a water province is a potential link; whether its
/// owner cooperates is the players' business.
pub fn convoy_destinations(army_prov: Province, state: &GameState) -> Vec<Province> {
    let mut visited = [false; crate::board::province::PROVINCE_COUNT];
    let mut queue: Vec<Province> = Vec::new();
    let mut dests = Vec::new();

    let sea_fleet = |p: Province| {
        p.terrain() == Terrain::Water
            && matches!(state.units[p as usize], Some((_, UnitType::Fleet)))
    };

    for e in fleet_edges(army_prov) {
        if sea_fleet(e.to) && !visited[e.to as usize] {
            visited[e.to as usize] = true;
            queue.push(e.to);
        }
    }

    while let Some(current) = queue.pop() {
        for e in fleet_edges(current) {
            let p = e.to;
            if p.terrain() == Terrain::Water {
                if sea_fleet(p) && !visited[p as usize] {
                    visited[p as usize] = true;
                    queue.push(p);
                }
            } else if p != army_prov && !dests.contains(&p) {
                dests.push(p);
            }
        }
    }
    dests.sort();
    dests
}

/// All legal movement-phase orders for the unit at `province`.
/// Empty when no unit is there.
pub fn legal_orders(province: Province, state: &GameState) -> Vec<Order> {
    let (_, unit_type) = match state.units[province as usize] {
        Some(pu) => pu,
        None => return Vec::new(),
    };
    let loc = state.unit_loc_at(province).expect("occupied province has a loc");
    let unit = OrderUnit::new(unit_type, loc);

    let mut orders = vec![Order::Hold { unit }];

    // Direct moves.
    let direct = reachable_locs(unit_type, loc);
    for dest in &direct {
        orders.push(Order::Move { unit, dest: *dest, via_convoy: false });
    }

    // Convoyed moves for armies on the coast.
    if unit_type == UnitType::Army && province.terrain() == Terrain::Coastal {
        for dest in convoy_destinations(province, state) {
            orders.push(Order::Move { unit, dest: Loc::new(dest), via_convoy: true });
        }
    }

    // Supports for every other unit on the board.
    let reachable: Vec<Province> = direct.iter().map(|l| l.province).collect();
    for other_prov in ALL_PROVINCES {
        if other_prov == province {
            continue;
        }
        let (_, other_type) = match state.units[other_prov as usize] {
            Some(pu) => pu,
            None => continue,
        };
        let other_loc = state.unit_loc_at(other_prov).expect("occupied province has a loc");
        let target = OrderUnit::new(other_type, other_loc);

        if reachable.contains(&other_prov) {
            orders.push(Order::SupportHold { unit, target });
        }

        // Support the other unit into any province both can reach,
        // convoy routes included for armies.
        let mut other_dests: Vec<Province> = reachable_locs(other_type, other_loc)
            .into_iter()
            .map(|l| l.province)
            .collect();
        if other_type == UnitType::Army && other_prov.terrain() == Terrain::Coastal {
            for p in convoy_destinations(other_prov, state) {
                if !other_dests.contains(&p) {
                    other_dests.push(p);
                }
            }
        }
        for dest in other_dests {
            if dest != province && reachable.contains(&dest) {
                orders.push(Order::SupportMove { unit, target, dest: Loc::new(dest) });
            }
        }
    }

    // Convoys: a fleet in open water can carry any coastal army to any
    // convoy destination of that army.
    if unit_type == UnitType::Fleet && province.terrain() == Terrain::Water {
        for army_prov in ALL_PROVINCES {
            if !matches!(state.units[army_prov as usize], Some((_, UnitType::Army))) {
                continue;
            }
            if army_prov.terrain() != Terrain::Coastal {
                continue;
            }
            let army = OrderUnit::new(UnitType::Army, Loc::new(army_prov));
            for dest in convoy_destinations(army_prov, state) {
                orders.push(Order::Convoy { unit, army, dest: Loc::new(dest) });
            }
        }
    }

    orders
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::phase::Phase;
    use crate::board::province::{Power, Province::*};

    fn movement_state() -> GameState {
        GameState::empty(Phase::initial())
    }

    #[test]
    fn empty_province_has_no_orders() {
        let state = movement_state();
        assert!(legal_orders(Vie, &state).is_empty());
    }

    #[test]
    fn lone_army_holds_and_moves() {
        let mut state = movement_state();
        state.place_unit(Power::France, UnitType::Army, Loc::new(Par));
        let orders = legal_orders(Par, &state);
        // Hold + moves to BRE, BUR, GAS, PIC.
        assert_eq!(orders.len(), 5);
        assert!(matches!(orders[0], Order::Hold { .. }));
    }

    #[test]
    fn supports_require_shared_reach() {
        let mut state = movement_state();
        state.place_unit(Power::France, UnitType::Army, Loc::new(Par));
        state.place_unit(Power::France, UnitType::Army, Loc::new(Bur));
        let orders = legal_orders(Par, &state);
        let bur = Loc::new(Bur);
        assert!(orders
            .iter()
            .any(|o| matches!(o, Order::SupportHold { target, .. } if target.loc == bur)));
        // Both reach Gascony and Picardy.
        for dest in [Gas, Pic] {
            assert!(orders.iter().any(
                |o| matches!(o, Order::SupportMove { dest: d, .. } if d.province == dest)
            ));
        }
        // Burgundy cannot be supported into itself or into Paris.
        assert!(!orders
            .iter()
            .any(|o| matches!(o, Order::SupportMove { dest: d, .. } if d.province == Par)));
    }

    #[test]
    fn convoyed_destinations_need_a_fleet_chain() {
        let mut state = movement_state();
        state.place_unit(Power::England, UnitType::Army, Loc::new(Lon));
        assert!(convoy_destinations(Lon, &state).is_empty());

        state.place_unit(Power::England, UnitType::Fleet, Loc::new(Nth));
        let dests = convoy_destinations(Lon, &state);
        for p in [Bel, Den, Edi, Hol, Nwy, Yor] {
            assert!(dests.contains(&p), "missing {:?}", p);
        }
        assert!(!dests.contains(&Lon));

        let orders = legal_orders(Lon, &state);
        assert!(orders.iter().any(|o| matches!(
            o,
            Order::Move { dest, via_convoy: true, .. } if dest.province == Nwy
        )));
    }

    #[test]
    fn chained_fleets_extend_convoy_reach() {
        let mut state = movement_state();
        state.place_unit(Power::England, UnitType::Army, Loc::new(Lon));
        state.place_unit(Power::England, UnitType::Fleet, Loc::new(Nth));
        state.place_unit(Power::England, UnitType::Fleet, Loc::new(Nrg));
        let dests = convoy_destinations(Lon, &state);
        // NRG opens up Clyde via the second fleet.
        assert!(dests.contains(&Cly));
    }

    #[test]
    fn sea_fleet_offers_convoys() {
        let mut state = movement_state();
        state.place_unit(Power::England, UnitType::Army, Loc::new(Lon));
        state.place_unit(Power::England, UnitType::Fleet, Loc::new(Nth));
        let orders = legal_orders(Nth, &state);
        assert!(orders.iter().any(|o| matches!(
            o,
            Order::Convoy { army, dest, .. }
                if army.loc.province == Lon && dest.province == Nwy
        )));
    }

    #[test]
    fn coastal_fleet_cannot_convoy() {
        let mut state = movement_state();
        state.place_unit(Power::England, UnitType::Army, Loc::new(Wal));
        state.place_unit(Power::England, UnitType::Fleet, Loc::new(Lon));
        let orders = legal_orders(Lon, &state);
        assert!(!orders.iter().any(|o| matches!(o, Order::Convoy { .. })));
    }

    #[test]
    fn fleet_moves_carry_coasts() {
        let mut state = movement_state();
        state.place_unit(Power::France, UnitType::Fleet, Loc::new(Mao));
        let orders = legal_orders(Mao, &state);
        let coasted: Vec<&Order> = orders
            .iter()
            .filter(|o| matches!(o, Order::Move { dest, .. } if dest.province == Spa))
            .collect();
        assert_eq!(coasted.len(), 2);
    }
}
