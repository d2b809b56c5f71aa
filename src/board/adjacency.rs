//! Adjacency tables for the standard map.
//!
//! Each province carries its army-passable neighbor list and its fleet
//! edge list. A fleet edge names the departure coast (None on single-coast
//! provinces), the destination province, and the arrival coast. The tables
//! are symmetric at the edge level and are process-wide read-only data.

use super::loc::Loc;
use super::province::{Coast, Province, PROVINCE_COUNT};
use super::unit::UnitType;

/// A fleet-passable edge out of a province.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FleetEdge {
    pub from_coast: Coast,
    pub to: Province,
    pub to_coast: Coast,
}

/// Army and fleet adjacency for one province.
pub struct Neighbors {
    pub army: &'static [Province],
    pub fleet: &'static [FleetEdge],
}

const fn edge(from_coast: Coast, to: Province, to_coast: Coast) -> FleetEdge {
    FleetEdge { from_coast, to, to_coast }
}

const N: Coast = Coast::None;
const NC: Coast = Coast::North;
const SC: Coast = Coast::South;
const EC: Coast = Coast::East;

use Province::*;

/// Per-province adjacency, indexed by `Province as usize`.
pub static NEIGHBORS: [Neighbors; PROVINCE_COUNT] = [
    // Adr
    Neighbors { army: &[], fleet: &[edge(N, Alb, N), edge(N, Apu, N), edge(N, Ion, N), edge(N, Tri, N), edge(N, Ven, N)] },
    // Aeg
    Neighbors { army: &[], fleet: &[edge(N, Bul, SC), edge(N, Con, N), edge(N, Eas, N), edge(N, Gre, N), edge(N, Ion, N), edge(N, Smy, N)] },
    // Alb
    Neighbors { army: &[Gre, Ser, Tri], fleet: &[edge(N, Adr, N), edge(N, Gre, N), edge(N, Ion, N), edge(N, Tri, N)] },
    // Ank
    Neighbors { army: &[Arm, Con, Smy], fleet: &[edge(N, Arm, N), edge(N, Bla, N), edge(N, Con, N)] },
    // Apu
    Neighbors { army: &[Nap, Rom, Ven], fleet: &[edge(N, Adr, N), edge(N, Ion, N), edge(N, Nap, N), edge(N, Ven, N)] },
    // Arm
    Neighbors { army: &[Ank, Sev, Smy, Syr], fleet: &[edge(N, Ank, N), edge(N, Bla, N), edge(N, Sev, N)] },
    // Bal
    Neighbors { army: &[], fleet: &[edge(N, Ber, N), edge(N, Bot, N), edge(N, Den, N), edge(N, Kie, N), edge(N, Lvn, N), edge(N, Pru, N), edge(N, Swe, N)] },
    // Bar
    Neighbors { army: &[], fleet: &[edge(N, Nrg, N), edge(N, Nwy, N), edge(N, Stp, NC)] },
    // Bel
    Neighbors { army: &[Bur, Hol, Pic, Ruh], fleet: &[edge(N, Eng, N), edge(N, Hol, N), edge(N, Nth, N), edge(N, Pic, N)] },
    // Ber
    Neighbors { army: &[Kie, Mun, Pru, Sil], fleet: &[edge(N, Bal, N), edge(N, Kie, N), edge(N, Pru, N)] },
    // Bla
    Neighbors { army: &[], fleet: &[edge(N, Ank, N), edge(N, Arm, N), edge(N, Bul, EC), edge(N, Con, N), edge(N, Rum, N), edge(N, Sev, N)] },
    // Boh
    Neighbors { army: &[Gal, Mun, Sil, Tyr, Vie], fleet: &[] },
    // Bot
    Neighbors { army: &[], fleet: &[edge(N, Bal, N), edge(N, Fin, N), edge(N, Lvn, N), edge(N, Stp, SC), edge(N, Swe, N)] },
    // Bre
    Neighbors { army: &[Gas, Par, Pic], fleet: &[edge(N, Eng, N), edge(N, Gas, N), edge(N, Mao, N), edge(N, Pic, N)] },
    // Bud
    Neighbors { army: &[Gal, Rum, Ser, Tri, Vie], fleet: &[] },
    // Bul
    Neighbors { army: &[Con, Gre, Rum, Ser], fleet: &[edge(SC, Aeg, N), edge(EC, Bla, N), edge(EC, Con, N), edge(SC, Con, N), edge(SC, Gre, N), edge(EC, Rum, N)] },
    // Bur
    Neighbors { army: &[Bel, Gas, Mar, Mun, Par, Pic, Ruh], fleet: &[] },
    // Cly
    Neighbors { army: &[Edi, Lvp], fleet: &[edge(N, Edi, N), edge(N, Lvp, N), edge(N, Nao, N), edge(N, Nrg, N)] },
    // Con
    Neighbors { army: &[Ank, Bul, Smy], fleet: &[edge(N, Aeg, N), edge(N, Ank, N), edge(N, Bla, N), edge(N, Bul, EC), edge(N, Bul, SC), edge(N, Smy, N)] },
    // Den
    Neighbors { army: &[Kie, Swe], fleet: &[edge(N, Bal, N), edge(N, Hel, N), edge(N, Kie, N), edge(N, Nth, N), edge(N, Ska, N), edge(N, Swe, N)] },
    // Eas
    Neighbors { army: &[], fleet: &[edge(N, Aeg, N), edge(N, Ion, N), edge(N, Smy, N), edge(N, Syr, N)] },
    // Edi
    Neighbors { army: &[Cly, Lvp, Yor], fleet: &[edge(N, Cly, N), edge(N, Nrg, N), edge(N, Nth, N), edge(N, Yor, N)] },
    // Eng
    Neighbors { army: &[], fleet: &[edge(N, Bel, N), edge(N, Bre, N), edge(N, Iri, N), edge(N, Lon, N), edge(N, Mao, N), edge(N, Nth, N), edge(N, Pic, N), edge(N, Wal, N)] },
    // Fin
    Neighbors { army: &[Nwy, Stp, Swe], fleet: &[edge(N, Bot, N), edge(N, Stp, SC), edge(N, Swe, N)] },
    // Gal
    Neighbors { army: &[Boh, Bud, Rum, Sil, Ukr, Vie, War], fleet: &[] },
    // Gas
    Neighbors { army: &[Bre, Bur, Mar, Par, Spa], fleet: &[edge(N, Bre, N), edge(N, Mao, N), edge(N, Spa, NC)] },
    // Gol
    Neighbors { army: &[], fleet: &[edge(N, Mar, N), edge(N, Pie, N), edge(N, Spa, SC), edge(N, Tus, N), edge(N, Tys, N), edge(N, Wes, N)] },
    // Gre
    Neighbors { army: &[Alb, Bul, Ser], fleet: &[edge(N, Aeg, N), edge(N, Alb, N), edge(N, Bul, SC), edge(N, Ion, N)] },
    // Hel
    Neighbors { army: &[], fleet: &[edge(N, Den, N), edge(N, Hol, N), edge(N, Kie, N), edge(N, Nth, N)] },
    // Hol
    Neighbors { army: &[Bel, Ruh], fleet: &[edge(N, Bel, N), edge(N, Hel, N), edge(N, Nth, N)] },
    // Ion
    Neighbors { army: &[], fleet: &[edge(N, Adr, N), edge(N, Aeg, N), edge(N, Alb, N), edge(N, Apu, N), edge(N, Eas, N), edge(N, Gre, N), edge(N, Nap, N), edge(N, Tun, N), edge(N, Tys, N)] },
    // Iri
    Neighbors { army: &[], fleet: &[edge(N, Eng, N), edge(N, Lvp, N), edge(N, Mao, N), edge(N, Nao, N), edge(N, Wal, N)] },
    // Kie
    Neighbors { army: &[Ber, Den, Mun, Ruh], fleet: &[edge(N, Bal, N), edge(N, Ber, N), edge(N, Den, N), edge(N, Hel, N)] },
    // Lon
    Neighbors { army: &[Wal, Yor], fleet: &[edge(N, Eng, N), edge(N, Nth, N), edge(N, Wal, N), edge(N, Yor, N)] },
    // Lvn
    Neighbors { army: &[Mos, Pru, Stp, War], fleet: &[edge(N, Bal, N), edge(N, Bot, N), edge(N, Pru, N), edge(N, Stp, SC)] },
    // Lvp
    Neighbors { army: &[Cly, Edi, Wal, Yor], fleet: &[edge(N, Cly, N), edge(N, Iri, N), edge(N, Nao, N), edge(N, Wal, N)] },
    // Mao
    Neighbors { army: &[], fleet: &[edge(N, Bre, N), edge(N, Eng, N), edge(N, Gas, N), edge(N, Iri, N), edge(N, Naf, N), edge(N, Nao, N), edge(N, Por, N), edge(N, Spa, NC), edge(N, Spa, SC), edge(N, Wes, N)] },
    // Mar
    Neighbors { army: &[Bur, Gas, Pie, Spa], fleet: &[edge(N, Gol, N), edge(N, Pie, N), edge(N, Spa, SC)] },
    // Mos
    Neighbors { army: &[Lvn, Sev, Stp, Ukr, War], fleet: &[] },
    // Mun
    Neighbors { army: &[Ber, Boh, Bur, Kie, Ruh, Sil, Tyr], fleet: &[] },
    // Naf
    Neighbors { army: &[Tun], fleet: &[edge(N, Mao, N), edge(N, Tun, N), edge(N, Wes, N)] },
    // Nao
    Neighbors { army: &[], fleet: &[edge(N, Cly, N), edge(N, Iri, N), edge(N, Lvp, N), edge(N, Mao, N), edge(N, Nrg, N)] },
    // Nap
    Neighbors { army: &[Apu, Rom], fleet: &[edge(N, Apu, N), edge(N, Ion, N), edge(N, Rom, N), edge(N, Tys, N)] },
    // Nrg
    Neighbors { army: &[], fleet: &[edge(N, Bar, N), edge(N, Cly, N), edge(N, Edi, N), edge(N, Nao, N), edge(N, Nth, N), edge(N, Nwy, N)] },
    // Nth
    Neighbors { army: &[], fleet: &[edge(N, Bel, N), edge(N, Den, N), edge(N, Edi, N), edge(N, Eng, N), edge(N, Hel, N), edge(N, Hol, N), edge(N, Lon, N), edge(N, Nrg, N), edge(N, Nwy, N), edge(N, Ska, N), edge(N, Yor, N)] },
    // Nwy
    Neighbors { army: &[Fin, Stp, Swe], fleet: &[edge(N, Bar, N), edge(N, Nrg, N), edge(N, Nth, N), edge(N, Ska, N), edge(N, Stp, NC), edge(N, Swe, N)] },
    // Par
    Neighbors { army: &[Bre, Bur, Gas, Pic], fleet: &[] },
    // Pic
    Neighbors { army: &[Bel, Bre, Bur, Par], fleet: &[edge(N, Bel, N), edge(N, Bre, N), edge(N, Eng, N)] },
    // Pie
    Neighbors { army: &[Mar, Tus, Tyr, Ven], fleet: &[edge(N, Gol, N), edge(N, Mar, N), edge(N, Tus, N)] },
    // Por
    Neighbors { army: &[Spa], fleet: &[edge(N, Mao, N), edge(N, Spa, NC), edge(N, Spa, SC)] },
    // Pru
    Neighbors { army: &[Ber, Lvn, Sil, War], fleet: &[edge(N, Bal, N), edge(N, Ber, N), edge(N, Lvn, N)] },
    // Rom
    Neighbors { army: &[Apu, Nap, Tus, Ven], fleet: &[edge(N, Nap, N), edge(N, Tus, N), edge(N, Tys, N)] },
    // Ruh
    Neighbors { army: &[Bel, Bur, Hol, Kie, Mun], fleet: &[] },
    // Rum
    Neighbors { army: &[Bud, Bul, Gal, Ser, Sev, Ukr], fleet: &[edge(N, Bla, N), edge(N, Bul, EC), edge(N, Sev, N)] },
    // Ser
    Neighbors { army: &[Alb, Bud, Bul, Gre, Rum, Tri], fleet: &[] },
    // Sev
    Neighbors { army: &[Arm, Mos, Rum, Ukr], fleet: &[edge(N, Arm, N), edge(N, Bla, N), edge(N, Rum, N)] },
    // Sil
    Neighbors { army: &[Ber, Boh, Gal, Mun, Pru, War], fleet: &[] },
    // Ska
    Neighbors { army: &[], fleet: &[edge(N, Den, N), edge(N, Nth, N), edge(N, Nwy, N), edge(N, Swe, N)] },
    // Smy
    Neighbors { army: &[Ank, Arm, Con, Syr], fleet: &[edge(N, Aeg, N), edge(N, Con, N), edge(N, Eas, N), edge(N, Syr, N)] },
    // Spa
    Neighbors { army: &[Gas, Mar, Por], fleet: &[edge(NC, Gas, N), edge(SC, Gol, N), edge(NC, Mao, N), edge(SC, Mao, N), edge(SC, Mar, N), edge(NC, Por, N), edge(SC, Por, N), edge(SC, Wes, N)] },
    // Stp
    Neighbors { army: &[Fin, Lvn, Mos, Nwy], fleet: &[edge(NC, Bar, N), edge(SC, Bot, N), edge(SC, Fin, N), edge(SC, Lvn, N), edge(NC, Nwy, N)] },
    // Swe
    Neighbors { army: &[Den, Fin, Nwy], fleet: &[edge(N, Bal, N), edge(N, Bot, N), edge(N, Den, N), edge(N, Fin, N), edge(N, Nwy, N), edge(N, Ska, N)] },
    // Syr
    Neighbors { army: &[Arm, Smy], fleet: &[edge(N, Eas, N), edge(N, Smy, N)] },
    // Tri
    Neighbors { army: &[Alb, Bud, Ser, Tyr, Ven, Vie], fleet: &[edge(N, Adr, N), edge(N, Alb, N), edge(N, Ven, N)] },
    // Tun
    Neighbors { army: &[Naf], fleet: &[edge(N, Ion, N), edge(N, Naf, N), edge(N, Tys, N), edge(N, Wes, N)] },
    // Tus
    Neighbors { army: &[Pie, Rom, Ven], fleet: &[edge(N, Gol, N), edge(N, Pie, N), edge(N, Rom, N), edge(N, Tys, N)] },
    // Tyr
    Neighbors { army: &[Boh, Mun, Pie, Tri, Ven, Vie], fleet: &[] },
    // Tys
    Neighbors { army: &[], fleet: &[edge(N, Gol, N), edge(N, Ion, N), edge(N, Nap, N), edge(N, Rom, N), edge(N, Tun, N), edge(N, Tus, N), edge(N, Wes, N)] },
    // Ukr
    Neighbors { army: &[Gal, Mos, Rum, Sev, War], fleet: &[] },
    // Ven
    Neighbors { army: &[Apu, Pie, Rom, Tri, Tus, Tyr], fleet: &[edge(N, Adr, N), edge(N, Apu, N), edge(N, Tri, N)] },
    // Vie
    Neighbors { army: &[Boh, Bud, Gal, Tri, Tyr], fleet: &[] },
    // Wal
    Neighbors { army: &[Lon, Lvp, Yor], fleet: &[edge(N, Eng, N), edge(N, Iri, N), edge(N, Lon, N), edge(N, Lvp, N)] },
    // War
    Neighbors { army: &[Gal, Lvn, Mos, Pru, Sil, Ukr], fleet: &[] },
    // Wes
    Neighbors { army: &[], fleet: &[edge(N, Gol, N), edge(N, Mao, N), edge(N, Naf, N), edge(N, Spa, SC), edge(N, Tun, N), edge(N, Tys, N)] },
    // Yor
    Neighbors { army: &[Edi, Lon, Lvp, Wal], fleet: &[edge(N, Edi, N), edge(N, Lon, N), edge(N, Nth, N)] },
];

/// Army-passable neighbors of a province.
pub fn army_neighbors(prov: Province) -> &'static [Province] {
    NEIGHBORS[prov as usize].army
}

/// Fleet edges out of a province.
pub fn fleet_edges(prov: Province) -> &'static [FleetEdge] {
    NEIGHBORS[prov as usize].fleet
}

/// Returns true if a unit of the given type can move from `from` to `to`
/// in a single step. Coasts are honored on both ends; a fleet move into a
/// split-coast province must name its arrival coast.
pub fn can_move(unit_type: UnitType, from: Loc, to: Loc) -> bool {
    match unit_type {
        UnitType::Army => {
            to.coast == Coast::None && army_neighbors(from.province).contains(&to.province)
        }
        UnitType::Fleet => {
            if to.coast == Coast::None && to.province.has_split_coasts() {
                return false;
            }
            fleet_edges(from.province).iter().any(|e| {
                e.to == to.province
                    && (e.from_coast == Coast::None || e.from_coast == from.coast)
                    && (to.coast == Coast::None || e.to_coast == to.coast)
            })
        }
    }
}

/// All arrival coasts a fleet at `from` can reach in `dst`.
pub fn fleet_coasts_to(from: Loc, dst: Province) -> Vec<Coast> {
    let mut coasts = Vec::new();
    for e in fleet_edges(from.province) {
        if e.to != dst {
            continue;
        }
        if e.from_coast != Coast::None && e.from_coast != from.coast {
            continue;
        }
        if !coasts.contains(&e.to_coast) {
            coasts.push(e.to_coast);
        }
    }
    coasts
}

/// All locs a unit of the given type at `from` can move to in one step.
pub fn reachable_locs(unit_type: UnitType, from: Loc) -> Vec<Loc> {
    let mut out = Vec::new();
    match unit_type {
        UnitType::Army => {
            for p in army_neighbors(from.province) {
                out.push(Loc::new(*p));
            }
        }
        UnitType::Fleet => {
            for e in fleet_edges(from.province) {
                if e.from_coast != Coast::None && e.from_coast != from.coast {
                    continue;
                }
                let loc = Loc::with_coast(e.to, e.to_coast);
                if !out.contains(&loc) {
                    out.push(loc);
                }
            }
        }
    }
    out
}
