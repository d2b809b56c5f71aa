//! Adjudicator cases drawn from the Diplomacy Adjudicator Test Cases,
//! exercised directly against the movement resolver.

use entente::board::loc::Loc;
use entente::board::order::{Order, OrderUnit};
use entente::board::phase::Phase;
use entente::board::province::Province::{self, *};
use entente::board::province::{Coast, Power};
use entente::board::state::GameState;
use entente::board::unit::UnitType;
use entente::resolve::{resolve_movement, MovementOutcome, OrderOutcome};

fn empty_state() -> GameState {
    GameState::empty(Phase::initial())
}

fn army(p: Province) -> OrderUnit {
    OrderUnit::new(UnitType::Army, Loc::new(p))
}

fn fleet(p: Province) -> OrderUnit {
    OrderUnit::new(UnitType::Fleet, Loc::new(p))
}

fn fleet_at(p: Province, c: Coast) -> OrderUnit {
    OrderUnit::new(UnitType::Fleet, Loc::with_coast(p, c))
}

fn hold(u: OrderUnit) -> Order {
    Order::Hold { unit: u }
}

fn mv(u: OrderUnit, dest: Province) -> Order {
    Order::Move { unit: u, dest: Loc::new(dest), via_convoy: false }
}

fn mv_coast(u: OrderUnit, dest: Province, coast: Coast) -> Order {
    Order::Move { unit: u, dest: Loc::with_coast(dest, coast), via_convoy: false }
}

fn mv_via(u: OrderUnit, dest: Province) -> Order {
    Order::Move { unit: u, dest: Loc::new(dest), via_convoy: true }
}

fn sup_hold(u: OrderUnit, target: OrderUnit) -> Order {
    Order::SupportHold { unit: u, target }
}

fn sup_move(u: OrderUnit, target: OrderUnit, dest: Province) -> Order {
    Order::SupportMove { unit: u, target, dest: Loc::new(dest) }
}

fn convoy(f: OrderUnit, a: OrderUnit, dest: Province) -> Order {
    Order::Convoy { unit: f, army: a, dest: Loc::new(dest) }
}

fn outcome_of(out: &MovementOutcome, p: Province) -> OrderOutcome {
    out.resolutions
        .iter()
        .find(|r| r.order.unit_loc().map(|l| l.province) == Some(p))
        .unwrap_or_else(|| panic!("no resolution for {:?}", p))
        .outcome
}

/// Places each order's unit on the board, then resolves.
fn run(orders: Vec<(Order, Power)>) -> MovementOutcome {
    let mut state = empty_state();
    for (order, power) in &orders {
        if let Some(unit) = order.unit() {
            assert!(
                state.place_unit(*power, unit.unit_type, unit.loc),
                "two orders place a unit at {:?}",
                unit.loc
            );
        }
    }
    resolve_movement(&orders, &state)
}

// 6.A.5: a power cannot dislodge its own unit, even with support.

#[test]
fn no_self_dislodgement_with_support() {
    let out = run(vec![
        (hold(army(Ven)), Power::Italy),
        (mv(army(Tri), Ven), Power::Italy),
        (sup_move(army(Tyr), army(Tri), Ven), Power::Italy),
    ]);
    assert_eq!(outcome_of(&out, Tri), OrderOutcome::Bounced);
    assert!(out.dislodged.is_empty());
}

// 6.A.6: a unit ordered to support may still be attacked normally.

#[test]
fn supporting_unit_can_be_dislodged() {
    let out = run(vec![
        (sup_hold(army(Ser), army(Gre)), Power::Austria),
        (hold(army(Gre)), Power::Austria),
        (mv(army(Bud), Ser), Power::Russia),
        (sup_move(army(Rum), army(Bud), Ser), Power::Russia),
    ]);
    assert_eq!(outcome_of(&out, Ser), OrderOutcome::Dislodged);
    assert_eq!(out.dislodged[0].attacker_from, Bud);
}

// 6.B.4 flavor: a bounce on a split-coast province is a bounce on the
// whole province, whichever coasts were named.

#[test]
fn split_coast_contest_is_province_level() {
    let out = run(vec![
        (mv_coast(fleet(Mao), Spa, Coast::North), Power::France),
        (mv_coast(fleet(Gol), Spa, Coast::South), Power::Italy),
    ]);
    assert_eq!(outcome_of(&out, Mao), OrderOutcome::Bounced);
    assert_eq!(outcome_of(&out, Gol), OrderOutcome::Bounced);
    assert_eq!(out.contested, vec![Spa]);
}

// 6.B.6 flavor: coast-specific departure gates fleet movement.

#[test]
fn fleet_moves_from_named_coast() {
    let out = run(vec![(mv(fleet_at(Stp, Coast::South), Bot), Power::Russia)]);
    assert_eq!(outcome_of(&out, Stp), OrderOutcome::Succeeded);
}

// 6.C.1/6.C.2: circular movement, optionally supported.

#[test]
fn three_unit_rotation_succeeds() {
    let out = run(vec![
        (mv(army(Boh), Mun), Power::Germany),
        (mv(army(Mun), Sil), Power::Germany),
        (mv(army(Sil), Boh), Power::Germany),
        (sup_move(army(Tyr), army(Boh), Mun), Power::Germany),
    ]);
    for p in [Boh, Mun, Sil] {
        assert_eq!(outcome_of(&out, p), OrderOutcome::Succeeded);
    }
}

// 6.C.3: a supported outside attack breaks the whole rotation.

#[test]
fn disrupted_rotation_all_bounce() {
    let out = run(vec![
        (mv(army(Boh), Mun), Power::Germany),
        (mv(army(Mun), Sil), Power::Germany),
        (mv(army(Sil), Boh), Power::Germany),
        (mv(army(Tyr), Boh), Power::Austria),
        (sup_move(army(Vie), army(Tyr), Boh), Power::Austria),
    ]);
    assert_eq!(outcome_of(&out, Tyr), OrderOutcome::Succeeded);
    assert_eq!(outcome_of(&out, Boh), OrderOutcome::Dislodged);
    assert_eq!(outcome_of(&out, Mun), OrderOutcome::Bounced);
    assert_eq!(outcome_of(&out, Sil), OrderOutcome::Bounced);
}

// 6.D.1/6.D.2: support holds off an attack until the support is cut.

#[test]
fn supported_hold_and_its_cut() {
    let supported = vec![
        (hold(army(Bud)), Power::Austria),
        (sup_hold(army(Ser), army(Bud)), Power::Austria),
        (mv(army(Rum), Bud), Power::Russia),
    ];
    let out = run(supported);
    assert_eq!(outcome_of(&out, Rum), OrderOutcome::Bounced);

    let with_cut = vec![
        (hold(army(Bud)), Power::Austria),
        (sup_hold(army(Ser), army(Bud)), Power::Austria),
        (mv(army(Rum), Bud), Power::Russia),
        (mv(army(Bul), Ser), Power::Russia),
    ];
    let out = run(with_cut);
    assert_eq!(outcome_of(&out, Ser), OrderOutcome::Cut);
    // Still one against one at Budapest.
    assert_eq!(outcome_of(&out, Rum), OrderOutcome::Bounced);
}

// 6.D.7: a support cannot be cut from the province it is directed at.

#[test]
fn support_uncut_by_attack_from_its_target() {
    let out = run(vec![
        (sup_move(army(Mun), army(Sil), Boh), Power::Germany),
        (mv(army(Sil), Boh), Power::Germany),
        (mv(army(Boh), Mun), Power::Austria),
    ]);
    assert_eq!(outcome_of(&out, Mun), OrderOutcome::Succeeded);
    assert_eq!(outcome_of(&out, Sil), OrderOutcome::Succeeded);
    assert_eq!(outcome_of(&out, Boh), OrderOutcome::Dislodged);
}

// 6.D.12 flavor: supports of a foreign attack on your own unit don't count.

#[test]
fn foreign_support_against_own_unit_is_void() {
    let out = run(vec![
        (mv(army(Pie), Tus), Power::France),
        (sup_move(army(Ven), army(Pie), Tus), Power::Italy),
        (hold(army(Tus)), Power::Italy),
    ]);
    assert_eq!(outcome_of(&out, Pie), OrderOutcome::Bounced);
    assert!(out.dislodged.is_empty());
}

// 6.E.2/6.E.3: head-to-head battles.

#[test]
fn head_to_head_with_support_wins() {
    let out = run(vec![
        (mv(army(Tyr), Ven), Power::Austria),
        (sup_move(army(Tri), army(Tyr), Ven), Power::Austria),
        (mv(army(Ven), Tyr), Power::Italy),
    ]);
    assert_eq!(outcome_of(&out, Tyr), OrderOutcome::Succeeded);
    assert_eq!(outcome_of(&out, Ven), OrderOutcome::Dislodged);
    assert_eq!(out.dislodged[0].attacker_from, Tyr);
}

#[test]
fn balanced_head_to_head_both_stay() {
    let out = run(vec![
        (mv(army(Tyr), Ven), Power::Austria),
        (sup_move(army(Tri), army(Tyr), Ven), Power::Austria),
        (mv(army(Ven), Tyr), Power::Italy),
        (sup_move(army(Pie), army(Ven), Tyr), Power::Italy),
    ]);
    assert_eq!(outcome_of(&out, Tyr), OrderOutcome::Bounced);
    assert_eq!(outcome_of(&out, Ven), OrderOutcome::Bounced);
    assert!(out.dislodged.is_empty());
}

// 6.E.6: the beleaguered garrison survives two balanced besiegers.

#[test]
fn beleaguered_garrison_survives() {
    let out = run(vec![
        (hold(army(Mun)), Power::Germany),
        (mv(army(Bur), Mun), Power::France),
        (sup_move(army(Ruh), army(Bur), Mun), Power::France),
        (mv(army(Tyr), Mun), Power::Italy),
        (sup_move(army(Boh), army(Tyr), Mun), Power::Italy),
    ]);
    assert_eq!(outcome_of(&out, Mun), OrderOutcome::Succeeded);
    assert_eq!(outcome_of(&out, Bur), OrderOutcome::Bounced);
    assert_eq!(outcome_of(&out, Tyr), OrderOutcome::Bounced);
    assert!(out.dislodged.is_empty());
}

// 6.F.2/6.F.3: convoy disruption depends on the convoying fleet's fate.

#[test]
fn unattacked_convoy_delivers() {
    let out = run(vec![
        (mv_via(army(Lon), Nwy), Power::England),
        (convoy(fleet(Nth), army(Lon), Nwy), Power::England),
    ]);
    assert_eq!(outcome_of(&out, Lon), OrderOutcome::Succeeded);
}

#[test]
fn dislodged_convoy_fleet_strands_the_army() {
    let out = run(vec![
        (mv_via(army(Lon), Nwy), Power::England),
        (convoy(fleet(Nth), army(Lon), Nwy), Power::England),
        (mv(fleet(Ska), Nth), Power::Russia),
        (sup_move(fleet(Hel), fleet(Ska), Nth), Power::Russia),
    ]);
    assert_eq!(outcome_of(&out, Nth), OrderOutcome::Dislodged);
    assert_eq!(outcome_of(&out, Lon), OrderOutcome::NoConvoy);
}

// 6.F.8 flavor: with two routes, one surviving fleet is enough.

#[test]
fn alternate_convoy_route_keeps_the_move_alive() {
    let out = run(vec![
        (mv_via(army(Lon), Bel), Power::England),
        (convoy(fleet(Eng), army(Lon), Bel), Power::England),
        (convoy(fleet(Nth), army(Lon), Bel), Power::England),
        (mv(fleet(Bre), Eng), Power::France),
        (sup_move(fleet(Mao), fleet(Bre), Eng), Power::France),
    ]);
    assert_eq!(outcome_of(&out, Eng), OrderOutcome::Dislodged);
    assert_eq!(outcome_of(&out, Lon), OrderOutcome::Succeeded);
}

// A convoyed attack cuts support at its landing province like any other.

#[test]
fn convoyed_attack_cuts_support_at_destination() {
    let out = run(vec![
        (mv_via(army(Lon), Bel), Power::England),
        (convoy(fleet(Eng), army(Lon), Bel), Power::England),
        (sup_move(army(Bel), army(Bur), Ruh), Power::France),
        (mv(army(Bur), Ruh), Power::France),
        (hold(army(Ruh)), Power::Germany),
    ]);
    assert_eq!(outcome_of(&out, Bel), OrderOutcome::Cut);
    assert_eq!(outcome_of(&out, Bur), OrderOutcome::Bounced);
    assert_eq!(outcome_of(&out, Lon), OrderOutcome::Bounced);
}

// 6.F.14 shape, relocated to the Tyrrhenian: the convoyed army would cut
// the support holding down an attack on its own convoy. Szykman settles
// it: the convoy fails and the supported attack goes through.

#[test]
fn convoy_paradox_resolved_by_szykman() {
    let out = run(vec![
        (mv_via(army(Tun), Nap), Power::France),
        (convoy(fleet(Tys), army(Tun), Nap), Power::Italy),
        (sup_move(fleet(Nap), fleet(Rom), Tys), Power::Austria),
        (mv(fleet(Rom), Tys), Power::Austria),
    ]);
    assert!(out.paradox);
    assert_eq!(outcome_of(&out, Tun), OrderOutcome::NoConvoy);
    assert_eq!(outcome_of(&out, Nap), OrderOutcome::Succeeded);
    assert_eq!(outcome_of(&out, Rom), OrderOutcome::Succeeded);
    assert_eq!(outcome_of(&out, Tys), OrderOutcome::Dislodged);
}

// With a second, unattacked route the same position has no paradox: the
// spare convoy carries the army, the cut stands, and the attack bounces.

#[test]
fn second_route_dissolves_the_paradox() {
    let out = run(vec![
        (mv_via(army(Tun), Nap), Power::France),
        (convoy(fleet(Tys), army(Tun), Nap), Power::Italy),
        (convoy(fleet(Ion), army(Tun), Nap), Power::Italy),
        (sup_move(fleet(Nap), fleet(Rom), Tys), Power::Austria),
        (mv(fleet(Rom), Tys), Power::Austria),
    ]);
    assert!(!out.paradox);
    assert_eq!(outcome_of(&out, Nap), OrderOutcome::Cut);
    assert_eq!(outcome_of(&out, Rom), OrderOutcome::Bounced);
    // The army still bounces off the occupied Naples.
    assert_eq!(outcome_of(&out, Tun), OrderOutcome::Bounced);
}

// Chained movement into vacated provinces resolves in one pass.

#[test]
fn follow_the_leader_succeeds() {
    let out = run(vec![
        (mv(army(Par), Bur), Power::France),
        (mv(army(Bur), Mun), Power::France),
        (mv(army(Mun), Sil), Power::Germany),
    ]);
    for p in [Par, Bur, Mun] {
        assert_eq!(outcome_of(&out, p), OrderOutcome::Succeeded);
    }
}

#[test]
fn bounced_leader_blocks_the_column() {
    let out = run(vec![
        (mv(army(Par), Bur), Power::France),
        (mv(army(Bur), Mun), Power::France),
        (hold(army(Mun)), Power::Germany),
    ]);
    assert_eq!(outcome_of(&out, Bur), OrderOutcome::Bounced);
    assert_eq!(outcome_of(&out, Par), OrderOutcome::Bounced);
    assert_eq!(outcome_of(&out, Mun), OrderOutcome::Succeeded);
}
