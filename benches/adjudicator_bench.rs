use criterion::{black_box, criterion_group, criterion_main, Criterion};

use entente::board::loc::Loc;
use entente::board::order::{Order, OrderUnit};
use entente::board::province::{Power, ALL_PROVINCES};
use entente::board::state::GameState;
use entente::resolve::Adjudicator;
use entente::Game;

/// All 22 opening units ordered to hold.
fn opening_holds() -> (Vec<(Order, Power)>, GameState) {
    let state = GameState::initial();
    let mut orders = Vec::new();
    for prov in ALL_PROVINCES {
        if let Some(unit) = state.unit_at(prov) {
            orders.push((
                Order::Hold { unit: OrderUnit::new(unit.unit_type, unit.loc) },
                unit.power,
            ));
        }
    }
    (orders, state)
}

fn bench_resolve_holds(c: &mut Criterion) {
    let (orders, state) = opening_holds();
    c.bench_function("resolve_22_holds", |b| {
        let mut adjudicator = Adjudicator::new();
        b.iter(|| adjudicator.resolve(black_box(&orders), black_box(&state)))
    });
}

fn bench_resolve_contested_spring(c: &mut Criterion) {
    use entente::board::province::Province::*;
    use entente::board::unit::UnitType;

    let state = GameState::initial();
    let army = |p| OrderUnit::new(UnitType::Army, Loc::new(p));
    let fleet = |p| OrderUnit::new(UnitType::Fleet, Loc::new(p));
    let mv = |u, d| Order::Move { unit: u, dest: Loc::new(d), via_convoy: false };

    // A busy opening: contested Galicia, Burgundy, and the Channel.
    let orders = vec![
        (mv(army(Vie), Gal), Power::Austria),
        (mv(army(War), Gal), Power::Russia),
        (mv(army(Par), Bur), Power::France),
        (mv(army(Mun), Bur), Power::Germany),
        (mv(fleet(Bre), Eng), Power::France),
        (mv(fleet(Lon), Eng), Power::England),
        (mv(army(Ven), Tyr), Power::Italy),
        (mv(army(Con), Bul), Power::Turkey),
        (mv(fleet(Sev), Bla), Power::Russia),
        (mv(fleet(Ank), Bla), Power::Turkey),
    ];

    c.bench_function("resolve_contested_spring", |b| {
        let mut adjudicator = Adjudicator::new();
        b.iter(|| adjudicator.resolve(black_box(&orders), black_box(&state)))
    });
}

fn bench_process_full_year(c: &mut Criterion) {
    c.bench_function("process_one_year", |b| {
        b.iter(|| {
            let mut game = Game::new("bench");
            game.set_orders(Power::France, &["A PAR - BUR", "F BRE - MAO"]);
            game.set_orders(Power::Germany, &["A MUN - RUH"]);
            game.process().unwrap();
            game.set_orders(Power::France, &["A BUR - BEL"]);
            game.process().unwrap();
            game.set_orders(Power::France, &["A PAR B"]);
            game.process().unwrap();
            black_box(game.compute_board_hash())
        })
    });
}

criterion_group!(
    benches,
    bench_resolve_holds,
    bench_resolve_contested_spring,
    bench_process_full_year
);
criterion_main!(benches);
