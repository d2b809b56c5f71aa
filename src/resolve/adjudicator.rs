//! Movement-phase adjudication.
//!
//! Resolves a set of simultaneous movement orders with the Kruijswijk
//! guess-and-check algorithm: each order's resolution is computed
//! recursively with memoization; when the recursion closes a dependency
//! cycle, the head of the cycle is guessed both ways. Two matching
//! outcomes resolve the cycle; two self-consistent outcomes mean either
//! circular movement (all moves succeed) or a convoy paradox, which the
//! backup rule settles by the Szykman convention: every convoy and
//! convoyed move in the cycle fails.
//!
//! The resolution is a pure function of the order set and the board, so
//! the result is independent of submission order.

use crate::board::adjacency::{can_move, fleet_edges};
use crate::board::loc::Loc;
use crate::board::order::Order;
use crate::board::province::{Power, Province, Terrain, PROVINCE_COUNT};
use crate::board::state::GameState;
use crate::board::unit::UnitType;

/// The terminal outcome of one movement-phase order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderOutcome {
    Succeeded,
    /// A move that lost its contest.
    Bounced,
    /// A move flagged via convoy with no surviving fleet chain.
    NoConvoy,
    /// A support that was cut.
    Cut,
    /// A convoy whose fleet was dislodged (or a paradoxed convoy).
    Failed,
    /// The unit was forced out of its province.
    Dislodged,
}

/// An order paired with its issuing power and resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResolvedOrder {
    pub order: Order,
    pub power: Power,
    pub outcome: OrderOutcome,
}

/// A unit forced to retreat, with the province its attacker came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dislodgement {
    pub power: Power,
    pub unit_type: UnitType,
    pub loc: Loc,
    pub attacker_from: Province,
}

/// Everything the movement solver reports for one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementOutcome {
    pub resolutions: Vec<ResolvedOrder>,
    pub dislodged: Vec<Dislodgement>,
    /// Provinces left vacant by a standoff; retreats may not enter them.
    pub contested: Vec<Province>,
    /// True when the Szykman backup rule fired on a convoy cycle.
    pub paradox: bool,
}

const NONE: u8 = u8::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Certainty {
    Unresolved,
    Guessing,
    Resolved,
}

/// Internal per-order record. Province references are u8 indices so the
/// whole record stays `Copy`.
#[derive(Debug, Clone, Copy)]
struct Entry {
    order: Order,
    power: Power,
    certainty: Certainty,
    resolution: bool,
    /// Source province of the ordered unit.
    src: u8,
    /// Move destination.
    dest: u8,
    /// Supported or convoyed unit's province.
    aux: u8,
    /// Destination of the supported move / convoyed army.
    aux_dest: u8,
}

/// Reusable movement adjudicator. The lookup table and entry buffer are
/// reused across calls; returned vectors are freshly allocated.
pub struct Adjudicator {
    lookup: [i16; PROVINCE_COUNT],
    entries: Vec<Entry>,
    deps: Vec<usize>,
    paradox: bool,
}

impl Adjudicator {
    pub fn new() -> Self {
        Adjudicator {
            lookup: [-1; PROVINCE_COUNT],
            entries: Vec::with_capacity(34),
            deps: Vec::new(),
            paradox: false,
        }
    }

    /// Resolves the given `(order, power)` pairs against the board.
    pub fn resolve(&mut self, orders: &[(Order, Power)], state: &GameState) -> MovementOutcome {
        self.load(orders);

        for i in 0..self.entries.len() {
            self.adjudicate(i, state);
        }

        // With everything resolved, record which convoyed moves ended up
        // without a surviving chain; collect() reports those as NoConvoy.
        let mut stranded = vec![false; self.entries.len()];
        for i in 0..self.entries.len() {
            if self.move_needs_convoy(i) {
                stranded[i] = !self.has_convoy_chain(i, state);
            }
        }

        self.collect(&stranded)
    }

    fn load(&mut self, orders: &[(Order, Power)]) {
        self.entries.clear();
        self.deps.clear();
        self.lookup.fill(-1);
        self.paradox = false;

        for (i, (order, power)) in orders.iter().enumerate() {
            let (src, dest, aux, aux_dest) = match *order {
                Order::Hold { unit } => (unit.loc.province as u8, NONE, NONE, NONE),
                Order::Move { unit, dest, .. } => {
                    (unit.loc.province as u8, dest.province as u8, NONE, NONE)
                }
                Order::SupportHold { unit, target } => {
                    (unit.loc.province as u8, NONE, target.loc.province as u8, NONE)
                }
                Order::SupportMove { unit, target, dest } => (
                    unit.loc.province as u8,
                    NONE,
                    target.loc.province as u8,
                    dest.province as u8,
                ),
                Order::Convoy { unit, army, dest } => (
                    unit.loc.province as u8,
                    NONE,
                    army.loc.province as u8,
                    dest.province as u8,
                ),
                // Non-movement orders do not participate.
                _ => (NONE, NONE, NONE, NONE),
            };
            self.entries.push(Entry {
                order: *order,
                power: *power,
                certainty: Certainty::Unresolved,
                resolution: false,
                src,
                dest,
                aux,
                aux_dest,
            });
            if src != NONE {
                self.lookup[src as usize] = i as i16;
            }
        }
    }

    fn entry_at(&self, prov: u8) -> Option<usize> {
        if prov == NONE {
            return None;
        }
        let i = self.lookup[prov as usize];
        if i < 0 {
            None
        } else {
            Some(i as usize)
        }
    }

    /// Resolves entry `e`, guessing through dependency cycles.
    fn adjudicate(&mut self, e: usize, state: &GameState) -> bool {
        match self.entries[e].certainty {
            Certainty::Resolved => return self.entries[e].resolution,
            Certainty::Guessing => {
                if !self.deps.contains(&e) {
                    self.deps.push(e);
                }
                return self.entries[e].resolution;
            }
            Certainty::Unresolved => {}
        }

        let base = self.deps.len();

        // Pessimistic first guess.
        self.entries[e].certainty = Certainty::Guessing;
        self.entries[e].resolution = false;
        let first = self.apply_rule(e, state);

        if self.deps.len() == base {
            // No cycle through this order.
            if self.entries[e].certainty != Certainty::Resolved {
                self.entries[e].certainty = Certainty::Resolved;
                self.entries[e].resolution = first;
            }
            return self.entries[e].resolution;
        }

        if self.deps[base] != e {
            // Part of a cycle headed higher up the stack; report upward.
            self.deps.push(e);
            self.entries[e].resolution = first;
            return first;
        }

        // Head of the cycle: retry with the optimistic guess.
        self.reset_cycle(base);
        self.entries[e].certainty = Certainty::Guessing;
        self.entries[e].resolution = true;
        let second = self.apply_rule(e, state);

        if first == second {
            self.reset_cycle(base);
            self.entries[e].certainty = Certainty::Resolved;
            self.entries[e].resolution = first;
            return first;
        }

        // The cycle admits both answers (or neither): backup rule.
        let cycle: Vec<usize> = self.deps[base..].to_vec();
        self.deps.truncate(base);
        self.apply_backup_rule(&cycle);
        if self.entries[e].certainty == Certainty::Guessing {
            self.entries[e].certainty = Certainty::Unresolved;
        }
        self.adjudicate(e, state)
    }

    /// Marks everything discovered after `base` unresolved again.
    fn reset_cycle(&mut self, base: usize) {
        while self.deps.len() > base {
            let d = self.deps.pop().expect("non-empty deps");
            self.entries[d].certainty = Certainty::Unresolved;
        }
    }

    /// Settles an ambiguous cycle. A cycle that runs through a convoy
    /// order is a paradox, settled by the Szykman convention: those
    /// convoys fail (stranding their armies when no other route exists)
    /// and the rest re-resolves. A cycle of moves alone is circular
    /// movement and succeeds wholesale, convoyed members included.
    fn apply_backup_rule(&mut self, cycle: &[usize]) {
        let convoy_involved = cycle
            .iter()
            .any(|&i| matches!(self.entries[i].order, Order::Convoy { .. }));

        if convoy_involved {
            self.paradox = true;
            for &i in cycle {
                if matches!(self.entries[i].order, Order::Convoy { .. }) {
                    self.entries[i].certainty = Certainty::Resolved;
                    self.entries[i].resolution = false;
                } else {
                    self.entries[i].certainty = Certainty::Unresolved;
                }
            }
        } else {
            // Circular movement.
            for &i in cycle {
                if self.entries[i].order.is_move() {
                    self.entries[i].certainty = Certainty::Resolved;
                    self.entries[i].resolution = true;
                } else {
                    self.entries[i].certainty = Certainty::Unresolved;
                }
            }
        }
    }

    fn apply_rule(&mut self, e: usize, state: &GameState) -> bool {
        match self.entries[e].order {
            Order::Hold { .. } => true,
            Order::Move { .. } => self.move_succeeds(e, state),
            Order::SupportHold { .. } | Order::SupportMove { .. } => {
                self.support_given(e, state)
            }
            Order::Convoy { .. } => self.convoy_survives(e, state),
            _ => false,
        }
    }

    /// True when the move must travel by convoy: explicitly flagged, or an
    /// army move between non-adjacent provinces.
    fn move_needs_convoy(&self, e: usize) -> bool {
        match self.entries[e].order {
            Order::Move { unit, dest, via_convoy } => {
                if unit.unit_type != UnitType::Army {
                    return false;
                }
                via_convoy || !can_move(UnitType::Army, unit.loc, dest)
            }
            _ => false,
        }
    }

    /// Head-to-head: the two moves swap provinces and neither travels by sea.
    fn is_head_to_head(&self, e: usize, d: usize) -> bool {
        self.entries[d].order.is_move()
            && self.entries[d].dest == self.entries[e].src
            && !self.move_needs_convoy(e)
            && !self.move_needs_convoy(d)
    }

    fn move_succeeds(&mut self, e: usize, state: &GameState) -> bool {
        if self.move_needs_convoy(e) && !self.has_convoy_chain(e, state) {
            return false;
        }

        let attack = self.attack_strength(e, state);
        let dest = self.entries[e].dest;

        match self.entry_at(dest) {
            Some(d) if self.is_head_to_head(e, d) => {
                if attack <= self.defend_strength(d, state) {
                    return false;
                }
            }
            _ => {
                if attack <= self.hold_strength(dest, state) {
                    return false;
                }
            }
        }

        // Every competing move into the same province must be overpowered.
        for m in 0..self.entries.len() {
            if m == e || !self.entries[m].order.is_move() || self.entries[m].dest != dest {
                continue;
            }
            if attack <= self.prevent_strength(m, state) {
                return false;
            }
        }

        true
    }

    /// True while the support stands uncut.
    fn support_given(&mut self, e: usize, state: &GameState) -> bool {
        let src = self.entries[e].src;
        let power = self.entries[e].power;
        let directed_against = self.entries[e].aux_dest;

        for m in 0..self.entries.len() {
            if !self.entries[m].order.is_move() || self.entries[m].dest != src {
                continue;
            }
            // A power does not cut its own support.
            if self.entries[m].power == power {
                continue;
            }
            // The attack the support is directed against cannot cut it.
            if directed_against != NONE && self.entries[m].src == directed_against {
                continue;
            }
            // A convoyed attack needs a surviving chain to cut.
            if self.move_needs_convoy(m) && !self.has_convoy_chain(m, state) {
                continue;
            }
            return false;
        }
        true
    }

    /// A convoy stands while its fleet is not dislodged.
    fn convoy_survives(&mut self, e: usize, state: &GameState) -> bool {
        let src = self.entries[e].src;
        for m in 0..self.entries.len() {
            if self.entries[m].order.is_move() && self.entries[m].dest == src {
                if self.adjudicate(m, state) {
                    return false;
                }
            }
        }
        true
    }

    fn hold_strength(&mut self, prov: u8, state: &GameState) -> i32 {
        if prov == NONE || state.units[prov as usize].is_none() {
            return 0;
        }
        if let Some(d) = self.entry_at(prov) {
            if self.entries[d].order.is_move() {
                // A unit that leaves offers no resistance.
                return if self.adjudicate(d, state) { 0 } else { 1 };
            }
        }
        let mut strength = 1;
        for s in 0..self.entries.len() {
            if !matches!(self.entries[s].order, Order::SupportHold { .. }) {
                continue;
            }
            if self.entries[s].aux != prov {
                continue;
            }
            if self.adjudicate(s, state) {
                strength += 1;
            }
        }
        strength
    }

    fn attack_strength(&mut self, e: usize, state: &GameState) -> i32 {
        if self.move_needs_convoy(e) && !self.has_convoy_chain(e, state) {
            return 0;
        }

        let dest = self.entries[e].dest;
        let power = self.entries[e].power;

        // Who still blocks the destination?
        let blocker = match state.units[dest as usize] {
            Some((occupant, _)) => {
                let vacated = match self.entry_at(dest) {
                    Some(d) => {
                        self.entries[d].order.is_move()
                            && !self.is_head_to_head(e, d)
                            && self.adjudicate(d, state)
                    }
                    None => false,
                };
                if vacated {
                    None
                } else {
                    Some(occupant)
                }
            }
            None => None,
        };

        match blocker {
            // No countryman may be dislodged.
            Some(occupant) if occupant == power => 0,
            // Supports from the defender's power never help dislodge it.
            Some(occupant) => 1 + self.count_move_supports(e, Some(occupant), state),
            None => 1 + self.count_move_supports(e, None, state),
        }
    }

    fn defend_strength(&mut self, d: usize, state: &GameState) -> i32 {
        1 + self.count_move_supports(d, None, state)
    }

    fn prevent_strength(&mut self, m: usize, state: &GameState) -> i32 {
        if self.move_needs_convoy(m) && !self.has_convoy_chain(m, state) {
            return 0;
        }
        // A head-to-head loser no longer contests its destination.
        if let Some(d) = self.entry_at(self.entries[m].dest) {
            if self.is_head_to_head(m, d) && self.adjudicate(d, state) {
                return 0;
            }
        }
        1 + self.count_move_supports(m, None, state)
    }

    /// Successful supports for move `e`, optionally excluding a power.
    fn count_move_supports(
        &mut self,
        e: usize,
        exclude: Option<Power>,
        state: &GameState,
    ) -> i32 {
        let src = self.entries[e].src;
        let dest = self.entries[e].dest;
        let mut n = 0;
        for s in 0..self.entries.len() {
            if !matches!(self.entries[s].order, Order::SupportMove { .. }) {
                continue;
            }
            if self.entries[s].aux != src || self.entries[s].aux_dest != dest {
                continue;
            }
            if exclude == Some(self.entries[s].power) {
                continue;
            }
            if self.adjudicate(s, state) {
                n += 1;
            }
        }
        n
    }

    /// BFS over surviving convoy fleets from the move's source to its
    /// destination. Only fleets in water provinces with a matching convoy
    /// order can carry the chain.
    fn has_convoy_chain(&mut self, e: usize, state: &GameState) -> bool {
        let (src, dest) = match self.entries[e].order {
            Order::Move { unit, dest, .. } => (unit.loc.province, dest.province),
            _ => return false,
        };

        let mut visited = [false; PROVINCE_COUNT];
        let mut queue: Vec<Province> = Vec::new();

        for c in 0..self.entries.len() {
            if !self.convoy_matches(c, src, dest) {
                continue;
            }
            let fleet_prov = match Province::from_index(self.entries[c].src as usize) {
                Some(p) if p.terrain() == Terrain::Water => p,
                _ => continue,
            };
            if fleet_adjacent(fleet_prov, src) && self.adjudicate(c, state) {
                visited[fleet_prov as usize] = true;
                queue.push(fleet_prov);
            }
        }

        while let Some(current) = queue.pop() {
            if fleet_adjacent(current, dest) {
                return true;
            }
            for c in 0..self.entries.len() {
                if !self.convoy_matches(c, src, dest) {
                    continue;
                }
                let fleet_prov = match Province::from_index(self.entries[c].src as usize) {
                    Some(p) if p.terrain() == Terrain::Water => p,
                    _ => continue,
                };
                if visited[fleet_prov as usize] || !fleet_adjacent(current, fleet_prov) {
                    continue;
                }
                if self.adjudicate(c, state) {
                    visited[fleet_prov as usize] = true;
                    queue.push(fleet_prov);
                }
            }
        }
        false
    }

    fn convoy_matches(&self, c: usize, src: Province, dest: Province) -> bool {
        matches!(self.entries[c].order, Order::Convoy { .. })
            && self.entries[c].aux == src as u8
            && self.entries[c].aux_dest == dest as u8
    }

    /// Converts resolved entries into the reported outcome.
    fn collect(&self, stranded: &[bool]) -> MovementOutcome {
        // Successful move into each province, if any.
        let mut winner_from = [NONE; PROVINCE_COUNT];
        for entry in &self.entries {
            if entry.order.is_move() && entry.resolution && entry.dest != NONE {
                winner_from[entry.dest as usize] = entry.src;
            }
        }

        let mut resolutions = Vec::with_capacity(self.entries.len());
        let mut dislodged = Vec::new();

        for (i, entry) in self.entries.iter().enumerate() {
            let mut outcome = match entry.order {
                Order::Move { .. } => {
                    if entry.resolution {
                        OrderOutcome::Succeeded
                    } else if stranded[i] {
                        OrderOutcome::NoConvoy
                    } else {
                        OrderOutcome::Bounced
                    }
                }
                Order::SupportHold { .. } | Order::SupportMove { .. } => {
                    if entry.resolution {
                        OrderOutcome::Succeeded
                    } else {
                        OrderOutcome::Cut
                    }
                }
                Order::Convoy { .. } => {
                    if entry.resolution {
                        OrderOutcome::Succeeded
                    } else {
                        OrderOutcome::Failed
                    }
                }
                _ => OrderOutcome::Succeeded,
            };

            // A unit that did not leave and was marched over is dislodged.
            if entry.src != NONE {
                let attacker = winner_from[entry.src as usize];
                let left = entry.order.is_move() && entry.resolution;
                if attacker != NONE && !left {
                    outcome = OrderOutcome::Dislodged;
                    if let Some(unit) = entry.order.unit() {
                        dislodged.push(Dislodgement {
                            power: entry.power,
                            unit_type: unit.unit_type,
                            loc: unit.loc,
                            attacker_from: Province::from_index(attacker as usize)
                                .expect("attacker province index"),
                        });
                    }
                }
            }

            resolutions.push(ResolvedOrder {
                order: entry.order,
                power: entry.power,
                outcome,
            });
        }

        // A province is contested when two or more moves fought over it
        // and none got in; such standoffs block retreats.
        let mut contested = Vec::new();
        for p in 0..PROVINCE_COUNT {
            let movers = self
                .entries
                .iter()
                .filter(|en| en.order.is_move() && en.dest == p as u8)
                .count();
            if movers >= 2 && winner_from[p] == NONE {
                contested.push(Province::from_index(p).expect("province index"));
            }
        }

        MovementOutcome {
            resolutions,
            dislodged,
            contested,
            paradox: self.paradox,
        }
    }
}

impl Default for Adjudicator {
    fn default() -> Self {
        Adjudicator::new()
    }
}

/// Province-level fleet adjacency, coasts ignored; used for convoy chains.
fn fleet_adjacent(from: Province, to: Province) -> bool {
    fleet_edges(from).iter().any(|e| e.to == to)
}

/// One-shot convenience wrapper around [`Adjudicator`].
pub fn resolve_movement(orders: &[(Order, Power)], state: &GameState) -> MovementOutcome {
    Adjudicator::new().resolve(orders, state)
}

/// Applies a movement resolution to the board: dislodged units come off,
/// winners take their destinations (swap chains included), and the
/// dislodgement list is rebuilt with retreat options for the next phase.
pub fn apply_movement(state: &mut GameState, outcome: &MovementOutcome) {
    for d in &outcome.dislodged {
        state.remove_unit(d.loc.province);
    }

    // Lift every successful mover before placing any, so chains and
    // rotations cannot clobber each other.
    let mut arrivals = Vec::new();
    for r in &outcome.resolutions {
        if r.outcome != OrderOutcome::Succeeded {
            continue;
        }
        if let Order::Move { unit, dest, .. } = r.order {
            if state.remove_unit(unit.loc.province).is_some() {
                arrivals.push((r.power, unit.unit_type, dest));
            }
        }
    }
    for (power, unit_type, dest) in arrivals {
        state.place_unit(power, unit_type, dest);
    }

    state.dislodged =
        super::retreat::record_dislodgements(state, &outcome.dislodged, &outcome.contested);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::order::OrderUnit;
    use crate::board::phase::Phase;
    use crate::board::province::Province::*;

    fn empty_state() -> GameState {
        GameState::empty(Phase::initial())
    }

    fn army(p: Province) -> OrderUnit {
        OrderUnit::new(UnitType::Army, Loc::new(p))
    }

    fn fleet(p: Province) -> OrderUnit {
        OrderUnit::new(UnitType::Fleet, Loc::new(p))
    }

    fn hold(p: Province) -> Order {
        Order::Hold { unit: army(p) }
    }

    fn mv(u: OrderUnit, dest: Province) -> Order {
        Order::Move { unit: u, dest: Loc::new(dest), via_convoy: false }
    }

    fn mv_via(u: OrderUnit, dest: Province) -> Order {
        Order::Move { unit: u, dest: Loc::new(dest), via_convoy: true }
    }

    fn sup_move(u: OrderUnit, target: OrderUnit, dest: Province) -> Order {
        Order::SupportMove { unit: u, target, dest: Loc::new(dest) }
    }

    fn sup_hold(u: OrderUnit, target: OrderUnit) -> Order {
        Order::SupportHold { unit: u, target }
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

    #[test]
    fn unopposed_move_succeeds() {
        let mut state = empty_state();
        state.place_unit(Power::Austria, UnitType::Army, Loc::new(Vie));
        let orders = vec![(mv(army(Vie), Bud), Power::Austria)];
        let out = resolve_movement(&orders, &state);
        assert_eq!(outcome_of(&out, Vie), OrderOutcome::Succeeded);
        assert!(out.dislodged.is_empty());
        assert!(!out.paradox);
    }

    #[test]
    fn one_on_one_bounces_off_holder() {
        let mut state = empty_state();
        state.place_unit(Power::Austria, UnitType::Army, Loc::new(Vie));
        state.place_unit(Power::Russia, UnitType::Army, Loc::new(Bud));
        let orders = vec![
            (mv(army(Vie), Bud), Power::Austria),
            (hold(Bud), Power::Russia),
        ];
        let out = resolve_movement(&orders, &state);
        assert_eq!(outcome_of(&out, Vie), OrderOutcome::Bounced);
        assert_eq!(outcome_of(&out, Bud), OrderOutcome::Succeeded);
    }

    #[test]
    fn supported_attack_dislodges() {
        let mut state = empty_state();
        state.place_unit(Power::Austria, UnitType::Army, Loc::new(Tyr));
        state.place_unit(Power::Austria, UnitType::Army, Loc::new(Tri));
        state.place_unit(Power::Italy, UnitType::Army, Loc::new(Ven));
        let orders = vec![
            (mv(army(Tyr), Ven), Power::Austria),
            (sup_move(army(Tri), army(Tyr), Ven), Power::Austria),
            (hold(Ven), Power::Italy),
        ];
        let out = resolve_movement(&orders, &state);
        assert_eq!(outcome_of(&out, Tyr), OrderOutcome::Succeeded);
        assert_eq!(outcome_of(&out, Ven), OrderOutcome::Dislodged);
        assert_eq!(out.dislodged.len(), 1);
        assert_eq!(out.dislodged[0].loc, Loc::new(Ven));
        assert_eq!(out.dislodged[0].attacker_from, Tyr);
    }

    #[test]
    fn support_cut_saves_the_defender() {
        // An unsupported attack cannot crack a supported hold.
        let mut state = empty_state();
        state.place_unit(Power::England, UnitType::Fleet, Loc::new(Nth));
        state.place_unit(Power::Germany, UnitType::Army, Loc::new(Hol));
        state.place_unit(Power::Germany, UnitType::Fleet, Loc::new(Den));
        let orders = vec![
            (mv(fleet(Nth), Hol), Power::England),
            (hold(Hol), Power::Germany),
            (sup_hold(fleet(Den), army(Hol)), Power::Germany),
        ];
        let out = resolve_movement(&orders, &state);
        assert_eq!(outcome_of(&out, Nth), OrderOutcome::Bounced);
        assert_eq!(outcome_of(&out, Hol), OrderOutcome::Succeeded);
        assert!(out.dislodged.is_empty());
    }

    #[test]
    fn head_to_head_bounces_without_support() {
        let mut state = empty_state();
        state.place_unit(Power::France, UnitType::Army, Loc::new(Par));
        state.place_unit(Power::Germany, UnitType::Army, Loc::new(Mun));
        let orders = vec![
            (mv(army(Par), Bur), Power::France),
            (mv(army(Mun), Bur), Power::Germany),
        ];
        let out = resolve_movement(&orders, &state);
        assert_eq!(outcome_of(&out, Par), OrderOutcome::Bounced);
        assert_eq!(outcome_of(&out, Mun), OrderOutcome::Bounced);
        assert_eq!(out.contested, vec![Bur]);
    }

    #[test]
    fn swap_without_convoy_bounces() {
        let mut state = empty_state();
        state.place_unit(Power::Italy, UnitType::Army, Loc::new(Rom));
        state.place_unit(Power::Italy, UnitType::Army, Loc::new(Ven));
        let orders = vec![
            (mv(army(Rom), Ven), Power::Italy),
            (mv(army(Ven), Rom), Power::Italy),
        ];
        let out = resolve_movement(&orders, &state);
        assert_eq!(outcome_of(&out, Rom), OrderOutcome::Bounced);
        assert_eq!(outcome_of(&out, Ven), OrderOutcome::Bounced);
        // Both provinces stay occupied; nothing is contested for retreats.
        assert!(out.contested.is_empty());
    }

    #[test]
    fn supported_head_to_head_dislodges() {
        let mut state = empty_state();
        state.place_unit(Power::Austria, UnitType::Army, Loc::new(Tyr));
        state.place_unit(Power::Austria, UnitType::Army, Loc::new(Tri));
        state.place_unit(Power::Italy, UnitType::Army, Loc::new(Ven));
        let orders = vec![
            (mv(army(Tyr), Ven), Power::Austria),
            (sup_move(army(Tri), army(Tyr), Ven), Power::Austria),
            (mv(army(Ven), Tyr), Power::Italy),
        ];
        let out = resolve_movement(&orders, &state);
        assert_eq!(outcome_of(&out, Tyr), OrderOutcome::Succeeded);
        assert_eq!(outcome_of(&out, Ven), OrderOutcome::Dislodged);
    }

    #[test]
    fn circular_movement_succeeds() {
        let mut state = empty_state();
        state.place_unit(Power::Germany, UnitType::Army, Loc::new(Boh));
        state.place_unit(Power::Germany, UnitType::Army, Loc::new(Mun));
        state.place_unit(Power::Germany, UnitType::Army, Loc::new(Sil));
        let orders = vec![
            (mv(army(Boh), Mun), Power::Germany),
            (mv(army(Mun), Sil), Power::Germany),
            (mv(army(Sil), Boh), Power::Germany),
        ];
        let out = resolve_movement(&orders, &state);
        for p in [Boh, Mun, Sil] {
            assert_eq!(outcome_of(&out, p), OrderOutcome::Succeeded);
        }
        assert!(!out.paradox);
    }

    #[test]
    fn support_not_cut_by_its_own_target() {
        let mut state = empty_state();
        state.place_unit(Power::Germany, UnitType::Army, Loc::new(Mun));
        state.place_unit(Power::Germany, UnitType::Army, Loc::new(Sil));
        state.place_unit(Power::Austria, UnitType::Army, Loc::new(Boh));
        let orders = vec![
            (sup_move(army(Mun), army(Sil), Boh), Power::Germany),
            (mv(army(Sil), Boh), Power::Germany),
            (mv(army(Boh), Mun), Power::Austria),
        ];
        let out = resolve_movement(&orders, &state);
        assert_eq!(outcome_of(&out, Mun), OrderOutcome::Succeeded);
        assert_eq!(outcome_of(&out, Sil), OrderOutcome::Succeeded);
        assert_eq!(outcome_of(&out, Boh), OrderOutcome::Dislodged);
    }

    #[test]
    fn own_support_cannot_dislodge_own_unit() {
        let mut state = empty_state();
        state.place_unit(Power::Austria, UnitType::Army, Loc::new(Tyr));
        state.place_unit(Power::Austria, UnitType::Army, Loc::new(Tri));
        state.place_unit(Power::Austria, UnitType::Army, Loc::new(Ven));
        let orders = vec![
            (mv(army(Tyr), Ven), Power::Austria),
            (sup_move(army(Tri), army(Tyr), Ven), Power::Austria),
            (hold(Ven), Power::Austria),
        ];
        let out = resolve_movement(&orders, &state);
        assert_eq!(outcome_of(&out, Tyr), OrderOutcome::Bounced);
        assert!(out.dislodged.is_empty());
    }

    #[test]
    fn defender_power_support_does_not_aid_dislodgement() {
        // Italy supports a French attack on its own unit; the support
        // does not count and the attack bounces.
        let mut state = empty_state();
        state.place_unit(Power::France, UnitType::Army, Loc::new(Pie));
        state.place_unit(Power::Italy, UnitType::Army, Loc::new(Tus));
        state.place_unit(Power::Italy, UnitType::Army, Loc::new(Ven));
        let orders = vec![
            (mv(army(Pie), Tus), Power::France),
            (sup_move(army(Ven), army(Pie), Tus), Power::Italy),
            (hold(Tus), Power::Italy),
        ];
        let out = resolve_movement(&orders, &state);
        assert_eq!(outcome_of(&out, Pie), OrderOutcome::Bounced);
        assert!(out.dislodged.is_empty());
    }

    #[test]
    fn convoyed_move_lands() {
        let mut state = empty_state();
        state.place_unit(Power::England, UnitType::Army, Loc::new(Lon));
        state.place_unit(Power::England, UnitType::Fleet, Loc::new(Nth));
        let orders = vec![
            (mv_via(army(Lon), Nwy), Power::England),
            (convoy(fleet(Nth), army(Lon), Nwy), Power::England),
        ];
        let out = resolve_movement(&orders, &state);
        assert_eq!(outcome_of(&out, Lon), OrderOutcome::Succeeded);
        assert_eq!(outcome_of(&out, Nth), OrderOutcome::Succeeded);
    }

    #[test]
    fn convoyed_move_without_fleet_goes_nowhere() {
        let mut state = empty_state();
        state.place_unit(Power::England, UnitType::Army, Loc::new(Lon));
        let orders = vec![(mv_via(army(Lon), Nwy), Power::England)];
        let out = resolve_movement(&orders, &state);
        assert_eq!(outcome_of(&out, Lon), OrderOutcome::NoConvoy);
    }

    #[test]
    fn dislodged_convoy_strands_the_army() {
        let mut state = empty_state();
        state.place_unit(Power::England, UnitType::Army, Loc::new(Lon));
        state.place_unit(Power::England, UnitType::Fleet, Loc::new(Nth));
        state.place_unit(Power::France, UnitType::Fleet, Loc::new(Eng));
        state.place_unit(Power::France, UnitType::Fleet, Loc::new(Bel));
        let orders = vec![
            (mv_via(army(Lon), Nwy), Power::England),
            (convoy(fleet(Nth), army(Lon), Nwy), Power::England),
            (mv(fleet(Eng), Nth), Power::France),
            (sup_move(fleet(Bel), fleet(Eng), Nth), Power::France),
        ];
        let out = resolve_movement(&orders, &state);
        assert_eq!(outcome_of(&out, Nth), OrderOutcome::Dislodged);
        assert_eq!(outcome_of(&out, Lon), OrderOutcome::NoConvoy);
    }

    #[test]
    fn two_route_convoy_survives_one_loss() {
        let mut state = empty_state();
        state.place_unit(Power::England, UnitType::Army, Loc::new(Lon));
        state.place_unit(Power::England, UnitType::Fleet, Loc::new(Eng));
        state.place_unit(Power::England, UnitType::Fleet, Loc::new(Nth));
        state.place_unit(Power::France, UnitType::Fleet, Loc::new(Bre));
        state.place_unit(Power::France, UnitType::Fleet, Loc::new(Mao));
        let orders = vec![
            (mv_via(army(Lon), Bel), Power::England),
            (convoy(fleet(Eng), army(Lon), Bel), Power::England),
            (convoy(fleet(Nth), army(Lon), Bel), Power::England),
            (mv(fleet(Bre), Eng), Power::France),
            (sup_move(fleet(Mao), fleet(Bre), Eng), Power::France),
        ];
        let out = resolve_movement(&orders, &state);
        assert_eq!(outcome_of(&out, Eng), OrderOutcome::Dislodged);
        assert_eq!(outcome_of(&out, Lon), OrderOutcome::Succeeded);
    }

    #[test]
    fn szykman_settles_the_simple_convoy_paradox() {
        // DATC 6.F.14 shape: the convoyed attack would cut the support
        // holding down the fleet that carries it.
        let mut state = empty_state();
        state.place_unit(Power::England, UnitType::Fleet, Loc::new(Lon));
        state.place_unit(Power::England, UnitType::Fleet, Loc::new(Wal));
        state.place_unit(Power::France, UnitType::Army, Loc::new(Bre));
        state.place_unit(Power::France, UnitType::Fleet, Loc::new(Eng));
        let orders = vec![
            (sup_move(fleet(Lon), fleet(Wal), Eng), Power::England),
            (mv(fleet(Wal), Eng), Power::England),
            (mv_via(army(Bre), Lon), Power::France),
            (convoy(fleet(Eng), army(Bre), Lon), Power::France),
        ];
        let out = resolve_movement(&orders, &state);
        assert!(out.paradox);
        // Szykman: the convoy fails, the army stays, the support stands.
        assert_eq!(outcome_of(&out, Bre), OrderOutcome::NoConvoy);
        assert_eq!(outcome_of(&out, Lon), OrderOutcome::Succeeded);
        assert_eq!(outcome_of(&out, Wal), OrderOutcome::Succeeded);
        assert_eq!(outcome_of(&out, Eng), OrderOutcome::Dislodged);
    }

    #[test]
    fn convoyed_swap_is_circular_movement() {
        // One army walks while the other sails around it; with the fleet
        // untouched this is a legal exchange, not a paradox.
        let mut state = empty_state();
        state.place_unit(Power::England, UnitType::Army, Loc::new(Nwy));
        state.place_unit(Power::Russia, UnitType::Army, Loc::new(Swe));
        state.place_unit(Power::Russia, UnitType::Fleet, Loc::new(Ska));
        let orders = vec![
            (mv(army(Nwy), Swe), Power::England),
            (mv_via(army(Swe), Nwy), Power::Russia),
            (convoy(fleet(Ska), army(Swe), Nwy), Power::Russia),
        ];
        let out = resolve_movement(&orders, &state);
        assert!(!out.paradox);
        assert_eq!(outcome_of(&out, Nwy), OrderOutcome::Succeeded);
        assert_eq!(outcome_of(&out, Swe), OrderOutcome::Succeeded);
        assert!(out.dislodged.is_empty());
    }

    #[test]
    fn paradox_flag_stays_clear_on_ordinary_convoys() {
        let mut state = empty_state();
        state.place_unit(Power::France, UnitType::Army, Loc::new(Tun));
        state.place_unit(Power::Italy, UnitType::Fleet, Loc::new(Tys));
        let orders = vec![
            (mv_via(army(Tun), Nap), Power::France),
            (convoy(fleet(Tys), army(Tun), Nap), Power::Italy),
        ];
        let out = resolve_movement(&orders, &state);
        assert!(!out.paradox);
        assert_eq!(outcome_of(&out, Tun), OrderOutcome::Succeeded);
    }

    #[test]
    fn resolution_is_submission_order_independent() {
        let mut state = empty_state();
        state.place_unit(Power::Austria, UnitType::Army, Loc::new(Tyr));
        state.place_unit(Power::Austria, UnitType::Army, Loc::new(Tri));
        state.place_unit(Power::Italy, UnitType::Army, Loc::new(Ven));
        state.place_unit(Power::Italy, UnitType::Army, Loc::new(Pie));
        let orders = vec![
            (mv(army(Tyr), Ven), Power::Austria),
            (sup_move(army(Tri), army(Tyr), Ven), Power::Austria),
            (hold(Ven), Power::Italy),
            (mv(army(Pie), Tyr), Power::Italy),
        ];
        let base = resolve_movement(&orders, &state);
        // Try every rotation of the submission order.
        for rot in 1..orders.len() {
            let mut shuffled = orders.clone();
            shuffled.rotate_left(rot);
            let out = resolve_movement(&shuffled, &state);
            for r in &base.resolutions {
                let loc = r.order.unit_loc().unwrap();
                assert_eq!(outcome_of(&out, loc.province), r.outcome, "rotation {}", rot);
            }
            assert_eq!(out.dislodged.len(), base.dislodged.len());
        }
    }

    #[test]
    fn unordered_unit_still_resists() {
        let mut state = empty_state();
        state.place_unit(Power::Austria, UnitType::Army, Loc::new(Vie));
        state.place_unit(Power::Russia, UnitType::Army, Loc::new(Bud));
        // Russia never submitted an order for Budapest.
        let orders = vec![(mv(army(Vie), Bud), Power::Austria)];
        let out = resolve_movement(&orders, &state);
        assert_eq!(outcome_of(&out, Vie), OrderOutcome::Bounced);
    }
}
