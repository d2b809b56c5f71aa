//! The Game aggregate.
//!
//! Owns the current board state, the staged orders, and the per-phase
//! histories of states, orders, messages, and logs. `process()` runs the
//! phase-appropriate solver, archives the outgoing state, and advances
//! the phase. Rollback produces detached copies; nothing here is shared
//! between Game instances except the injected clock.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use log::{debug, error, warn};
use thiserror::Error;

use crate::board::adjacency::{can_move, reachable_locs};
use crate::board::loc::{Loc, ALL_LOCS};
use crate::board::order::{Order, OrderUnit};
use crate::board::phase::{Phase, PhaseKind, Season};
use crate::board::province::{
    Coast, Power, Terrain, ALL_POWERS, ALL_PROVINCES, POWER_COUNT, PROVINCE_COUNT,
};
use crate::board::state::GameState;
use crate::board::unit::UnitType;
use crate::codec::notation;
use crate::codec::snapshot::{self, SnapshotError};
use crate::movegen;
use crate::resolve::{
    apply_adjustments, apply_movement, apply_retreats, build_site_is_legal, resolve_adjustments,
    resolve_movement, resolve_retreats, sequence, solo_winner,
};

/// Wall-clock source for default message timestamps. Injected so replays
/// and tests control time.
pub trait Clock {
    fn now_micros(&self) -> u64;
}

/// The process clock, in microseconds since the Unix epoch.
#[derive(Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_micros(&self) -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_micros() as u64)
            .unwrap_or(0)
    }
}

/// Engine configuration knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameConfig {
    /// Declare a draw after this many years without a supply-center
    /// change; -1 disables the heuristic.
    pub draw_on_stalemate_years: i32,
    /// Abort `process()` with an error on a convoy paradox instead of
    /// applying the Szykman convention silently.
    pub exception_on_convoy_paradox: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig { draw_on_stalemate_years: -1, exception_on_convoy_paradox: false }
    }
}

/// Errors surfaced by the Game API.
#[derive(Debug, Error)]
pub enum GameError {
    #[error("unknown power '{0}'")]
    UnknownPower(String),

    #[error("unknown phase '{0}'")]
    UnknownPhase(String),

    #[error("game is already finished")]
    GameDone,

    #[error("phase {0} is not in the game's history")]
    PhaseNotInHistory(String),

    #[error("convoy paradox while resolving {0}")]
    ConvoyParadox(String),

    #[error(transparent)]
    CorruptSnapshot(#[from] SnapshotError),
}

/// One submitted order, kept verbatim for history fidelity.
///
/// Invalid orders stay on record but adjudicate as a hold of the named
/// unit (when one can be identified at all).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderRecord {
    pub text: String,
    pub order: Option<Order>,
    pub valid: bool,
}

/// A stored press message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub sender: String,
    pub recipient: String,
    pub body: String,
    pub time_sent: u64,
}

/// A Diplomacy game: current state, staged orders, and full history.
pub struct Game {
    pub(crate) game_id: String,
    pub(crate) rules: Vec<String>,
    pub(crate) config: GameConfig,
    pub(crate) state: GameState,
    pub(crate) staged: BTreeMap<Power, Vec<OrderRecord>>,
    pub(crate) state_history: BTreeMap<Phase, GameState>,
    pub(crate) order_history: BTreeMap<Phase, BTreeMap<Power, Vec<OrderRecord>>>,
    pub(crate) message_history: BTreeMap<Phase, BTreeMap<u64, Message>>,
    pub(crate) log_history: BTreeMap<Phase, Vec<String>>,
    clock: Arc<dyn Clock>,
    possible_orders: RefCell<Option<BTreeMap<Loc, Vec<Order>>>>,
}

impl Game {
    /// A fresh game at the standard 1901 opening.
    pub fn new(game_id: impl Into<String>) -> Self {
        Game::with_config(game_id, GameConfig::default())
    }

    pub fn with_config(game_id: impl Into<String>, config: GameConfig) -> Self {
        Game {
            game_id: game_id.into(),
            rules: vec!["NO_PRESS".to_string(), "POWER_CHOICE".to_string()],
            config,
            state: GameState::initial(),
            staged: BTreeMap::new(),
            state_history: BTreeMap::new(),
            order_history: BTreeMap::new(),
            message_history: BTreeMap::new(),
            log_history: BTreeMap::new(),
            clock: Arc::new(SystemClock),
            possible_orders: RefCell::new(None),
        }
    }

    /// Replaces the clock used for default message timestamps.
    pub fn set_clock(&mut self, clock: Arc<dyn Clock>) {
        self.clock = clock;
    }

    pub fn game_id(&self) -> &str {
        &self.game_id
    }

    pub fn rules(&self) -> &[String] {
        &self.rules
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn current_phase(&self) -> Phase {
        self.state.phase
    }

    pub fn current_state(&self) -> &GameState {
        &self.state
    }

    pub fn state_history(&self) -> &BTreeMap<Phase, GameState> {
        &self.state_history
    }

    pub fn order_history(&self) -> &BTreeMap<Phase, BTreeMap<Power, Vec<OrderRecord>>> {
        &self.order_history
    }

    pub fn message_history(&self) -> &BTreeMap<Phase, BTreeMap<u64, Message>> {
        &self.message_history
    }

    pub fn log_history(&self) -> &BTreeMap<Phase, Vec<String>> {
        &self.log_history
    }

    pub fn staged_orders(&self) -> &BTreeMap<Power, Vec<OrderRecord>> {
        &self.staged
    }

    /// Stages orders for a power, replacing anything staged earlier this
    /// phase. Malformed or illegal orders are kept, flagged invalid, and
    /// will adjudicate as holds.
    pub fn set_orders(&mut self, power: Power, orders: &[&str]) {
        let records: Vec<OrderRecord> =
            orders.iter().map(|text| self.record_order(power, text)).collect();
        self.staged.insert(power, records);
    }

    /// Name-based variant of [`Game::set_orders`].
    pub fn set_orders_by_name(&mut self, power: &str, orders: &[&str]) -> Result<(), GameError> {
        let power = Power::from_name(power)
            .ok_or_else(|| self.fatal(GameError::UnknownPower(power.to_string())))?;
        self.set_orders(power, orders);
        Ok(())
    }

    fn record_order(&self, power: Power, text: &str) -> OrderRecord {
        let trimmed = text.trim().to_string();
        match notation::parse_order(&trimmed) {
            Ok(order) => {
                let (order, valid) = validate_order(&self.state, power, order);
                if !valid {
                    warn!("{}: rejecting '{}' from {}", self.state.phase, trimmed, power.name());
                }
                OrderRecord { text: trimmed, order: Some(order), valid }
            }
            Err(e) => {
                warn!(
                    "{}: unparseable order '{}' from {}: {}",
                    self.state.phase,
                    trimmed,
                    power.name(),
                    e
                );
                OrderRecord { text: trimmed, order: None, valid: false }
            }
        }
    }

    /// Appends a line to the current phase's log.
    pub fn add_log(&mut self, text: impl Into<String>) {
        self.log_history.entry(self.state.phase).or_default().push(text.into());
    }

    /// Stores a message under the current phase. A zero `time_sent` takes
    /// the injected clock; timestamps are unique per game, with collisions
    /// bumped forward in submission order. Returns the stored timestamp.
    pub fn add_message(
        &mut self,
        sender: &str,
        recipient: &str,
        body: &str,
        time_sent: u64,
    ) -> u64 {
        let mut ts = if time_sent == 0 { self.clock.now_micros() } else { time_sent };
        let newest = self
            .message_history
            .values()
            .filter_map(|m| m.keys().next_back())
            .max()
            .copied()
            .unwrap_or(0);
        if ts <= newest {
            ts = newest + 1;
        }
        self.message_history.entry(self.state.phase).or_default().insert(
            ts,
            Message {
                sender: sender.to_string(),
                recipient: recipient.to_string(),
                body: body.to_string(),
                time_sent: ts,
            },
        );
        ts
    }

    /// Drops every message sent after `t`, across all phases.
    pub fn rollback_messages_to_timestamp(&mut self, t: u64) {
        for msgs in self.message_history.values_mut() {
            msgs.retain(|ts, _| *ts <= t);
        }
        self.message_history.retain(|_, msgs| !msgs.is_empty());
    }

    /// Per power, the locations that may submit an order this phase.
    pub fn get_orderable_locations(&self) -> BTreeMap<Power, Vec<Loc>> {
        ALL_POWERS
            .iter()
            .map(|&p| (p, movegen::orderable_locations(p, &self.state)))
            .collect()
    }

    /// Every legal order per orderable loc, memoized until the next
    /// `process()` or an explicit cache clear.
    pub fn get_all_possible_orders(&self) -> BTreeMap<Loc, Vec<Order>> {
        let mut cache = self.possible_orders.borrow_mut();
        cache.get_or_insert_with(|| movegen::all_possible_orders(&self.state)).clone()
    }

    pub fn clear_old_all_possible_orders(&mut self) {
        self.possible_orders.replace(None);
    }

    /// True when the game has ended: a solo winner, a single surviving
    /// power, or the configured stalemate draw.
    pub fn is_game_done(&self) -> bool {
        if solo_winner(&self.state).is_some() {
            return true;
        }
        let alive = ALL_POWERS.iter().filter(|p| self.state.center_count(**p) > 0).count();
        if alive <= 1 {
            return true;
        }
        if self.config.draw_on_stalemate_years > 0
            && self.stalemate_years() >= self.config.draw_on_stalemate_years as usize
        {
            return true;
        }
        false
    }

    /// Consecutive completed years without a supply-center change,
    /// derived from the archived year-start states.
    pub fn stalemate_years(&self) -> usize {
        let mut snapshots: Vec<&[Option<Power>; PROVINCE_COUNT]> = self
            .state_history
            .iter()
            .filter(|(p, _)| p.season == Season::Spring && p.kind == PhaseKind::Movement)
            .map(|(_, s)| &s.sc_owner)
            .collect();
        if self.state.phase.season == Season::Spring && self.state.phase.kind == PhaseKind::Movement
        {
            snapshots.push(&self.state.sc_owner);
        }
        let mut run = 0;
        for w in snapshots.windows(2).rev() {
            if w[0] == w[1] {
                run += 1;
            } else {
                break;
            }
        }
        run
    }

    /// Length-7 score vector in power-enum order. A solo winner takes the
    /// whole pot; otherwise scores are proportional to center counts, and
    /// an empty board splits evenly among powers that still have units.
    pub fn get_square_scores(&self) -> [f64; POWER_COUNT] {
        let mut scores = [0.0; POWER_COUNT];
        if let Some(winner) = solo_winner(&self.state) {
            scores[winner as usize] = 1.0;
            return scores;
        }
        let counts: Vec<usize> =
            ALL_POWERS.iter().map(|p| self.state.center_count(*p)).collect();
        let total: usize = counts.iter().sum();
        if total > 0 {
            for (i, c) in counts.iter().enumerate() {
                scores[i] = *c as f64 / total as f64;
            }
            return scores;
        }
        let survivors: Vec<usize> = ALL_POWERS
            .iter()
            .enumerate()
            .filter(|(_, p)| self.state.unit_count(**p) > 0)
            .map(|(i, _)| i)
            .collect();
        if survivors.is_empty() {
            scores.fill(1.0 / POWER_COUNT as f64);
        } else {
            for i in &survivors {
                scores[*i] = 1.0 / survivors.len() as f64;
            }
        }
        scores
    }

    /// Stable 64-bit hash of the current position, independent of unit
    /// insertion order.
    pub fn compute_board_hash(&self) -> u64 {
        board_hash(&self.state)
    }

    /// Serializes the full game to the snapshot JSON form.
    pub fn to_json(&self) -> String {
        snapshot::to_json(self)
    }

    /// Restores a game from snapshot JSON.
    pub fn from_json(json: &str) -> Result<Game, GameError> {
        Ok(snapshot::from_json(json)?)
    }

    /// Serializes the game for the crash side channel.
    pub fn crash_dump(&self) -> String {
        self.to_json()
    }

    /// Emits the crash side channel before a fatal error leaves the API.
    fn fatal(&self, err: GameError) -> GameError {
        error!("{}; crash dump: {}", err, self.crash_dump());
        err
    }

    /// Runs the current phase's solver, archives the outgoing state and
    /// orders, and advances the phase. On failure the game is unchanged.
    pub fn process(&mut self) -> Result<(), GameError> {
        if self.is_game_done() {
            return Err(self.fatal(GameError::GameDone));
        }
        let phase = self.state.phase;
        debug!("{}: processing", phase);

        let mut next = self.state.clone();
        match phase.kind {
            PhaseKind::Movement => {
                let orders = self.effective_movement_orders();
                let outcome = resolve_movement(&orders, &self.state);
                if outcome.paradox {
                    if self.config.exception_on_convoy_paradox {
                        return Err(self.fatal(GameError::ConvoyParadox(phase.short())));
                    }
                    self.add_log(format!("{}: convoy paradox, Szykman rule applied", phase));
                }
                for d in &outcome.dislodged {
                    self.add_log(format!(
                        "{}: {} {} dislodged from {}",
                        phase,
                        d.power.name(),
                        d.unit_type.letter(),
                        d.loc
                    ));
                }
                apply_movement(&mut next, &outcome);
                sequence::advance(&mut next, !outcome.dislodged.is_empty());
            }
            PhaseKind::Retreat => {
                let orders = self.effective_phase_orders();
                let results = resolve_retreats(&orders, &self.state);
                apply_retreats(&mut next, &results);
                sequence::advance(&mut next, false);
            }
            PhaseKind::Adjustment => {
                let orders = self.effective_phase_orders();
                let outcome = resolve_adjustments(&orders, &self.state);
                for power in &outcome.civil_disorder {
                    self.add_log(format!("{}: civil disorder for {}", phase, power.name()));
                }
                apply_adjustments(&mut next, &outcome);
                sequence::advance(&mut next, false);
            }
        }

        let previous = std::mem::replace(&mut self.state, next);
        self.state_history.insert(phase, previous);
        self.order_history.insert(phase, std::mem::take(&mut self.staged));
        self.possible_orders.replace(None);
        debug!("{}: advanced to {}", phase, self.state.phase);
        Ok(())
    }

    /// Movement orders to adjudicate: valid staged orders, invalid orders
    /// demoted to holds of their unit, and synthesized holds for every
    /// unit left unordered.
    fn effective_movement_orders(&self) -> Vec<(Order, Power)> {
        let mut orders: Vec<(Order, Power)> = Vec::new();
        let mut covered = [false; PROVINCE_COUNT];

        for (&power, records) in &self.staged {
            for r in records {
                let Some(order) = r.order else { continue };
                let Some(loc) = order.unit_loc() else { continue };
                let owned = matches!(
                    self.state.units[loc.province as usize],
                    Some((p, _)) if p == power
                );
                if !owned || covered[loc.province as usize] {
                    continue;
                }
                covered[loc.province as usize] = true;
                if r.valid {
                    orders.push((order, power));
                } else if let Some(unit) = self.state.unit_at(loc.province) {
                    // Invalid orders hold in place.
                    let unit = OrderUnit::new(unit.unit_type, unit.loc);
                    orders.push((Order::Hold { unit }, power));
                }
            }
        }

        for prov in ALL_PROVINCES {
            if covered[prov as usize] {
                continue;
            }
            if let Some(unit) = self.state.unit_at(prov) {
                let order_unit = OrderUnit::new(unit.unit_type, unit.loc);
                orders.push((Order::Hold { unit: order_unit }, unit.power));
            }
        }
        orders
    }

    /// Valid staged orders for retreat and adjustment phases.
    fn effective_phase_orders(&self) -> Vec<(Order, Power)> {
        let mut orders = Vec::new();
        for (&power, records) in &self.staged {
            for r in records {
                if !r.valid {
                    continue;
                }
                if let Some(order) = r.order {
                    orders.push((order, power));
                }
            }
        }
        orders
    }

    /// A copy rolled back to the start of `phase`: its staged orders are
    /// empty and its state is as-entered. Later history is discarded.
    pub fn rolled_back_to_phase_start(&self, phase: &str) -> Result<Game, GameError> {
        let phase = Phase::parse(phase)
            .ok_or_else(|| self.fatal(GameError::UnknownPhase(phase.into())))?;
        let mut copy = self.clone();
        if phase == self.state.phase {
            copy.staged.clear();
            copy.possible_orders.replace(None);
            return Ok(copy);
        }
        let archived = self
            .state_history
            .get(&phase)
            .ok_or_else(|| self.fatal(GameError::PhaseNotInHistory(phase.short())))?;
        copy.state = archived.clone();
        copy.staged.clear();
        copy.state_history.retain(|k, _| *k < phase);
        copy.order_history.retain(|k, _| *k < phase);
        copy.log_history.retain(|k, _| *k < phase);
        copy.message_history.retain(|k, _| *k < phase);
        copy.possible_orders.replace(None);
        Ok(copy)
    }

    /// A copy rolled back to the end of `phase`: its archived resolution
    /// is kept and the successor state becomes current.
    pub fn rolled_back_to_phase_end(&self, phase: &str) -> Result<Game, GameError> {
        let phase = Phase::parse(phase)
            .ok_or_else(|| self.fatal(GameError::UnknownPhase(phase.into())))?;
        if !self.state_history.contains_key(&phase) {
            return Err(self.fatal(GameError::PhaseNotInHistory(phase.short())));
        }
        let mut copy = self.clone();
        let successor = copy
            .state_history
            .range((
                std::ops::Bound::Excluded(phase),
                std::ops::Bound::Unbounded,
            ))
            .next()
            .map(|(k, _)| *k);
        if let Some(k) = successor {
            copy.state = copy.state_history[&k].clone();
        }
        // When `phase` is the newest archived phase, the current state
        // already is its end.
        copy.staged.clear();
        copy.state_history.retain(|k, _| *k <= phase);
        copy.order_history.retain(|k, _| *k <= phase);
        copy.log_history.retain(|k, _| *k <= phase);
        copy.message_history.retain(|k, _| *k <= phase);
        copy.possible_orders.replace(None);
        Ok(copy)
    }

    /// The archived orders of a phase, as submitted strings per power.
    pub fn archived_order_texts(&self, phase: Phase) -> BTreeMap<Power, Vec<String>> {
        self.order_history
            .get(&phase)
            .map(|by_power| {
                by_power
                    .iter()
                    .map(|(p, records)| {
                        (*p, records.iter().map(|r| r.text.clone()).collect())
                    })
                    .collect()
            })
            .unwrap_or_default()
    }
}

impl Clone for Game {
    fn clone(&self) -> Self {
        Game {
            game_id: self.game_id.clone(),
            rules: self.rules.clone(),
            config: self.config,
            state: self.state.clone(),
            staged: self.staged.clone(),
            state_history: self.state_history.clone(),
            order_history: self.order_history.clone(),
            message_history: self.message_history.clone(),
            log_history: self.log_history.clone(),
            clock: Arc::clone(&self.clock),
            possible_orders: RefCell::new(None),
        }
    }
}

impl PartialEq for Game {
    /// Structural equality over the recorded game data. The injected
    /// clock, the host-side config knobs, and orders merely staged for
    /// the current phase are not part of the record.
    fn eq(&self, other: &Self) -> bool {
        self.game_id == other.game_id
            && self.rules == other.rules
            && self.state == other.state
            && self.state_history == other.state_history
            && self.order_history == other.order_history
            && self.message_history == other.message_history
            && self.log_history == other.log_history
    }
}

impl fmt::Debug for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Game")
            .field("game_id", &self.game_id)
            .field("phase", &self.state.phase.short())
            .field("history_len", &self.state_history.len())
            .finish()
    }
}

/// Stable FNV-1a hash of a state: phase, then units and center owners in
/// canonical loc order, so insertion order can never leak in.
pub fn board_hash(state: &GameState) -> u64 {
    const OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
    const PRIME: u64 = 0x0000_0100_0000_01b3;

    let mut hash = OFFSET;
    let mut eat = |byte: u8| {
        hash ^= byte as u64;
        hash = hash.wrapping_mul(PRIME);
    };

    for b in state.phase.short().bytes() {
        eat(b);
    }
    eat(0xff);
    for loc in ALL_LOCS {
        let idx = loc.province as usize;
        if let Some((power, unit_type)) = state.units[idx] {
            let unit_loc = state.unit_loc_at(loc.province).expect("occupied loc");
            if unit_loc == loc {
                eat(loc.index() as u8);
                eat(unit_type as u8);
                eat(power as u8);
            }
        }
    }
    eat(0xfe);
    for loc in ALL_LOCS {
        if loc.coast != Coast::None || !loc.province.is_supply_center() {
            continue;
        }
        if let Some(owner) = state.sc_owner[loc.province as usize] {
            eat(loc.index() as u8);
            eat(owner as u8);
        }
    }
    hash
}

/// Rebuilds an order record against an archived state; used when loading
/// snapshots so history carries the same validity flags it was played
/// with.
pub(crate) fn revalidate(state: &GameState, power: Power, text: &str) -> OrderRecord {
    match notation::parse_order(text) {
        Ok(order) => {
            let (order, valid) = validate_order(state, power, order);
            OrderRecord { text: text.to_string(), order: Some(order), valid }
        }
        Err(_) => OrderRecord { text: text.to_string(), order: None, valid: false },
    }
}

/// Validates a parsed order against the board and phase, normalizing the
/// ordered unit's location (so `F STP - BOT` resolves the actual coast).
/// Returns the possibly-rewritten order and its validity.
fn validate_order(state: &GameState, power: Power, order: Order) -> (Order, bool) {
    match state.phase.kind {
        PhaseKind::Movement => validate_movement_order(state, power, order),
        PhaseKind::Retreat => validate_retreat_order(state, power, order),
        PhaseKind::Adjustment => validate_adjustment_order(state, power, order),
    }
}

/// The actual unit matching an order's unit reference, if the reference
/// is accurate enough: right province, right type, right owner.
fn normalize_own_unit(state: &GameState, power: Power, unit: OrderUnit) -> Option<OrderUnit> {
    match state.units[unit.loc.province as usize] {
        Some((p, t)) if p == power && t == unit.unit_type => Some(OrderUnit::new(
            t,
            state.unit_loc_at(unit.loc.province).expect("occupied province"),
        )),
        _ => None,
    }
}

/// Same, for a unit of any power (support and convoy targets).
fn normalize_any_unit(state: &GameState, unit: OrderUnit) -> Option<OrderUnit> {
    match state.units[unit.loc.province as usize] {
        Some((_, t)) if t == unit.unit_type => Some(OrderUnit::new(
            t,
            state.unit_loc_at(unit.loc.province).expect("occupied province"),
        )),
        _ => None,
    }
}

fn reaches_province(unit: &OrderUnit, province: crate::board::province::Province) -> bool {
    reachable_locs(unit.unit_type, unit.loc).iter().any(|l| l.province == province)
}

fn validate_movement_order(state: &GameState, power: Power, order: Order) -> (Order, bool) {
    match order {
        Order::Hold { unit } => match normalize_own_unit(state, power, unit) {
            Some(unit) => (Order::Hold { unit }, true),
            None => (order, false),
        },
        Order::Move { unit, dest, via_convoy } => {
            let Some(unit) = normalize_own_unit(state, power, unit) else {
                return (order, false);
            };
            let needs_convoy = via_convoy
                || (unit.unit_type == UnitType::Army
                    && !can_move(UnitType::Army, unit.loc, dest));
            if needs_convoy {
                let ok = unit.unit_type == UnitType::Army
                    && dest.coast == Coast::None
                    && dest.province != unit.loc.province
                    && dest.province.terrain() == Terrain::Coastal
                    && unit.loc.province.terrain() == Terrain::Coastal;
                (Order::Move { unit, dest, via_convoy: true }, ok)
            } else {
                let ok = can_move(unit.unit_type, unit.loc, dest);
                (Order::Move { unit, dest, via_convoy: false }, ok)
            }
        }
        Order::SupportHold { unit, target } => {
            let Some(unit) = normalize_own_unit(state, power, unit) else {
                return (order, false);
            };
            let Some(target) = normalize_any_unit(state, target) else {
                return (order, false);
            };
            let ok = reaches_province(&unit, target.loc.province);
            (Order::SupportHold { unit, target }, ok)
        }
        Order::SupportMove { unit, target, dest } => {
            let Some(unit) = normalize_own_unit(state, power, unit) else {
                return (order, false);
            };
            let Some(target) = normalize_any_unit(state, target) else {
                return (order, false);
            };
            let target_reaches = reaches_province(&target, dest.province)
                || (target.unit_type == UnitType::Army
                    && movegen::convoy_destinations(target.loc.province, state)
                        .contains(&dest.province));
            let ok = dest.province != unit.loc.province
                && reaches_province(&unit, dest.province)
                && target_reaches;
            (Order::SupportMove { unit, target, dest }, ok)
        }
        Order::Convoy { unit, army, dest } => {
            let Some(unit) = normalize_own_unit(state, power, unit) else {
                return (order, false);
            };
            let Some(army) = normalize_any_unit(state, army) else {
                return (order, false);
            };
            let ok = unit.unit_type == UnitType::Fleet
                && unit.loc.province.terrain() == Terrain::Water
                && army.unit_type == UnitType::Army
                && dest.province.terrain() == Terrain::Coastal
                && dest.province != army.loc.province;
            (Order::Convoy { unit, army, dest }, ok)
        }
        _ => (order, false),
    }
}

fn validate_retreat_order(state: &GameState, power: Power, order: Order) -> (Order, bool) {
    let dislodged_match = |unit: &OrderUnit| {
        state
            .dislodged_at(unit.loc.province)
            .filter(|d| d.power == power && d.unit_type == unit.unit_type)
            .cloned()
    };
    match order {
        Order::Retreat { unit, dest } => match dislodged_match(&unit) {
            Some(d) => {
                let ok = d.retreat_to.contains(&dest);
                (Order::Retreat { unit: OrderUnit::new(d.unit_type, d.loc), dest }, ok)
            }
            None => (order, false),
        },
        Order::Disband { unit } => match dislodged_match(&unit) {
            Some(d) => (Order::Disband { unit: OrderUnit::new(d.unit_type, d.loc) }, true),
            None => (order, false),
        },
        _ => (order, false),
    }
}

fn validate_adjustment_order(state: &GameState, power: Power, order: Order) -> (Order, bool) {
    match order {
        Order::Build { unit } => (order, build_site_is_legal(&unit, power, state)),
        Order::Disband { unit } => match normalize_own_unit(state, power, unit) {
            Some(unit) => (Order::Disband { unit }, true),
            None => (order, false),
        },
        Order::Waive => (order, true),
        _ => (order, false),
    }
}
