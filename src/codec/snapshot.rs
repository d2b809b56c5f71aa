//! JSON snapshots.
//!
//! Serializes a full game (current state, histories, messages, logs) to a
//! stable JSON document and restores it, validating consistency on the
//! way back in. Map keys are BTreeMaps throughout, so output ordering is
//! deterministic and the round trip is exact.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::board::loc::Loc;
use crate::board::phase::Phase;
use crate::board::province::{Power, Province, ALL_POWERS, ALL_PROVINCES};
use crate::board::state::{DislodgedUnit, GameState};
use crate::board::unit::UnitType;
use crate::game::{Game, Message, OrderRecord};

/// Errors raised while loading a snapshot.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unknown phase '{0}'")]
    BadPhase(String),

    #[error("unknown power '{0}'")]
    BadPower(String),

    #[error("bad unit '{0}'")]
    BadUnit(String),

    #[error("bad location '{0}'")]
    BadLocation(String),

    #[error("two units occupy {0}")]
    DoubleOccupancy(String),

    #[error("'{0}' is not a supply center")]
    NotACenter(String),

    #[error("bad message timestamp '{0}'")]
    BadTimestamp(String),

    #[error("history phase {0} does not precede {1}")]
    PhaseOrder(String, String),

    #[error("orders recorded for {0} but no state archived")]
    OrphanOrders(String),
}

#[derive(Serialize, Deserialize)]
struct GameDto {
    id: String,
    map: String,
    rules: Vec<String>,
    phase: String,
    state: StateDto,
    state_history: BTreeMap<String, StateDto>,
    order_history: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    messages: BTreeMap<String, BTreeMap<String, MessageDto>>,
    logs: BTreeMap<String, Vec<String>>,
}

#[derive(Serialize, Deserialize)]
struct StateDto {
    units: BTreeMap<String, Vec<String>>,
    retreats: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    centers: BTreeMap<String, Vec<String>>,
    homes: BTreeMap<String, Vec<String>>,
    influence: BTreeMap<String, Vec<String>>,
    civil_disorder: BTreeMap<String, u8>,
    builds: BTreeMap<String, BuildsDto>,
}

#[derive(Serialize, Deserialize)]
struct BuildsDto {
    count: i32,
    homes: Vec<String>,
}

/// The timestamp lives in the enclosing map key.
#[derive(Serialize, Deserialize)]
struct MessageDto {
    sender: String,
    recipient: String,
    body: String,
}

/// Serializes the game to its snapshot JSON document.
pub fn to_json(game: &Game) -> String {
    let dto = GameDto {
        id: game.game_id.clone(),
        map: "standard".to_string(),
        rules: game.rules.clone(),
        phase: game.state.phase.short(),
        state: state_to_dto(&game.state),
        state_history: game
            .state_history
            .iter()
            .map(|(p, s)| (p.short(), state_to_dto(s)))
            .collect(),
        order_history: game
            .order_history
            .iter()
            .map(|(p, by_power)| {
                let orders = by_power
                    .iter()
                    .map(|(power, records)| {
                        (
                            power.name().to_string(),
                            records.iter().map(|r| r.text.clone()).collect(),
                        )
                    })
                    .collect();
                (p.short(), orders)
            })
            .collect(),
        messages: game
            .message_history
            .iter()
            .map(|(p, msgs)| {
                let msgs = msgs
                    .iter()
                    .map(|(ts, m)| {
                        (
                            ts.to_string(),
                            MessageDto {
                                sender: m.sender.clone(),
                                recipient: m.recipient.clone(),
                                body: m.body.clone(),
                            },
                        )
                    })
                    .collect();
                (p.short(), msgs)
            })
            .collect(),
        logs: game.log_history.iter().map(|(p, l)| (p.short(), l.clone())).collect(),
    };
    serde_json::to_string(&dto).expect("snapshot serialization cannot fail")
}

/// Restores a game from a snapshot JSON document.
pub fn from_json(json: &str) -> Result<Game, SnapshotError> {
    let dto: GameDto = serde_json::from_str(json)?;

    let current_phase = parse_phase(&dto.phase)?;
    let state = dto_to_state(&dto.state, current_phase)?;

    let mut state_history = BTreeMap::new();
    for (key, sdto) in &dto.state_history {
        let phase = parse_phase(key)?;
        state_history.insert(phase, dto_to_state(sdto, phase)?);
    }
    validate_phase_chain(&state_history, current_phase)?;

    let mut order_history = BTreeMap::new();
    for (key, by_power) in &dto.order_history {
        let phase = parse_phase(key)?;
        let archived = state_history
            .get(&phase)
            .ok_or_else(|| SnapshotError::OrphanOrders(key.clone()))?;
        let mut records: BTreeMap<Power, Vec<OrderRecord>> = BTreeMap::new();
        for (power_name, texts) in by_power {
            let power = parse_power(power_name)?;
            records.insert(
                power,
                texts.iter().map(|t| crate::game::revalidate(archived, power, t)).collect(),
            );
        }
        order_history.insert(phase, records);
    }

    let mut message_history = BTreeMap::new();
    for (key, msgs) in &dto.messages {
        let phase = parse_phase(key)?;
        let mut parsed: BTreeMap<u64, Message> = BTreeMap::new();
        for (ts, m) in msgs {
            let ts: u64 =
                ts.parse().map_err(|_| SnapshotError::BadTimestamp(ts.clone()))?;
            parsed.insert(
                ts,
                Message {
                    sender: m.sender.clone(),
                    recipient: m.recipient.clone(),
                    body: m.body.clone(),
                    time_sent: ts,
                },
            );
        }
        message_history.insert(phase, parsed);
    }

    let mut log_history = BTreeMap::new();
    for (key, lines) in &dto.logs {
        log_history.insert(parse_phase(key)?, lines.clone());
    }

    let mut game = Game::new(dto.id);
    game.rules = dto.rules;
    game.state = state;
    game.state_history = state_history;
    game.order_history = order_history;
    game.message_history = message_history;
    game.log_history = log_history;
    Ok(game)
}

fn state_to_dto(state: &GameState) -> StateDto {
    let mut units = BTreeMap::new();
    let mut retreats = BTreeMap::new();
    let mut centers = BTreeMap::new();
    let mut homes = BTreeMap::new();
    let mut influence = BTreeMap::new();
    let mut civil_disorder = BTreeMap::new();
    let mut builds = BTreeMap::new();

    for &power in &ALL_POWERS {
        let name = power.name().to_string();

        units.insert(
            name.clone(),
            state.units_of(power).iter().map(|u| u.to_string()).collect(),
        );

        let mut power_retreats = BTreeMap::new();
        for d in &state.dislodged {
            if d.power != power {
                continue;
            }
            power_retreats.insert(
                format!("{} {}", d.unit_type.letter(), d.loc),
                d.retreat_to.iter().map(|l| l.to_string()).collect(),
            );
        }
        retreats.insert(name.clone(), power_retreats);

        centers.insert(
            name.clone(),
            state.centers_of(power).iter().map(|p| p.abbr().to_string()).collect(),
        );
        homes.insert(
            name.clone(),
            power.home_centers().iter().map(|p| p.abbr().to_string()).collect(),
        );
        influence.insert(
            name.clone(),
            ALL_PROVINCES
                .iter()
                .filter(|p| state.influence[**p as usize] == Some(power))
                .map(|p| p.abbr().to_string())
                .collect(),
        );
        civil_disorder.insert(name.clone(), state.civil_disorder[power as usize] as u8);

        let delta = state.adjustment_delta(power);
        let buildable: Vec<String> = state
            .buildable_homes(power)
            .iter()
            .map(|p| p.abbr().to_string())
            .collect();
        let count = if delta > 0 { delta.min(buildable.len() as i32) } else { delta };
        builds.insert(name, BuildsDto { count, homes: if delta > 0 { buildable } else { vec![] } });
    }

    StateDto { units, retreats, centers, homes, influence, civil_disorder, builds }
}

fn dto_to_state(dto: &StateDto, phase: Phase) -> Result<GameState, SnapshotError> {
    let mut state = GameState::empty(phase);

    for (power_name, unit_strs) in &dto.units {
        let power = parse_power(power_name)?;
        for s in unit_strs {
            let (unit_type, loc) = parse_unit_str(s)?;
            if !state.place_unit(power, unit_type, loc) {
                return Err(SnapshotError::DoubleOccupancy(loc.province.abbr().to_string()));
            }
        }
    }

    for (power_name, center_strs) in &dto.centers {
        let power = parse_power(power_name)?;
        for s in center_strs {
            let province = parse_province(s)?;
            if !province.is_supply_center() {
                return Err(SnapshotError::NotACenter(s.clone()));
            }
            state.sc_owner[province as usize] = Some(power);
        }
    }

    // Influence overrides whatever unit placement recorded, since it
    // reflects the game's full past, not just current positions.
    let mut influence = [None; crate::board::province::PROVINCE_COUNT];
    for (power_name, provs) in &dto.influence {
        let power = parse_power(power_name)?;
        for s in provs {
            influence[parse_province(s)? as usize] = Some(power);
        }
    }
    state.influence = influence;

    for (power_name, flag) in &dto.civil_disorder {
        let power = parse_power(power_name)?;
        state.civil_disorder[power as usize] = *flag != 0;
    }

    for (power_name, by_unit) in &dto.retreats {
        let power = parse_power(power_name)?;
        for (unit_str, dests) in by_unit {
            let (unit_type, loc) = parse_unit_str(unit_str)?;
            let retreat_to = dests
                .iter()
                .map(|d| parse_loc(d))
                .collect::<Result<Vec<Loc>, SnapshotError>>()?;
            state.dislodged.push(DislodgedUnit { power, unit_type, loc, retreat_to });
        }
    }
    state.dislodged.sort_by_key(|d| d.loc.index());

    // `homes` and `builds` are derived on the standard map; their content
    // is not trusted beyond parsing.
    Ok(state)
}

/// The archived phases must strictly precede the current one, with no
/// year skipped along the way.
fn validate_phase_chain(
    history: &BTreeMap<Phase, GameState>,
    current: Phase,
) -> Result<(), SnapshotError> {
    let mut previous: Option<Phase> = None;
    for phase in history.keys().copied().chain(std::iter::once(current)) {
        if let Some(prev) = previous {
            if phase <= prev || phase.year > prev.year + 1 {
                return Err(SnapshotError::PhaseOrder(prev.short(), phase.short()));
            }
        }
        previous = Some(phase);
    }
    Ok(())
}

fn parse_phase(s: &str) -> Result<Phase, SnapshotError> {
    Phase::parse(s).ok_or_else(|| SnapshotError::BadPhase(s.to_string()))
}

fn parse_power(s: &str) -> Result<Power, SnapshotError> {
    Power::from_name(s).ok_or_else(|| SnapshotError::BadPower(s.to_string()))
}

fn parse_province(s: &str) -> Result<Province, SnapshotError> {
    Province::from_abbr(s).ok_or_else(|| SnapshotError::BadLocation(s.to_string()))
}

fn parse_loc(s: &str) -> Result<Loc, SnapshotError> {
    Loc::parse(s).ok_or_else(|| SnapshotError::BadLocation(s.to_string()))
}

/// Parses `A PAR` / `F STP/SC`.
fn parse_unit_str(s: &str) -> Result<(UnitType, Loc), SnapshotError> {
    let bad = || SnapshotError::BadUnit(s.to_string());
    let (type_str, loc_str) = s.trim().split_once(' ').ok_or_else(bad)?;
    let unit_type = match type_str {
        "A" => UnitType::Army,
        "F" => UnitType::Fleet,
        _ => return Err(bad()),
    };
    let loc = Loc::parse(loc_str.trim()).ok_or_else(bad)?;
    Ok((unit_type, loc))
}
