//! Entente: a server-side rules engine for the board game Diplomacy.
//!
//! The engine ingests submitted orders for the current phase and advances
//! the game deterministically: movement adjudication (with full convoy
//! and paradox handling), retreats, winter adjustments with civil
//! disorder, phase elision, history, rollback, and JSON snapshots.

pub mod board;
pub mod codec;
pub mod game;
pub mod movegen;
pub mod resolve;

pub use board::{Coast, Loc, Order, Phase, PhaseKind, Power, Province, Season, Unit, UnitType};
pub use game::{board_hash, Clock, Game, GameConfig, GameError, Message, OrderRecord, SystemClock};
