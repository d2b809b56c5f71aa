//! Canonical order notation.
//!
//! Parses and formats orders in the canonical string form the engine
//! adjudicates and emits:
//!
//! ```text
//! A PAR H
//! A PAR - BUR
//! A LON - NWY VIA
//! A MUN S F KIE
//! A MUN S F KIE - BER
//! F MAO C A BRE - LON
//! A SER R ALB
//! F TRI D
//! F STP/SC B
//! WAIVE
//! ```
//!
//! Input is tolerant of case and surplus whitespace; output is always the
//! canonical uppercase form.

use thiserror::Error;

use crate::board::loc::Loc;
use crate::board::order::{Order, OrderUnit};
use crate::board::unit::UnitType;

/// Errors produced while parsing an order string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty order string")]
    Empty,

    #[error("unknown unit type '{0}'")]
    BadUnitType(String),

    #[error("unknown location '{0}'")]
    BadLocation(String),

    #[error("unknown action '{0}'")]
    BadAction(String),

    #[error("order ends early, expected {0}")]
    Truncated(&'static str),

    #[error("unexpected token '{found}', expected {expected}")]
    Unexpected { expected: &'static str, found: String },
}

/// Parses one order string.
pub fn parse_order(s: &str) -> Result<Order, NotationError> {
    let upper = s.trim().to_ascii_uppercase();
    let tokens: Vec<&str> = upper.split_whitespace().collect();
    if tokens.is_empty() {
        return Err(NotationError::Empty);
    }

    if tokens == ["WAIVE"] {
        return Ok(Order::Waive);
    }

    let unit = parse_unit(&tokens, 0)?;
    let action = tokens.get(2).ok_or(NotationError::Truncated("an action"))?;

    match *action {
        "H" => expect_end(&tokens, 3).map(|_| Order::Hold { unit }),

        "-" => {
            let dest = parse_loc(&tokens, 3)?;
            match tokens.get(4) {
                None => Ok(Order::Move { unit, dest, via_convoy: false }),
                Some(&"VIA") => {
                    expect_end(&tokens, 5).map(|_| Order::Move { unit, dest, via_convoy: true })
                }
                Some(t) => Err(NotationError::Unexpected {
                    expected: "VIA or end of order",
                    found: t.to_string(),
                }),
            }
        }

        "S" => {
            let target = parse_unit(&tokens, 3)?;
            match tokens.get(5) {
                None => Ok(Order::SupportHold { unit, target }),
                Some(&"-") => {
                    let dest = parse_loc(&tokens, 6)?;
                    expect_end(&tokens, 7).map(|_| Order::SupportMove { unit, target, dest })
                }
                Some(t) => Err(NotationError::Unexpected {
                    expected: "'-' or end of order",
                    found: t.to_string(),
                }),
            }
        }

        "C" => {
            let army = parse_unit(&tokens, 3)?;
            match tokens.get(5) {
                Some(&"-") => {}
                Some(t) => {
                    return Err(NotationError::Unexpected { expected: "'-'", found: t.to_string() })
                }
                None => return Err(NotationError::Truncated("'-' and a destination")),
            }
            let dest = parse_loc(&tokens, 6)?;
            expect_end(&tokens, 7).map(|_| Order::Convoy { unit, army, dest })
        }

        "R" => {
            let dest = parse_loc(&tokens, 3)?;
            expect_end(&tokens, 4).map(|_| Order::Retreat { unit, dest })
        }

        "D" => expect_end(&tokens, 3).map(|_| Order::Disband { unit }),

        "B" => expect_end(&tokens, 3).map(|_| Order::Build { unit }),

        other => Err(NotationError::BadAction(other.to_string())),
    }
}

/// Formats an order in its canonical form.
pub fn format_order(order: &Order) -> String {
    match order {
        Order::Hold { unit } => format!("{} H", unit_str(unit)),
        Order::Move { unit, dest, via_convoy } => {
            if *via_convoy {
                format!("{} - {} VIA", unit_str(unit), dest)
            } else {
                format!("{} - {}", unit_str(unit), dest)
            }
        }
        Order::SupportHold { unit, target } => {
            format!("{} S {}", unit_str(unit), unit_str(target))
        }
        Order::SupportMove { unit, target, dest } => {
            format!("{} S {} - {}", unit_str(unit), unit_str(target), dest)
        }
        Order::Convoy { unit, army, dest } => {
            format!("{} C {} - {}", unit_str(unit), unit_str(army), dest)
        }
        Order::Retreat { unit, dest } => format!("{} R {}", unit_str(unit), dest),
        Order::Disband { unit } => format!("{} D", unit_str(unit)),
        Order::Build { unit } => format!("{} B", unit_str(unit)),
        Order::Waive => "WAIVE".to_string(),
    }
}

fn unit_str(unit: &OrderUnit) -> String {
    format!("{} {}", unit.unit_type.letter(), unit.loc)
}

fn parse_unit(tokens: &[&str], at: usize) -> Result<OrderUnit, NotationError> {
    let type_tok = tokens.get(at).ok_or(NotationError::Truncated("a unit"))?;
    let unit_type = match *type_tok {
        "A" => UnitType::Army,
        "F" => UnitType::Fleet,
        other => return Err(NotationError::BadUnitType(other.to_string())),
    };
    let loc = parse_loc(tokens, at + 1)?;
    Ok(OrderUnit::new(unit_type, loc))
}

fn parse_loc(tokens: &[&str], at: usize) -> Result<Loc, NotationError> {
    let tok = tokens.get(at).ok_or(NotationError::Truncated("a location"))?;
    Loc::parse(tok).ok_or_else(|| NotationError::BadLocation(tok.to_string()))
}

fn expect_end(tokens: &[&str], at: usize) -> Result<(), NotationError> {
    match tokens.get(at) {
        None => Ok(()),
        Some(t) => Err(NotationError::Unexpected {
            expected: "end of order",
            found: t.to_string(),
        }),
    }
}
