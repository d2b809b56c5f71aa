//! Game phases.
//!
//! A phase is (season, year, kind). Phases are totally ordered by
//! (year, season, kind), which is the order they can occur in a game:
//! S1901M < S1901R < F1901M < F1901R < W1901A < S1902M. Retreat and
//! adjustment phases are skipped when nothing needs resolving, but the
//! ordering is unaffected.

use std::fmt;
use std::str::FromStr;

/// The season of a phase. Winter carries only the adjustment phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Season {
    Spring,
    Fall,
    Winter,
}

impl Season {
    pub const fn letter(self) -> char {
        match self {
            Season::Spring => 'S',
            Season::Fall => 'F',
            Season::Winter => 'W',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Season::Spring => "SPRING",
            Season::Fall => "FALL",
            Season::Winter => "WINTER",
        }
    }

    pub fn from_letter(c: char) -> Option<Season> {
        match c.to_ascii_uppercase() {
            'S' => Some(Season::Spring),
            'F' => Some(Season::Fall),
            'W' => Some(Season::Winter),
            _ => None,
        }
    }
}

/// What gets resolved in a phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PhaseKind {
    Movement,
    Retreat,
    Adjustment,
}

impl PhaseKind {
    pub const fn letter(self) -> char {
        match self {
            PhaseKind::Movement => 'M',
            PhaseKind::Retreat => 'R',
            PhaseKind::Adjustment => 'A',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            PhaseKind::Movement => "MOVEMENT",
            PhaseKind::Retreat => "RETREAT",
            PhaseKind::Adjustment => "ADJUSTMENT",
        }
    }

    pub fn from_letter(c: char) -> Option<PhaseKind> {
        match c.to_ascii_uppercase() {
            'M' => Some(PhaseKind::Movement),
            'R' => Some(PhaseKind::Retreat),
            'A' => Some(PhaseKind::Adjustment),
            _ => None,
        }
    }
}

/// A game phase. Field order gives the derived `Ord` chronological meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Phase {
    pub year: u16,
    pub season: Season,
    pub kind: PhaseKind,
}

impl Phase {
    pub const fn new(season: Season, year: u16, kind: PhaseKind) -> Self {
        Phase { year, season, kind }
    }

    /// The opening phase of a standard game.
    pub const fn initial() -> Self {
        Phase::new(Season::Spring, 1901, PhaseKind::Movement)
    }

    /// Short form, e.g. `S1901M`.
    pub fn short(&self) -> String {
        format!("{}{}{}", self.season.letter(), self.year, self.kind.letter())
    }

    /// Long form, e.g. `SPRING 1901 MOVEMENT`.
    pub fn long(&self) -> String {
        format!("{} {} {}", self.season.name(), self.year, self.kind.name())
    }

    /// Parses either the short or the long form.
    pub fn parse(s: &str) -> Option<Phase> {
        let s = s.trim();
        let parts: Vec<&str> = s.split_whitespace().collect();
        if parts.len() == 3 {
            let season = match parts[0].to_ascii_uppercase().as_str() {
                "SPRING" => Season::Spring,
                "FALL" => Season::Fall,
                "WINTER" => Season::Winter,
                _ => return None,
            };
            let year: u16 = parts[1].parse().ok()?;
            let kind = match parts[2].to_ascii_uppercase().as_str() {
                "MOVEMENT" => PhaseKind::Movement,
                "RETREAT" => PhaseKind::Retreat,
                "ADJUSTMENT" => PhaseKind::Adjustment,
                _ => return None,
            };
            return Some(Phase::new(season, year, kind));
        }
        if parts.len() == 1 && s.len() >= 6 && s.is_ascii() {
            let mut chars = s.chars();
            let season = Season::from_letter(chars.next()?)?;
            let kind = PhaseKind::from_letter(s.chars().last()?)?;
            let year: u16 = s[1..s.len() - 1].parse().ok()?;
            return Some(Phase::new(season, year, kind));
        }
        None
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short())
    }
}

impl FromStr for Phase {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Phase::parse(s).ok_or(())
    }
}
