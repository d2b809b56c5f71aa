//! Canonical board locations.
//!
//! A `Loc` is a province plus an optional coast. The standard map has 81
//! of them: the 75 provinces and the six coasted variants of Bulgaria,
//! Spain, and St. Petersburg. Locs carry a fixed alphabetical index 0-80
//! (coasted variants sort directly after their parents: BUL < BUL/EC <
//! BUL/SC < BUR) which scoring vectors and the board hash rely on.

use std::fmt;
use std::str::FromStr;

use super::province::{Coast, Province, ALL_PROVINCES, PROVINCE_COUNT};

/// The number of canonical locations (provinces plus coasted variants).
pub const LOC_COUNT: usize = 81;

/// A location: a province, with a coast on the three split-coast provinces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Loc {
    pub province: Province,
    pub coast: Coast,
}

impl Loc {
    /// A plain province location.
    pub const fn new(province: Province) -> Self {
        Loc { province, coast: Coast::None }
    }

    /// A coasted location.
    pub const fn with_coast(province: Province, coast: Coast) -> Self {
        Loc { province, coast }
    }

    /// The parent location: same province, no coast.
    pub const fn parent(self) -> Loc {
        Loc::new(self.province)
    }

    /// The fixed alphabetical index (0-80).
    pub fn index(self) -> usize {
        let base = BASE_LOC_INDEX[self.province as usize] as usize;
        if self.coast == Coast::None {
            return base;
        }
        // coasts() lists a province's coasts in alphabetical order of
        // their 2-letter IDs, matching the canonical loc ordering.
        match self.province.coasts().iter().position(|c| *c == self.coast) {
            Some(pos) => base + pos + 1,
            None => base,
        }
    }

    /// The loc at the given canonical index, if in range.
    pub fn from_index(idx: usize) -> Option<Loc> {
        ALL_LOCS.get(idx).copied()
    }

    /// Parses `PROV` or `PROV/COAST`, case-insensitively.
    pub fn parse(s: &str) -> Option<Loc> {
        match s.split_once('/') {
            Some((prov, coast)) => {
                let province = Province::from_abbr(prov)?;
                let coast = Coast::from_abbr(&coast.to_ascii_uppercase())?;
                if coast == Coast::None || !province.coasts().contains(&coast) {
                    return None;
                }
                Some(Loc::with_coast(province, coast))
            }
            None => Province::from_abbr(s).map(Loc::new),
        }
    }
}

impl fmt::Display for Loc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.coast == Coast::None {
            write!(f, "{}", self.province.abbr())
        } else {
            write!(f, "{}/{}", self.province.abbr(), self.coast.abbr())
        }
    }
}

impl FromStr for Loc {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Loc::parse(s).ok_or(())
    }
}

/// Canonical index of each province's plain loc, indexed by `Province as usize`.
static BASE_LOC_INDEX: [u8; PROVINCE_COUNT] = [
    0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15, 18, 19, 20, 21,
    22, 23, 24, 25, 26, 27, 28, 29, 30, 31, 32, 33, 34, 35, 36, 37, 38, 39,
    40, 41, 42, 43, 44, 45, 46, 47, 48, 49, 50, 51, 52, 53, 54, 55, 56, 57,
    58, 59, 60, 61, 64, 67, 68, 69, 70, 71, 72, 73, 74, 75, 76, 77, 78, 79,
    80,
];

/// All 81 locs in canonical index order.
pub static ALL_LOCS: [Loc; LOC_COUNT] = {
    let mut locs = [Loc::new(Province::Adr); LOC_COUNT];
    let mut i = 0;
    let mut p = 0;
    while p < PROVINCE_COUNT {
        let province = ALL_PROVINCES[p];
        locs[i] = Loc::new(province);
        i += 1;
        let coasts = province.coasts();
        let mut c = 0;
        while c < coasts.len() {
            locs[i] = Loc::with_coast(province, coasts[c]);
            i += 1;
            c += 1;
        }
        p += 1;
    }
    locs
};
