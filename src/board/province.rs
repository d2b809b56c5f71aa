//! Provinces and powers of the standard Diplomacy map.
//!
//! The 75 provinces are enumerated in alphabetical order of their 3-letter
//! IDs, so `Province as usize` doubles as an array index. All metadata
//! (display name, terrain, supply-center status, home power, split coasts)
//! lives in compile-time tables the engine never mutates.

/// The number of provinces on the standard map.
pub const PROVINCE_COUNT: usize = 75;

/// The number of supply centers on the standard map.
pub const SUPPLY_CENTER_COUNT: usize = 34;

/// Supply centers needed for a solo victory.
pub const SOLO_CENTER_COUNT: usize = 18;

/// A province on the standard map, in alphabetical order by 3-letter ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Province {
    Adr = 0,  // Adriatic Sea
    Aeg = 1,  // Aegean Sea
    Alb = 2,  // Albania
    Ank = 3,  // Ankara
    Apu = 4,  // Apulia
    Arm = 5,  // Armenia
    Bal = 6,  // Baltic Sea
    Bar = 7,  // Barents Sea
    Bel = 8,  // Belgium
    Ber = 9,  // Berlin
    Bla = 10, // Black Sea
    Boh = 11, // Bohemia
    Bot = 12, // Gulf of Bothnia
    Bre = 13, // Brest
    Bud = 14, // Budapest
    Bul = 15, // Bulgaria
    Bur = 16, // Burgundy
    Cly = 17, // Clyde
    Con = 18, // Constantinople
    Den = 19, // Denmark
    Eas = 20, // Eastern Mediterranean
    Edi = 21, // Edinburgh
    Eng = 22, // English Channel
    Fin = 23, // Finland
    Gal = 24, // Galicia
    Gas = 25, // Gascony
    Gol = 26, // Gulf of Lyon
    Gre = 27, // Greece
    Hel = 28, // Heligoland Bight
    Hol = 29, // Holland
    Ion = 30, // Ionian Sea
    Iri = 31, // Irish Sea
    Kie = 32, // Kiel
    Lon = 33, // London
    Lvn = 34, // Livonia
    Lvp = 35, // Liverpool
    Mao = 36, // Mid-Atlantic Ocean
    Mar = 37, // Marseilles
    Mos = 38, // Moscow
    Mun = 39, // Munich
    Naf = 40, // North Africa
    Nao = 41, // North Atlantic Ocean
    Nap = 42, // Naples
    Nrg = 43, // Norwegian Sea
    Nth = 44, // North Sea
    Nwy = 45, // Norway
    Par = 46, // Paris
    Pic = 47, // Picardy
    Pie = 48, // Piedmont
    Por = 49, // Portugal
    Pru = 50, // Prussia
    Rom = 51, // Rome
    Ruh = 52, // Ruhr
    Rum = 53, // Rumania
    Ser = 54, // Serbia
    Sev = 55, // Sevastopol
    Sil = 56, // Silesia
    Ska = 57, // Skagerrak
    Smy = 58, // Smyrna
    Spa = 59, // Spain
    Stp = 60, // St. Petersburg
    Swe = 61, // Sweden
    Syr = 62, // Syria
    Tri = 63, // Trieste
    Tun = 64, // Tunisia
    Tus = 65, // Tuscany
    Tyr = 66, // Tyrolia
    Tys = 67, // Tyrrhenian Sea
    Ukr = 68, // Ukraine
    Ven = 69, // Venice
    Vie = 70, // Vienna
    Wal = 71, // Wales
    War = 72, // Warsaw
    Wes = 73, // Western Mediterranean
    Yor = 74, // Yorkshire
}

/// All provinces in index order.
pub const ALL_PROVINCES: [Province; PROVINCE_COUNT] = [
    Province::Adr, Province::Aeg, Province::Alb, Province::Ank,
    Province::Apu, Province::Arm, Province::Bal, Province::Bar,
    Province::Bel, Province::Ber, Province::Bla, Province::Boh,
    Province::Bot, Province::Bre, Province::Bud, Province::Bul,
    Province::Bur, Province::Cly, Province::Con, Province::Den,
    Province::Eas, Province::Edi, Province::Eng, Province::Fin,
    Province::Gal, Province::Gas, Province::Gol, Province::Gre,
    Province::Hel, Province::Hol, Province::Ion, Province::Iri,
    Province::Kie, Province::Lon, Province::Lvn, Province::Lvp,
    Province::Mao, Province::Mar, Province::Mos, Province::Mun,
    Province::Naf, Province::Nao, Province::Nap, Province::Nrg,
    Province::Nth, Province::Nwy, Province::Par, Province::Pic,
    Province::Pie, Province::Por, Province::Pru, Province::Rom,
    Province::Ruh, Province::Rum, Province::Ser, Province::Sev,
    Province::Sil, Province::Ska, Province::Smy, Province::Spa,
    Province::Stp, Province::Swe, Province::Syr, Province::Tri,
    Province::Tun, Province::Tus, Province::Tyr, Province::Tys,
    Province::Ukr, Province::Ven, Province::Vie, Province::Wal,
    Province::War, Province::Wes, Province::Yor,
];

/// Terrain classification for a province.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Terrain {
    Inland,
    Water,
    Coastal,
}

/// Coast specifier for the three split-coast provinces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Coast {
    None,
    East,
    North,
    South,
}

impl Coast {
    /// Uppercase 2-letter ID, empty for `None`.
    pub const fn abbr(self) -> &'static str {
        match self {
            Coast::None => "",
            Coast::East => "EC",
            Coast::North => "NC",
            Coast::South => "SC",
        }
    }

    /// Parses an uppercase 2-letter coast ID.
    pub fn from_abbr(s: &str) -> Option<Coast> {
        match s {
            "" => Some(Coast::None),
            "EC" => Some(Coast::East),
            "NC" => Some(Coast::North),
            "SC" => Some(Coast::South),
            _ => Option::None,
        }
    }
}

/// One of the seven great powers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum Power {
    Austria = 0,
    England = 1,
    France = 2,
    Germany = 3,
    Italy = 4,
    Russia = 5,
    Turkey = 6,
}

/// The number of powers; also the length of scoring vectors.
pub const POWER_COUNT: usize = 7;

/// All powers in enum order. Scoring vectors follow this order.
pub const ALL_POWERS: [Power; POWER_COUNT] = [
    Power::Austria,
    Power::England,
    Power::France,
    Power::Germany,
    Power::Italy,
    Power::Russia,
    Power::Turkey,
];

impl Power {
    /// Uppercase display name, as used in order maps and snapshots.
    pub const fn name(self) -> &'static str {
        match self {
            Power::Austria => "AUSTRIA",
            Power::England => "ENGLAND",
            Power::France => "FRANCE",
            Power::Germany => "GERMANY",
            Power::Italy => "ITALY",
            Power::Russia => "RUSSIA",
            Power::Turkey => "TURKEY",
        }
    }

    /// Parses a power name, case-insensitively.
    pub fn from_name(name: &str) -> Option<Power> {
        let upper = name.to_ascii_uppercase();
        ALL_POWERS.iter().copied().find(|p| p.name() == upper)
    }

    /// Home supply centers this power may build at.
    pub fn home_centers(self) -> &'static [Province] {
        match self {
            Power::Austria => &[Province::Bud, Province::Tri, Province::Vie],
            Power::England => &[Province::Edi, Province::Lon, Province::Lvp],
            Power::France => &[Province::Bre, Province::Mar, Province::Par],
            Power::Germany => &[Province::Ber, Province::Kie, Province::Mun],
            Power::Italy => &[Province::Nap, Province::Rom, Province::Ven],
            Power::Russia => &[Province::Mos, Province::Sev, Province::Stp, Province::War],
            Power::Turkey => &[Province::Ank, Province::Con, Province::Smy],
        }
    }
}

/// Static metadata for one province.
pub struct ProvinceInfo {
    pub abbr: &'static str,
    pub name: &'static str,
    pub terrain: Terrain,
    pub supply_center: bool,
    pub home: Option<Power>,
    pub coasts: &'static [Coast],
}

const fn info(
    abbr: &'static str,
    name: &'static str,
    terrain: Terrain,
    supply_center: bool,
    home: Option<Power>,
    coasts: &'static [Coast],
) -> ProvinceInfo {
    ProvinceInfo { abbr, name, terrain, supply_center, home, coasts }
}

use Terrain::{Coastal, Inland, Water};

/// Province metadata table, indexed by `Province as usize`.
pub static PROVINCE_INFO: [ProvinceInfo; PROVINCE_COUNT] = [
    info("ADR", "Adriatic Sea", Water, false, None, &[]),
    info("AEG", "Aegean Sea", Water, false, None, &[]),
    info("ALB", "Albania", Coastal, false, None, &[]),
    info("ANK", "Ankara", Coastal, true, Some(Power::Turkey), &[]),
    info("APU", "Apulia", Coastal, false, None, &[]),
    info("ARM", "Armenia", Coastal, false, None, &[]),
    info("BAL", "Baltic Sea", Water, false, None, &[]),
    info("BAR", "Barents Sea", Water, false, None, &[]),
    info("BEL", "Belgium", Coastal, true, None, &[]),
    info("BER", "Berlin", Coastal, true, Some(Power::Germany), &[]),
    info("BLA", "Black Sea", Water, false, None, &[]),
    info("BOH", "Bohemia", Inland, false, None, &[]),
    info("BOT", "Gulf of Bothnia", Water, false, None, &[]),
    info("BRE", "Brest", Coastal, true, Some(Power::France), &[]),
    info("BUD", "Budapest", Inland, true, Some(Power::Austria), &[]),
    info("BUL", "Bulgaria", Coastal, true, None, &[Coast::East, Coast::South]),
    info("BUR", "Burgundy", Inland, false, None, &[]),
    info("CLY", "Clyde", Coastal, false, None, &[]),
    info("CON", "Constantinople", Coastal, true, Some(Power::Turkey), &[]),
    info("DEN", "Denmark", Coastal, true, None, &[]),
    info("EAS", "Eastern Mediterranean", Water, false, None, &[]),
    info("EDI", "Edinburgh", Coastal, true, Some(Power::England), &[]),
    info("ENG", "English Channel", Water, false, None, &[]),
    info("FIN", "Finland", Coastal, false, None, &[]),
    info("GAL", "Galicia", Inland, false, None, &[]),
    info("GAS", "Gascony", Coastal, false, None, &[]),
    info("GOL", "Gulf of Lyon", Water, false, None, &[]),
    info("GRE", "Greece", Coastal, true, None, &[]),
    info("HEL", "Heligoland Bight", Water, false, None, &[]),
    info("HOL", "Holland", Coastal, true, None, &[]),
    info("ION", "Ionian Sea", Water, false, None, &[]),
    info("IRI", "Irish Sea", Water, false, None, &[]),
    info("KIE", "Kiel", Coastal, true, Some(Power::Germany), &[]),
    info("LON", "London", Coastal, true, Some(Power::England), &[]),
    info("LVN", "Livonia", Coastal, false, None, &[]),
    info("LVP", "Liverpool", Coastal, true, Some(Power::England), &[]),
    info("MAO", "Mid-Atlantic Ocean", Water, false, None, &[]),
    info("MAR", "Marseilles", Coastal, true, Some(Power::France), &[]),
    info("MOS", "Moscow", Inland, true, Some(Power::Russia), &[]),
    info("MUN", "Munich", Inland, true, Some(Power::Germany), &[]),
    info("NAF", "North Africa", Coastal, false, None, &[]),
    info("NAO", "North Atlantic Ocean", Water, false, None, &[]),
    info("NAP", "Naples", Coastal, true, Some(Power::Italy), &[]),
    info("NRG", "Norwegian Sea", Water, false, None, &[]),
    info("NTH", "North Sea", Water, false, None, &[]),
    info("NWY", "Norway", Coastal, true, None, &[]),
    info("PAR", "Paris", Inland, true, Some(Power::France), &[]),
    info("PIC", "Picardy", Coastal, false, None, &[]),
    info("PIE", "Piedmont", Coastal, false, None, &[]),
    info("POR", "Portugal", Coastal, true, None, &[]),
    info("PRU", "Prussia", Coastal, false, None, &[]),
    info("ROM", "Rome", Coastal, true, Some(Power::Italy), &[]),
    info("RUH", "Ruhr", Inland, false, None, &[]),
    info("RUM", "Rumania", Coastal, true, None, &[]),
    info("SER", "Serbia", Inland, true, None, &[]),
    info("SEV", "Sevastopol", Coastal, true, Some(Power::Russia), &[]),
    info("SIL", "Silesia", Inland, false, None, &[]),
    info("SKA", "Skagerrak", Water, false, None, &[]),
    info("SMY", "Smyrna", Coastal, true, Some(Power::Turkey), &[]),
    info("SPA", "Spain", Coastal, true, None, &[Coast::North, Coast::South]),
    info("STP", "St. Petersburg", Coastal, true, Some(Power::Russia), &[Coast::North, Coast::South]),
    info("SWE", "Sweden", Coastal, true, None, &[]),
    info("SYR", "Syria", Coastal, false, None, &[]),
    info("TRI", "Trieste", Coastal, true, Some(Power::Austria), &[]),
    info("TUN", "Tunisia", Coastal, true, None, &[]),
    info("TUS", "Tuscany", Coastal, false, None, &[]),
    info("TYR", "Tyrolia", Inland, false, None, &[]),
    info("TYS", "Tyrrhenian Sea", Water, false, None, &[]),
    info("UKR", "Ukraine", Inland, false, None, &[]),
    info("VEN", "Venice", Coastal, true, Some(Power::Italy), &[]),
    info("VIE", "Vienna", Inland, true, Some(Power::Austria), &[]),
    info("WAL", "Wales", Coastal, false, None, &[]),
    info("WAR", "Warsaw", Inland, true, Some(Power::Russia), &[]),
    info("WES", "Western Mediterranean", Water, false, None, &[]),
    info("YOR", "Yorkshire", Coastal, false, None, &[]),
];

impl Province {
    /// Uppercase 3-letter ID.
    pub const fn abbr(self) -> &'static str {
        PROVINCE_INFO[self as usize].abbr
    }

    /// Full display name.
    pub const fn name(self) -> &'static str {
        PROVINCE_INFO[self as usize].name
    }

    pub const fn terrain(self) -> Terrain {
        PROVINCE_INFO[self as usize].terrain
    }

    pub const fn is_supply_center(self) -> bool {
        PROVINCE_INFO[self as usize].supply_center
    }

    /// The power whose home center this is, if any.
    pub const fn home_power(self) -> Option<Power> {
        PROVINCE_INFO[self as usize].home
    }

    /// The split coasts of this province; empty for single-coast provinces.
    pub const fn coasts(self) -> &'static [Coast] {
        PROVINCE_INFO[self as usize].coasts
    }

    pub const fn has_split_coasts(self) -> bool {
        !PROVINCE_INFO[self as usize].coasts.is_empty()
    }

    /// Looks up a province by 3-letter ID, case-insensitively.
    pub fn from_abbr(abbr: &str) -> Option<Province> {
        let upper = abbr.to_ascii_uppercase();
        ALL_PROVINCES.iter().copied().find(|p| p.abbr() == upper)
    }

    /// Converts an index back to a `Province`, if in range.
    pub fn from_index(idx: usize) -> Option<Province> {
        ALL_PROVINCES.get(idx).copied()
    }
}
