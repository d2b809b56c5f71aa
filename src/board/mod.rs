//! Board representation: provinces, locations, adjacency, units, orders,
//! phases, and full board snapshots.

pub mod adjacency;
pub mod loc;
pub mod order;
pub mod phase;
pub mod province;
pub mod state;
pub mod unit;

pub use adjacency::{
    army_neighbors, can_move, fleet_coasts_to, fleet_edges, reachable_locs, FleetEdge, Neighbors,
    NEIGHBORS,
};
pub use loc::{Loc, ALL_LOCS, LOC_COUNT};
pub use order::{Order, OrderUnit};
pub use phase::{Phase, PhaseKind, Season};
pub use province::{
    Coast, Power, Province, ProvinceInfo, Terrain, ALL_POWERS, ALL_PROVINCES, POWER_COUNT,
    PROVINCE_COUNT, PROVINCE_INFO, SOLO_CENTER_COUNT, SUPPLY_CENTER_COUNT,
};
pub use state::{DislodgedUnit, GameState};
pub use unit::{Unit, UnitType};
