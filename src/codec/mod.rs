//! External representations: the canonical order notation and the JSON
//! snapshot format.

pub mod notation;
pub mod snapshot;

pub use notation::{format_order, parse_order, NotationError};
pub use snapshot::{from_json, to_json, SnapshotError};
