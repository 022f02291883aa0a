//! Structured hand-off documents for downstream consumers.

mod map;

pub use map::{network_map, write_network_map, MapFlow, MapPoint, MapSite, NetworkMap};
