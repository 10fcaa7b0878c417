//! Great-circle distances and spatial indexing.

pub mod index;
pub mod queries;

pub use queries::{haversine_km, EARTH_RADIUS_KM};
