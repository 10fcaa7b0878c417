//! Distance calculations on the Earth's surface.
//!
//! Uses the Haversine formula on a sphere of radius 6371 km.

use crate::models::types::Coordinate;

/// Mean Earth radius used by every distance in the planner
pub const EARTH_RADIUS_KM: f64 = 6371.0;

const KM_PER_DEGREE: f64 = 111.32;

/// Great-circle distance between two coordinates in kilometres
pub fn haversine_km(a: Coordinate, b: Coordinate) -> f64 {
    let lat1 = a.lat().to_radians();
    let lat2 = b.lat().to_radians();
    let dlat = lat2 - lat1;
    let dlng = (b.lng() - a.lng()).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);

    2.0 * h.sqrt().asin() * EARTH_RADIUS_KM
}

/// Round a distance to two decimals for display
pub fn round_km(km: f64) -> f64 {
    (km * 100.0).round() / 100.0
}

/// Convert kilometres to approximate degrees of latitude
pub fn km_to_degrees_approx(km: f64) -> f64 {
    km / KM_PER_DEGREE
}

/// Search radius in degree space that covers `km` around `latitude`.
///
/// Longitude degrees shrink towards the poles, so the radius is widened by 1/cos(lat).
pub fn search_radius_degrees(km: f64, latitude: f64) -> f64 {
    let shrink = latitude.to_radians().cos().max(0.01);
    km_to_degrees_approx(km) / shrink
}
