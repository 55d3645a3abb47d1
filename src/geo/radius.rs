//! Spherical-cap radius math

use serde::{Deserialize, Serialize};

/// Earth's mean radius in kilometers
pub const EARTH_RADIUS_KM: f64 = 6378.0;

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Convert a surface distance in kilometers into an angular radius in
/// radians
pub fn angular_radius(distance_km: f64) -> f64 {
    distance_km / EARTH_RADIUS_KM
}

/// Haversine central angle between two points, in radians. A point lies
/// within a spherical cap when its central angle from the center is at most
/// the cap's angular radius.
pub fn central_angle(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);

    2.0 * h.sqrt().asin()
}
