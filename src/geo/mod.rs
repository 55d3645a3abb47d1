//! # Geospatial Lookup
//!
//! Postal-code geocoding and the spherical-cap radius math behind
//! `/bootcamps/radius/{zipcode}/{distance}`.

pub mod geocoder;
pub mod radius;

pub use geocoder::{Geocoder, HttpGeocoder, StaticGeocoder};
pub use radius::{angular_radius, central_angle, GeoPoint, EARTH_RADIUS_KM};
