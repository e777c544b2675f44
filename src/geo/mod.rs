//! Place-name resolution pipeline.
//!
//! Turns free-text Swedish provenance descriptions into bounded, deduplicated
//! coordinate lists.
//!
//! ## Module Structure
//!
//! - `cache`: Persistent query → candidates store
//! - `bounds`: Region bounding boxes and the containment test
//! - `normalize`: Provenance/region text cleanup and splitting
//! - `geocoder`: External geocoding backends
//! - `resolver`: Single place lookup with bounds validation and fallback
//! - `locations`: Multi-part provenance resolution and proximity clustering

pub mod bounds;
pub mod cache;
pub mod geocoder;
pub mod locations;
pub mod normalize;
pub mod resolver;

#[cfg(test)]
pub(crate) mod testing;

use serde::{Deserialize, Serialize};

pub use bounds::{BoundingBox, BoundsIndex};
pub use cache::QueryCache;
pub use geocoder::{GeocodeError, Geocoder};
pub use locations::{LocationResolver, PROXIMITY_THRESHOLD_KM, first_if_close};
pub use resolver::GeocodeResolver;

/// Mean Earth radius used for great-circle distances.
const EARTH_RADIUS_KM: f64 = 6371.0088;

/// A latitude/longitude pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub latitude: f64,
    pub longitude: f64,
}

impl Point {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Great-circle (haversine) distance to `other` in kilometers.
    pub fn distance_km(&self, other: &Point) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let d_lat = (other.latitude - self.latitude).to_radians();
        let d_lon = (other.longitude - self.longitude).to_radians();

        let a = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
    }
}

/// A geocoding candidate as returned by the provider.
///
/// `raw` keeps the provider's JSON payload for the candidate so unresolved
/// places can be reviewed by hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeoResult {
    pub latitude: f64,
    pub longitude: f64,
    pub raw: String,
}

impl GeoResult {
    pub fn new(latitude: f64, longitude: f64, raw: impl Into<String>) -> Self {
        Self {
            latitude,
            longitude,
            raw: raw.into(),
        }
    }

    pub fn point(&self) -> Point {
        Point::new(self.latitude, self.longitude)
    }

    pub fn coord(&self) -> (f64, f64) {
        (self.latitude, self.longitude)
    }
}
