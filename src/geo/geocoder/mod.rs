//! External geocoding backends.
//!
//! - `google`: Google Geocoding API over blocking HTTP
//! - `offline`: backend for runs without an API key (cache-only)

pub mod google;
pub mod offline;

use super::{BoundingBox, GeoResult};

pub use google::GoogleGeocoder;
pub use offline::OfflineGeocoder;

#[derive(Debug, thiserror::Error)]
pub enum GeocodeError {
    /// The provider rejected the query text itself.
    #[error("query rejected by geocoder: {0}")]
    QuerySyntax(String),

    #[error("geocoder request failed: {0}")]
    Transport(String),

    #[error("no geocoding API key configured; cannot look up \"{0}\" (only cached queries resolve)")]
    Offline(String),
}

/// A geocoding provider.
pub trait Geocoder {
    /// Every candidate for `query`, in provider order, biased towards `bias`.
    ///
    /// An empty list means the provider found nothing.
    fn geocode(&self, query: &str, bias: &BoundingBox) -> Result<Vec<GeoResult>, GeocodeError>;
}

impl<G: Geocoder + ?Sized> Geocoder for &G {
    fn geocode(&self, query: &str, bias: &BoundingBox) -> Result<Vec<GeoResult>, GeocodeError> {
        (**self).geocode(query, bias)
    }
}

impl<G: Geocoder + ?Sized> Geocoder for Box<G> {
    fn geocode(&self, query: &str, bias: &BoundingBox) -> Result<Vec<GeoResult>, GeocodeError> {
        (**self).geocode(query, bias)
    }
}
