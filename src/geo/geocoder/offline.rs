use super::{GeocodeError, Geocoder};
use crate::geo::{BoundingBox, GeoResult};

/// Backend for runs without an API key: every lookup fails, so only queries
/// already in the cache resolve.
#[derive(Debug, Default, Clone, Copy)]
pub struct OfflineGeocoder;

impl Geocoder for OfflineGeocoder {
    fn geocode(&self, query: &str, _bias: &BoundingBox) -> Result<Vec<GeoResult>, GeocodeError> {
        Err(GeocodeError::Offline(query.to_string()))
    }
}
