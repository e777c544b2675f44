//! Test doubles for the resolution pipeline.

use std::{cell::RefCell, collections::HashMap};

use super::{BoundingBox, GeoResult, GeocodeError, Geocoder};

/// Box around Västergötland, Bohuslän and Dalsland, roughly.
pub fn region_bounds() -> BoundingBox {
    BoundingBox::from_extents(57.0, 10.5, 59.5, 14.5)
}

pub fn loc(latitude: f64, longitude: f64) -> GeoResult {
    GeoResult::new(latitude, longitude, format!("{{\"lat\":{latitude},\"lng\":{longitude}}}"))
}

/// Geocoder answering from a fixed table and recording every query it sees.
#[derive(Default)]
pub struct FakeGeocoder {
    answers: HashMap<String, Vec<GeoResult>>,
    rejected: Vec<String>,
    unreachable: bool,
    calls: RefCell<Vec<String>>,
}

impl FakeGeocoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn answer(mut self, query: &str, results: Vec<GeoResult>) -> Self {
        self.answers.insert(query.to_string(), results);
        self
    }

    pub fn reject(mut self, query: &str) -> Self {
        self.rejected.push(query.to_string());
        self
    }

    pub fn unreachable(mut self) -> Self {
        self.unreachable = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }
}

impl Geocoder for FakeGeocoder {
    fn geocode(&self, query: &str, _bias: &BoundingBox) -> Result<Vec<GeoResult>, GeocodeError> {
        self.calls.borrow_mut().push(query.to_string());

        if self.unreachable {
            return Err(GeocodeError::Transport("connection refused".to_string()));
        }
        if self.rejected.iter().any(|q| q == query) {
            return Err(GeocodeError::QuerySyntax("INVALID_REQUEST".to_string()));
        }
        Ok(self.answers.get(query).cloned().unwrap_or_default())
    }
}
