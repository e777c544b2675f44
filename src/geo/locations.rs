//! Multi-part provenance resolution.
//!
//! A provenance may name one place, several places each with its own region,
//! or several villages of one township. Decision order (first match wins):
//!
//! | Place parts / region parts           | Result                                  |
//! |--------------------------------------|-----------------------------------------|
//! | none                                 | no locations                            |
//! | exactly one place                    | that place in the first region          |
//! | as many places as regions            | each place in its own region            |
//! | counts differ, several regions       | resolved again without any region       |
//! | four or more places, one region      | every place, no clustering              |
//! | two or three places, one region      | proximity clustering                    |
//!
//! Clustering also looks up the joined place list as one query. When every
//! individual place lies close to that joint match the places are one
//! location; otherwise they are kept apart.

use anyhow::Result;

use super::normalize::{place_parts, region_parts};
use super::{GeoResult, GeocodeResolver, Geocoder};

/// Two points closer than this are the same place.
pub const PROXIMITY_THRESHOLD_KM: f64 = 12.0;

/// Place counts from which clustering is skipped.
const CLUSTER_LIMIT: usize = 4;

fn is_close(a: &GeoResult, b: &GeoResult) -> bool {
    a.point().distance_km(&b.point()) < PROXIMITY_THRESHOLD_KM
}

/// Collapse `locations` to the first one if every pair is close.
pub fn first_if_close(mut locations: Vec<GeoResult>) -> Vec<GeoResult> {
    let all_close = locations
        .iter()
        .enumerate()
        .all(|(i, a)| locations[i + 1..].iter().all(|b| is_close(a, b)));

    if all_close {
        locations.truncate(1);
    }
    locations
}

pub struct LocationResolver<G> {
    geocoder: GeocodeResolver<G>,
}

impl<G: Geocoder> LocationResolver<G> {
    pub fn new(geocoder: GeocodeResolver<G>) -> Self {
        Self { geocoder }
    }

    /// Coordinates for a raw provenance and region field.
    ///
    /// Blank or absent provenance yields no locations.
    pub fn resolve(
        &mut self,
        provenance: Option<&str>,
        region: Option<&str>,
    ) -> Result<Vec<GeoResult>> {
        let Some(provenance) = provenance.filter(|p| !p.trim().is_empty()) else {
            return Ok(Vec::new());
        };

        let places = place_parts(provenance);
        let regions = region_parts(region.unwrap_or_default());
        self.resolve_parts(&places, &regions)
    }

    pub fn geocoder(&self) -> &GeocodeResolver<G> {
        &self.geocoder
    }

    fn resolve_parts(&mut self, places: &[String], regions: &[String]) -> Result<Vec<GeoResult>> {
        let first_region = regions.first().map(String::as_str).unwrap_or_default();

        match places {
            [] => Ok(Vec::new()),
            [place] => Ok(self.geocoder.geocode(place, first_region)?.into_iter().collect()),
            _ if places.len() == regions.len() => {
                let pairs: Vec<(&str, &str)> = places
                    .iter()
                    .zip(regions)
                    .map(|(p, r)| (p.as_str(), r.as_str()))
                    .collect();
                self.geocode_each(&pairs)
            }
            // A single empty region part, so this recurses at most once.
            _ if regions.len() > 1 => self.resolve_parts(places, &[String::new()]),
            _ if places.len() >= CLUSTER_LIMIT => {
                let pairs: Vec<(&str, &str)> =
                    places.iter().map(|p| (p.as_str(), first_region)).collect();
                self.geocode_each(&pairs)
            }
            _ => self.cluster(places, first_region),
        }
    }

    fn geocode_each(&mut self, pairs: &[(&str, &str)]) -> Result<Vec<GeoResult>> {
        let mut found = Vec::new();
        for (place, region) in pairs {
            if let Some(location) = self.geocoder.geocode(place, region)? {
                found.push(location);
            }
        }
        Ok(found)
    }

    fn cluster(&mut self, places: &[String], region: &str) -> Result<Vec<GeoResult>> {
        let pairs: Vec<(&str, &str)> = places.iter().map(|p| (p.as_str(), region)).collect();
        let part_locs = self.geocode_each(&pairs)?;

        let Some(joint) = self.geocoder.geocode(&places.join(", "), region)? else {
            return Ok(first_if_close(part_locs));
        };

        if part_locs.iter().all(|l| is_close(l, &joint)) {
            return Ok(vec![joint]);
        }
        Ok(part_locs)
    }
}
