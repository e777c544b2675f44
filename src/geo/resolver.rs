//! Single place lookup.
//!
//! A `(place, region)` pair is first looked up as `"<place>, <region>"`. The
//! first candidate inside the region bounds wins; when candidates came back
//! but none qualifies, the place is looked up once more without the region.
//! An empty answer is final. Every distinct query hits
//! the geocoder at most once over the lifetime of the cache.

use anyhow::{Context, Result};
use tracing::{debug, warn};

use super::normalize::trim_separators;
use super::{BoundingBox, GeoResult, GeocodeError, Geocoder, QueryCache};

/// Attempts per `(place, region)`: with the region, then without it.
pub const MAX_ATTEMPTS: usize = 2;

/// Counters reported at the end of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolverStats {
    pub cache_hits: usize,
    pub network_calls: usize,
    pub rejected_queries: usize,
    pub offline_misses: usize,
}

pub struct GeocodeResolver<G> {
    cache: QueryCache,
    bounds: BoundingBox,
    geocoder: G,
    stats: ResolverStats,
}

/// The cache key for a `(place, region)` pair.
///
/// ```
/// use tunemap::geo::resolver::build_query;
///
/// assert_eq!(build_query("Habo", "Västergötland"), "Habo, Västergötland");
/// assert_eq!(build_query("Habo", ""), "Habo");
/// assert_eq!(build_query("", "Dalsland"), "Dalsland");
/// ```
pub fn build_query(place: &str, region: &str) -> String {
    trim_separators(&format!("{}, {}", place, region)).to_string()
}

impl<G: Geocoder> GeocodeResolver<G> {
    pub fn new(cache: QueryCache, bounds: BoundingBox, geocoder: G) -> Self {
        Self {
            cache,
            bounds,
            geocoder,
            stats: ResolverStats::default(),
        }
    }

    /// First in-bounds candidate for `place`, trying `region` and then no region.
    ///
    /// The query without the region is only tried when the query with it
    /// found candidates and all of them were out of bounds. A query that
    /// finds nothing ends the lookup. `Ok(None)` means no candidate was
    /// accepted. Transport failures and cache write failures are errors.
    pub fn geocode(&mut self, place: &str, region: &str) -> Result<Option<GeoResult>> {
        let attempts: [&str; MAX_ATTEMPTS] = [region, ""];
        let attempts = if region.is_empty() {
            &attempts[1..]
        } else {
            &attempts[..]
        };

        let mut rejected = Vec::new();
        for attempt in attempts {
            let query = build_query(place, attempt);
            // No answer without an API key; the next attempt may be cached.
            let Some(candidates) = self.candidates(&query)? else {
                continue;
            };
            if candidates.is_empty() {
                break;
            }

            if let Some(found) = candidates.iter().find(|c| self.bounds.contains(&c.point())) {
                return Ok(Some(found.clone()));
            }
            rejected.extend(candidates);
        }

        warn!(
            place,
            region,
            candidates = ?rejected.iter().map(|c| c.raw.as_str()).collect::<Vec<_>>(),
            "no candidate inside region bounds"
        );
        Ok(None)
    }

    pub fn stats(&self) -> ResolverStats {
        self.stats
    }

    pub fn cache(&self) -> &QueryCache {
        &self.cache
    }

    pub fn bounds(&self) -> &BoundingBox {
        &self.bounds
    }

    /// Candidates for `query`, `None` when the geocoder is offline.
    fn candidates(&mut self, query: &str) -> Result<Option<Vec<GeoResult>>> {
        if let Some(cached) = self.cache.lookup(query) {
            debug!(query, count = cached.len(), "cache hit");
            self.stats.cache_hits += 1;
            return Ok(Some(cached.to_vec()));
        }

        debug!(query, "cache miss");
        let results = match self.geocoder.geocode(query, &self.bounds) {
            Ok(results) => {
                self.stats.network_calls += 1;
                results
            }
            Err(GeocodeError::QuerySyntax(message)) => {
                warn!(query, error = %message, "geocoder rejected query");
                self.stats.network_calls += 1;
                self.stats.rejected_queries += 1;
                Vec::new()
            }
            // Not an answer from the provider, so nothing is cached.
            Err(err @ GeocodeError::Offline(_)) => {
                warn!(query, "{}", err);
                self.stats.offline_misses += 1;
                return Ok(None);
            }
            Err(err) => {
                return Err(err).with_context(|| format!("Failed to geocode \"{}\"", query));
            }
        };

        self.cache.put(query, results.clone())?;
        Ok(Some(results))
    }
}
