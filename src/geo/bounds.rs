//! Region bounding boxes.
//!
//! Every region of interest (a Swedish province, "landskap") is reduced to the
//! axis-aligned rectangle around its boundary polygons. Candidates returned by
//! the geocoder are accepted only inside the padded union of those rectangles.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result, anyhow, bail};
use serde_json::Value;

use super::Point;

/// Axis-aligned lat/long rectangle given by two opposite corners.
///
/// Corners are normally `(max-lat, min-long)` and `(min-lat, max-long)`, but
/// [`BoundingBox::contains`] accepts them in either order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub north_west: Point,
    pub south_east: Point,
}

impl BoundingBox {
    pub const fn new(north_west: Point, south_east: Point) -> Self {
        Self {
            north_west,
            south_east,
        }
    }

    /// Build a box from `(min_lat, min_long, max_lat, max_long)` extents.
    pub const fn from_extents(min_lat: f64, min_long: f64, max_lat: f64, max_long: f64) -> Self {
        Self::new(
            Point::new(max_lat, min_long),
            Point::new(min_lat, max_long),
        )
    }

    /// `(min_lat, min_long, max_lat, max_long)` with corners normalized.
    pub fn extents(&self) -> (f64, f64, f64, f64) {
        let (a, b) = (self.north_west, self.south_east);
        (
            a.latitude.min(b.latitude),
            a.longitude.min(b.longitude),
            a.latitude.max(b.latitude),
            a.longitude.max(b.longitude),
        )
    }

    /// Inclusive on latitude, strictly exclusive on longitude.
    pub fn contains(&self, point: &Point) -> bool {
        let (min_lat, min_long, max_lat, max_long) = self.extents();
        min_lat <= point.latitude
            && point.latitude <= max_lat
            && min_long < point.longitude
            && point.longitude < max_long
    }

    /// Smallest box covering every input box, grown by `padding` degrees on
    /// every side. `None` when `boxes` is empty.
    pub fn combine(boxes: &[BoundingBox], padding: f64) -> Option<BoundingBox> {
        let mut iter = boxes.iter().map(BoundingBox::extents);
        let first = iter.next()?;

        let (min_lat, min_long, max_lat, max_long) =
            iter.fold(first, |(a0, a1, a2, a3), (b0, b1, b2, b3)| {
                (a0.min(b0), a1.min(b1), a2.max(b2), a3.max(b3))
            });

        Some(BoundingBox::from_extents(
            min_lat - padding,
            min_long - padding,
            max_lat + padding,
            max_long + padding,
        ))
    }
}

/// Lookup from region name to its bounding box.
#[derive(Debug, Clone, Default)]
pub struct BoundsIndex {
    regions: HashMap<String, BoundingBox>,
}

impl BoundsIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, region: impl Into<String>, bounds: BoundingBox) {
        self.regions.insert(region.into(), bounds);
    }

    pub fn bounds_for(&self, region: &str) -> Result<BoundingBox> {
        self.regions
            .get(region)
            .copied()
            .ok_or_else(|| anyhow!("Unknown region \"{}\" in boundary data", region))
    }

    /// Padded union of the named regions' boxes.
    pub fn combined(&self, regions: &[String], padding: f64) -> Result<BoundingBox> {
        let boxes = regions
            .iter()
            .map(|r| self.bounds_for(r))
            .collect::<Result<Vec<_>>>()?;
        BoundingBox::combine(&boxes, padding).context("No regions given to combine")
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    /// Read a GeoJSON `FeatureCollection` of region polygons.
    ///
    /// `name_property` is the feature property holding the region name.
    /// Features sharing a name are merged into one box.
    pub fn from_geojson(path: &Path, name_property: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read boundary file: {}", path.display()))?;
        Self::parse_geojson(&content, name_property)
            .with_context(|| format!("Failed to parse boundary file: {}", path.display()))
    }

    pub fn parse_geojson(content: &str, name_property: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(content)?;
        let features = root
            .get("features")
            .and_then(Value::as_array)
            .context("Expected a FeatureCollection with a \"features\" array")?;

        let mut index = Self::new();
        for feature in features {
            let Some(name) = feature
                .get("properties")
                .and_then(|p| p.get(name_property))
                .and_then(Value::as_str)
            else {
                continue;
            };

            let Some(coordinates) = feature.get("geometry").and_then(|g| g.get("coordinates"))
            else {
                bail!("Region \"{}\" has no geometry coordinates", name);
            };

            let mut extents: Option<(f64, f64, f64, f64)> = None;
            collect_extents(coordinates, &mut extents);
            let Some((min_lat, min_long, max_lat, max_long)) = extents else {
                bail!("Region \"{}\" has an empty geometry", name);
            };

            let bounds = BoundingBox::from_extents(min_lat, min_long, max_lat, max_long);
            let merged = match index.regions.get(name) {
                Some(existing) => BoundingBox::combine(&[*existing, bounds], 0.0).unwrap_or(bounds),
                None => bounds,
            };
            index.insert(name, merged);
        }

        Ok(index)
    }
}

// GeoJSON positions are `[longitude, latitude, ...]`; polygons and
// multipolygons nest them in arrays of varying depth.
fn collect_extents(value: &Value, extents: &mut Option<(f64, f64, f64, f64)>) {
    let Some(items) = value.as_array() else {
        return;
    };

    if let (Some(long), Some(lat)) = (
        items.first().and_then(Value::as_f64),
        items.get(1).and_then(Value::as_f64),
    ) {
        *extents = Some(match *extents {
            Some((min_lat, min_long, max_lat, max_long)) => (
                min_lat.min(lat),
                min_long.min(long),
                max_lat.max(lat),
                max_long.max(long),
            ),
            None => (lat, long, lat, long),
        });
        return;
    }

    for item in items {
        collect_extents(item, extents);
    }
}
