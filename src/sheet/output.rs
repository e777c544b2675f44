//! Map data emission.
//!
//! Rows sharing a provenance and region are grouped under
//! `"<Proveniens> | <Landskap>"`. Each group carries its own coordinates,
//! nudged by a small random offset so groups at the same place stay
//! clickable on the map.

use std::{collections::HashMap, fs, path::Path};

use anyhow::{Context, Result};
use rand::Rng;
use serde::{Serialize, Serializer, ser::SerializeMap};

use super::records::ProvenanceRecord;

#[derive(Debug, Serialize)]
pub struct Group<'a> {
    pub coords: Vec<(f64, f64)>,
    pub rows: Vec<&'a ProvenanceRecord>,
}

/// Groups in first-seen order.
#[derive(Debug, Default)]
pub struct GroupedRecords<'a> {
    groups: Vec<(String, Group<'a>)>,
}

impl<'a> GroupedRecords<'a> {
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Group<'a>> {
        self.groups.iter().find(|(k, _)| k == key).map(|(_, g)| g)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.groups.iter().map(|(k, _)| k.as_str())
    }
}

impl Serialize for GroupedRecords<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.groups.len()))?;
        for (key, group) in &self.groups {
            map.serialize_entry(key, group)?;
        }
        map.end()
    }
}

pub fn group_key(record: &ProvenanceRecord) -> Option<String> {
    let provenance = record.provenance()?;
    Some(format!("{} | {}", provenance, record.region().unwrap_or_default()))
}

/// Group rows with a provenance. A group's coordinates come from its first
/// row, each moved by up to `jitter` degrees in latitude and longitude.
pub fn group_records<'a, R: Rng>(
    records: &'a [ProvenanceRecord],
    jitter: f64,
    rng: &mut R,
) -> GroupedRecords<'a> {
    let mut grouped = GroupedRecords::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for record in records {
        let Some(key) = group_key(record) else {
            continue;
        };

        let position = *index.entry(key.clone()).or_insert_with(|| {
            let coords = record
                .coords
                .iter()
                .map(|(lat, long)| {
                    (
                        lat + rng.gen_range(-jitter..=jitter),
                        long + rng.gen_range(-jitter..=jitter),
                    )
                })
                .collect();
            grouped.groups.push((
                key,
                Group {
                    coords,
                    rows: Vec::new(),
                },
            ));
            grouped.groups.len() - 1
        });

        grouped.groups[position].1.rows.push(record);
    }

    grouped
}

pub fn write_output(path: &Path, grouped: &GroupedRecords<'_>) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let json = serde_json::to_string(grouped).context("Failed to serialize map data")?;
    fs::write(path, json).with_context(|| format!("Failed to write output: {}", path.display()))
}
