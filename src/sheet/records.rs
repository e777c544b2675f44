//! Spreadsheet rows.
//!
//! The archive sheet is read from its CSV export. Every column is kept
//! verbatim (in sheet order) so the map front-end can show the full row;
//! resolution only looks at `Proveniens` and `Landskap`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use serde_json::{Map, Value};

use super::filter::Filter;
use crate::geo::GeoResult;

pub const PROVENANCE_COLUMN: &str = "Proveniens";
pub const REGION_COLUMN: &str = "Landskap";

/// One recording row, plus what the pipeline derives for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProvenanceRecord {
    #[serde(flatten)]
    fields: Map<String, Value>,
    /// `(latitude, longitude)` of every resolved location.
    pub coords: Vec<(f64, f64)>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

impl ProvenanceRecord {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self {
            fields,
            coords: Vec::new(),
            filter: None,
        }
    }

    /// Text of `column`, `None` for missing or empty cells.
    pub fn text(&self, column: &str) -> Option<&str> {
        self.fields.get(column).and_then(Value::as_str)
    }

    pub fn provenance(&self) -> Option<&str> {
        self.text(PROVENANCE_COLUMN)
    }

    pub fn region(&self) -> Option<&str> {
        self.text(REGION_COLUMN)
    }

    pub fn set_locations(&mut self, locations: &[GeoResult]) {
        self.coords = locations.iter().map(GeoResult::coord).collect();
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// Read every row of a CSV export with a header line.
///
/// Empty cells become `null`. Repeated header names get a `.1`, `.2`, …
/// suffix so no column is lost.
pub fn read_records(path: &Path) -> Result<Vec<ProvenanceRecord>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open CSV file: {}", path.display()))?;

    let headers = dedupe_headers(
        reader
            .headers()
            .with_context(|| format!("Failed to read CSV header: {}", path.display()))?
            .iter(),
    );

    let mut records = Vec::new();
    for (index, row) in reader.records().enumerate() {
        // Line 1 is the header
        let row = row.with_context(|| {
            format!("Failed to read CSV row {} of {}", index + 2, path.display())
        })?;

        let fields = headers
            .iter()
            .zip(row.iter())
            .map(|(header, cell)| {
                let value = if cell.is_empty() {
                    Value::Null
                } else {
                    Value::String(cell.to_string())
                };
                (header.clone(), value)
            })
            .collect();
        records.push(ProvenanceRecord::new(fields));
    }

    Ok(records)
}

fn dedupe_headers<'a>(headers: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    for header in headers {
        let mut name = header.to_string();
        let mut n = 0;
        while seen.contains(&name) {
            n += 1;
            name = format!("{}.{}", header, n);
        }
        seen.push(name);
    }
    seen
}
