//! Archive spreadsheet ingestion and map data output.
//!
//! - `records`: CSV rows as ordered JSON objects
//! - `filter`: song type / instrument / collector facets
//! - `output`: grouped JSON for the map front-end

pub mod filter;
pub mod output;
pub mod records;

pub use filter::{Filter, derive_filter};
pub use output::{GroupedRecords, group_records, write_output};
pub use records::{ProvenanceRecord, read_records};
