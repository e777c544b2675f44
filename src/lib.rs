//! Tunemap - place resolution for a folk-music recording archive
//!
//! Tunemap reads the archive's sheet export, turns each row's free-text
//! provenance ("Proveniens") and region ("Landskap") into coordinates inside
//! the covered regions, and writes grouped map data for the web front-end.
//!
//! ## Module Structure
//!
//! - `cli`: Command-line interface layer (build, resolve, init)
//! - `config`: Configuration file loading and parsing
//! - `geo`: Text normalization, geocoding, caching and location resolution
//! - `sheet`: Sheet rows, filter facets and map data output

pub mod cli;
pub mod config;
pub mod geo;
pub mod sheet;
