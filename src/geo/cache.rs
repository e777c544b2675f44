//! Persistent geocode query cache.
//!
//! Maps a normalized query string (`"<place>, <region>"`) to every candidate
//! the provider returned for it. An empty list is a cached "no match" and is
//! never re-queried.
//!
//! The whole map is rewritten after each insert: it is serialized to a
//! temporary sibling file which is then renamed over the cache file, so an
//! interrupted run keeps everything persisted before the interruption.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::debug;

use super::GeoResult;

#[derive(Debug)]
pub struct QueryCache {
    path: Option<PathBuf>,
    entries: HashMap<String, Vec<GeoResult>>,
}

impl QueryCache {
    /// Load the cache stored at `path`, or start empty if the file does not exist.
    ///
    /// A file that exists but cannot be decoded is an error; the cache is
    /// never silently discarded.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        let entries = if path.exists() {
            let bytes = fs::read(&path)
                .with_context(|| format!("Failed to read cache file: {}", path.display()))?;
            bincode::deserialize(&bytes)
                .with_context(|| format!("Failed to decode cache file: {}", path.display()))?
        } else {
            HashMap::new()
        };

        debug!(path = %path.display(), entries = entries.len(), "loaded query cache");

        Ok(Self {
            path: Some(path),
            entries,
        })
    }

    /// A cache that lives only in memory.
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: HashMap::new(),
        }
    }

    /// `None` if `query` was never looked up, otherwise the cached candidates.
    pub fn lookup(&self, query: &str) -> Option<&[GeoResult]> {
        self.entries.get(query).map(Vec::as_slice)
    }

    /// Store `results` for `query` and flush the cache to disk.
    pub fn put(&mut self, query: impl Into<String>, results: Vec<GeoResult>) -> Result<()> {
        self.entries.insert(query.into(), results);
        self.persist()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn persist(&self) -> Result<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        let bytes = bincode::serialize(&self.entries).context("Failed to encode query cache")?;

        let temp_path = temp_path_for(path);
        fs::write(&temp_path, bytes)
            .with_context(|| format!("Failed to write cache file: {}", temp_path.display()))?;
        if let Err(err) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(err)
                .with_context(|| format!("Failed to replace cache file: {}", path.display()));
        }

        Ok(())
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}
