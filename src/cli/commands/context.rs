//! Shared setup for the commands that resolve places.

use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::{
    cli::args::CommonArgs,
    config::{Config, load_config},
    geo::{
        BoundsIndex, Geocoder, GeocodeResolver, LocationResolver, QueryCache,
        geocoder::{GoogleGeocoder, OfflineGeocoder},
    },
};

pub type PipelineResolver = LocationResolver<Box<dyn Geocoder>>;

pub struct PipelineContext {
    pub config: Config,
    pub base_dir: PathBuf,
    pub resolver: PipelineResolver,
}

impl PipelineContext {
    pub fn new(common: &CommonArgs) -> Result<Self> {
        let root_dir = env::current_dir()?;
        let loaded = load_config(&root_dir)?;
        let config = loaded.config;
        let base_dir = loaded.base_dir;
        if loaded.from_file {
            debug!(dir = %base_dir.display(), "loaded config file");
        }

        let boundaries_path = override_or(&common.boundaries, &base_dir, &config.boundaries);
        let index = BoundsIndex::from_geojson(&boundaries_path, &config.region_property)?;
        let bounds = index
            .combined(&config.regions, config.padding)
            .with_context(|| format!("Invalid boundaries in {}", boundaries_path.display()))?;
        debug!(regions = index.len(), ?bounds, "combined region bounds");

        let cache_path = override_or(&common.cache, &base_dir, &config.cache);
        let cache = QueryCache::load(&cache_path)?;

        let geocoder: Box<dyn Geocoder> = match common.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Box::new(GoogleGeocoder::new(key.trim())),
            _ => {
                info!("no API key given, resolving from the cache only");
                Box::new(OfflineGeocoder)
            }
        };

        let resolver = LocationResolver::new(GeocodeResolver::new(cache, bounds, geocoder));

        Ok(Self {
            config,
            base_dir,
            resolver,
        })
    }
}

/// A CLI path is taken as given; a config path is relative to the config file.
pub fn override_or(cli: &Option<PathBuf>, base_dir: &Path, configured: &str) -> PathBuf {
    match cli {
        Some(path) => path.clone(),
        None => Config::resolve_path(base_dir, configured),
    }
}
