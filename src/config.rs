use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE_NAME: &str = ".tunemaprc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// CSV export of the archive sheet.
    #[serde(default = "default_input")]
    pub input: String,
    /// Grouped JSON consumed by the map front-end.
    #[serde(default = "default_output")]
    pub output: String,
    /// Persistent geocode query cache.
    #[serde(default = "default_cache")]
    pub cache: String,
    /// GeoJSON FeatureCollection with one or more polygons per region.
    #[serde(default = "default_boundaries")]
    pub boundaries: String,
    /// Feature property naming the region.
    #[serde(default = "default_region_property")]
    pub region_property: String,
    /// Regions whose combined bounds a location must fall within.
    #[serde(default = "default_regions")]
    pub regions: Vec<String>,
    /// Degrees added on every side of the combined region bounds.
    #[serde(default = "default_padding")]
    pub padding: f64,
    /// Maximum random offset, in degrees, applied to emitted coordinates.
    #[serde(default = "default_jitter")]
    pub jitter: f64,
}

fn default_input() -> String {
    "hitta-folkmusiken.csv".to_string()
}

fn default_output() -> String {
    "public/hitta.json".to_string()
}

fn default_cache() -> String {
    "loc.cache".to_string()
}

fn default_boundaries() -> String {
    "svenska-landskap.geo.json".to_string()
}

fn default_region_property() -> String {
    "landskap".to_string()
}

fn default_regions() -> Vec<String> {
    ["Västergötland", "Bohuslän", "Dalsland"]
        .map(String::from)
        .to_vec()
}

fn default_padding() -> f64 {
    0.3
}

fn default_jitter() -> f64 {
    0.01
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: default_input(),
            output: default_output(),
            cache: default_cache(),
            boundaries: default_boundaries(),
            region_property: default_region_property(),
            regions: default_regions(),
            padding: default_padding(),
            jitter: default_jitter(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<()> {
        if self.regions.is_empty() {
            bail!("'regions' must name at least one region");
        }
        if let Some(blank) = self.regions.iter().position(|r| r.trim().is_empty()) {
            bail!("'regions' entry {} is empty", blank);
        }
        if self.padding.is_nan() || self.padding < 0.0 {
            bail!("'padding' must be zero or positive, got {}", self.padding);
        }
        if self.jitter.is_nan() || self.jitter < 0.0 {
            bail!("'jitter' must be zero or positive, got {}", self.jitter);
        }

        Ok(())
    }

    /// Resolve a configured path against the directory the config was found in.
    pub fn resolve_path(base: &Path, value: &str) -> PathBuf {
        let p = Path::new(value);
        if p.is_absolute() {
            p.to_path_buf()
        } else {
            base.join(p)
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// Directory relative paths in the config are resolved against.
    pub base_dir: PathBuf,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| start_dir.to_path_buf());
            Ok(ConfigLoadResult {
                config,
                base_dir,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            base_dir: start_dir.to_path_buf(),
            from_file: false,
        }),
    }
}
