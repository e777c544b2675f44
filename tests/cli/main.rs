use std::{
    fs,
    path::{Path, PathBuf},
    process::{Command, Output},
};

use anyhow::{Context, Ok, Result};
use insta_cmd::get_cargo_bin;
use tempfile::TempDir;
use tunemap::geo::{GeoResult, QueryCache};

mod build;
mod init;

const BIN_NAME: &str = "tunemap";

/// Three rectangular regions around Gothenburg, named like the real boundary file.
pub const BOUNDARIES: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": { "landskap": "Västergötland" },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[11.9, 57.2], [14.6, 57.2], [14.6, 59.0], [11.9, 59.0], [11.9, 57.2]]]
      }
    },
    {
      "type": "Feature",
      "properties": { "landskap": "Bohuslän" },
      "geometry": {
        "type": "Polygon",
        "coordinates": [[[11.0, 57.7], [12.0, 57.7], [12.0, 59.1], [11.0, 59.1], [11.0, 57.7]]]
      }
    },
    {
      "type": "Feature",
      "properties": { "landskap": "Dalsland" },
      "geometry": {
        "type": "MultiPolygon",
        "coordinates": [[[[11.8, 58.5], [12.9, 58.5], [12.9, 59.2], [11.8, 59.2], [11.8, 58.5]]]]
      }
    }
  ]
}"#;

pub struct CliTest {
    _temp_dir: TempDir,
    project_dir: PathBuf,
}

impl CliTest {
    pub fn new() -> Result<Self> {
        let temp_dir = TempDir::new()?;
        let project_dir = temp_dir.path().canonicalize()?;
        // Stop config discovery at the project root
        fs::create_dir(project_dir.join(".git"))?;
        Ok(Self {
            _temp_dir: temp_dir,
            project_dir,
        })
    }

    /// A project with the default boundary file in place.
    pub fn with_boundaries() -> Result<Self> {
        let test = Self::new()?;
        test.write_file("svenska-landskap.geo.json", BOUNDARIES)?;
        Ok(test)
    }

    pub fn write_file(&self, path: &str, content: &str) -> Result<()> {
        let file_path = self.project_dir.join(path);

        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory:{}", parent.display()))?;
        }

        fs::write(&file_path, content)
            .with_context(|| format!("Failed to write file: {}", file_path.display()))?;

        Ok(())
    }

    /// Store geocoder answers in the project's query cache.
    pub fn seed_cache(&self, path: &str, entries: &[(&str, Vec<GeoResult>)]) -> Result<()> {
        let mut cache = QueryCache::load(self.project_dir.join(path))?;
        for (query, results) in entries {
            cache.put(*query, results.clone())?;
        }
        Ok(())
    }

    pub fn root(&self) -> &Path {
        &self.project_dir
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(get_cargo_bin(BIN_NAME));
        cmd.current_dir(&self.project_dir);
        cmd.env_clear();
        cmd.env("NO_COLOR", "1"); // Disable colors for consistent test output
        cmd
    }

    pub fn build_command(&self) -> Command {
        let mut cmd = self.command();
        cmd.arg("build");
        cmd
    }

    pub fn resolve_command(&self, provenance: &str) -> Command {
        let mut cmd = self.command();
        cmd.arg("resolve").arg(provenance);
        cmd
    }

    pub fn read_file(&self, path: &str) -> Result<String> {
        let file_path = self.project_dir.join(path);
        fs::read_to_string(&file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))
    }
}

pub fn run(mut cmd: Command) -> Result<Output> {
    cmd.output().context("Failed to run tunemap")
}

pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;
    let output = run(test.command())?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("Usage:"));

    Ok(())
}
