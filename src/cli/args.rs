//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `build`: Resolve every sheet row and write the map data file
//! - `resolve`: Resolve a single provenance, for checking a place by hand
//! - `init`: Initialize tunemap configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::geo::geocoder::google::API_KEY_ENV;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Build(args)) => args.common.verbose,
            Some(Command::Resolve(args)) => args.common.verbose,
            Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by the resolving commands.
#[derive(Debug, Clone, Args)]
pub struct CommonArgs {
    /// Geocode query cache file (overrides config file)
    #[arg(long)]
    pub cache: Option<PathBuf>,

    /// Region boundary GeoJSON file (overrides config file)
    #[arg(long)]
    pub boundaries: Option<PathBuf>,

    /// Google Geocoding API key. Without one, only cached queries resolve
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct BuildArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Sheet CSV export (overrides config file)
    #[arg(long)]
    pub input: Option<PathBuf>,

    /// Map data JSON to write (overrides config file)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Seed for the coordinate jitter, for reproducible output
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exit with status 1 when any row with a provenance could not be placed
    #[arg(long)]
    pub strict: bool,
}

#[derive(Debug, Parser)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Provenance text, e.g. "Habo, Fagerhult"
    pub provenance: String,

    /// Region (Landskap) text, e.g. "Västergötland"
    #[arg(long)]
    pub region: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Resolve every sheet row and write the grouped map data
    Build(BuildArgs),
    /// Resolve one provenance and print its coordinates
    Resolve(ResolveArgs),
    /// Initialize a new .tunemaprc.json configuration file
    Init,
}
