use std::path::PathBuf;

use crate::geo::resolver::ResolverStats;

#[derive(Debug)]
pub enum CommandSummary {
    Build(BuildSummary),
    Resolve(ResolveSummary),
    Init(InitSummary),
}

/// A row with a provenance that resolved to no location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnresolvedRow {
    /// 1-based row number in the sheet, header excluded.
    pub row: usize,
    pub provenance: String,
    pub region: Option<String>,
}

#[derive(Debug)]
pub struct BuildSummary {
    pub row_count: usize,
    pub placed_count: usize,
    pub group_count: usize,
    pub unresolved: Vec<UnresolvedRow>,
    pub output: PathBuf,
    pub stats: ResolverStats,
    pub cached_queries: usize,
}

#[derive(Debug)]
pub struct ResolveSummary {
    pub provenance: String,
    pub region: Option<String>,
    pub coords: Vec<(f64, f64)>,
    pub stats: ResolverStats,
}

#[derive(Debug)]
pub struct InitSummary {
    pub created: bool,
    pub error: Option<String>,
}

/// Result of running tunemap commands
pub struct CommandResult {
    pub summary: CommandSummary,
    /// Number of places left unresolved (or 1 for a failed init).
    pub error_count: usize,
    /// If true, exit code 1 should be returned when error_count > 0.
    pub exit_on_errors: bool,
}
