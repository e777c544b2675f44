//! Report formatting and printing utilities.
//!
//! Separate from the commands so tunemap can be used as a library.

use std::io::{self, Write};

use colored::Colorize;

use super::commands::{
    BuildSummary, CommandResult, CommandSummary, InitSummary, ResolveSummary, UnresolvedRow,
};
use crate::config::CONFIG_FILE_NAME;
use crate::geo::{geocoder::google::API_KEY_ENV, resolver::ResolverStats};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

pub fn print(result: &CommandResult, verbose: bool) {
    print_to(result, verbose, &mut io::stdout().lock());
}

/// Print a command summary to a custom writer.
pub fn print_to<W: Write>(result: &CommandResult, verbose: bool, writer: &mut W) {
    match &result.summary {
        CommandSummary::Build(summary) => print_build(summary, verbose, writer),
        CommandSummary::Resolve(summary) => print_resolve(summary, verbose, writer),
        CommandSummary::Init(summary) => print_init(summary, writer),
    }
}

fn print_build<W: Write>(summary: &BuildSummary, verbose: bool, writer: &mut W) {
    let msg = format!(
        "Placed {} of {} row(s) in {} group(s), wrote {}",
        summary.placed_count,
        summary.row_count,
        summary.group_count,
        summary.output.display()
    );
    let _ = writeln!(writer, "{} {}", SUCCESS_MARK.green(), msg.green());

    if !summary.unresolved.is_empty() {
        print_unresolved(&summary.unresolved, writer);
    }

    if verbose {
        print_stats(&summary.stats, writer);
        let _ = writeln!(writer, "  cache entries: {}", summary.cached_queries);
    }
    print_offline_hint(&summary.stats, writer);
}

fn print_unresolved<W: Write>(rows: &[UnresolvedRow], writer: &mut W) {
    let _ = writeln!(
        writer,
        "{} {}",
        FAILURE_MARK.red(),
        format!("{} row(s) need manual review:", rows.len()).red()
    );
    for row in rows {
        let _ = writeln!(
            writer,
            "  {} {} | {}",
            format!("row {}:", row.row).dimmed(),
            row.provenance,
            row.region.as_deref().unwrap_or_default()
        );
    }
}

fn print_resolve<W: Write>(summary: &ResolveSummary, verbose: bool, writer: &mut W) {
    if summary.coords.is_empty() {
        let _ = writeln!(
            writer,
            "{} {}",
            FAILURE_MARK.red(),
            format!(
                "No location found for \"{}\" ({})",
                summary.provenance,
                summary.region.as_deref().unwrap_or("no region")
            )
            .red()
        );
    } else {
        for (lat, long) in &summary.coords {
            let _ = writeln!(writer, "{}, {}", lat, long);
        }
    }

    if verbose {
        print_stats(&summary.stats, writer);
    }
    print_offline_hint(&summary.stats, writer);
}

fn print_stats<W: Write>(stats: &ResolverStats, writer: &mut W) {
    let _ = writeln!(
        writer,
        "  cache hits: {}, network calls: {}, rejected queries: {}, offline misses: {}",
        stats.cache_hits, stats.network_calls, stats.rejected_queries, stats.offline_misses
    );
}

fn print_offline_hint<W: Write>(stats: &ResolverStats, writer: &mut W) {
    if stats.offline_misses > 0 {
        let _ = writeln!(
            writer,
            "{} uncached quer(ies) were skipped. Set {} to look them up.",
            stats.offline_misses,
            API_KEY_ENV.cyan()
        );
    }
}

fn print_init<W: Write>(summary: &InitSummary, writer: &mut W) {
    if summary.created {
        let _ = writeln!(
            writer,
            "{} {}",
            SUCCESS_MARK.green(),
            format!("Created {}", CONFIG_FILE_NAME).green()
        );
    }
    if let Some(error) = &summary.error {
        eprintln!("Error: {}", error);
    }
}
