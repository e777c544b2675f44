use anyhow::Result;
use rand::{SeedableRng, rngs::StdRng};
use tracing::{info, warn};

use super::context::{PipelineContext, override_or};
use super::{BuildSummary, CommandResult, CommandSummary, UnresolvedRow};
use crate::cli::args::BuildArgs;
use crate::sheet::{derive_filter, group_records, read_records, write_output};

/// Resolve every row of the sheet and write the grouped map data.
///
/// Rows whose provenance resolves to nothing are kept in the output with
/// empty coordinates and listed in the summary for manual review.
pub fn build(args: BuildArgs) -> Result<CommandResult> {
    let mut ctx = PipelineContext::new(&args.common)?;
    let input = override_or(&args.input, &ctx.base_dir, &ctx.config.input);
    let output = override_or(&args.output, &ctx.base_dir, &ctx.config.output);

    let mut records = read_records(&input)?;
    info!(rows = records.len(), input = %input.display(), "read sheet");

    let mut unresolved = Vec::new();
    for (index, record) in records.iter_mut().enumerate() {
        let locations = ctx.resolver.resolve(record.provenance(), record.region())?;

        if locations.is_empty()
            && let Some(provenance) = record.provenance().filter(|p| !p.trim().is_empty())
        {
            warn!(
                row = index + 1,
                provenance,
                region = record.region().unwrap_or_default(),
                "no location found"
            );
            unresolved.push(UnresolvedRow {
                row: index + 1,
                provenance: provenance.to_string(),
                region: record.region().map(String::from),
            });
        }

        record.set_locations(&locations);
        record.filter = Some(derive_filter(record));
    }

    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let grouped = group_records(&records, ctx.config.jitter, &mut rng);
    write_output(&output, &grouped)?;

    let placed_count = records.iter().filter(|r| !r.coords.is_empty()).count();
    let geocoder = ctx.resolver.geocoder();
    let summary = BuildSummary {
        row_count: records.len(),
        placed_count,
        group_count: grouped.len(),
        output,
        stats: geocoder.stats(),
        cached_queries: geocoder.cache().len(),
        unresolved,
    };

    Ok(CommandResult {
        error_count: summary.unresolved.len(),
        exit_on_errors: args.strict,
        summary: CommandSummary::Build(summary),
    })
}
