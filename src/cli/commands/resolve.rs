use anyhow::Result;

use super::context::PipelineContext;
use super::{CommandResult, CommandSummary, ResolveSummary};
use crate::cli::args::ResolveArgs;
use crate::geo::GeoResult;

pub fn resolve(args: ResolveArgs) -> Result<CommandResult> {
    let mut ctx = PipelineContext::new(&args.common)?;

    let locations = ctx
        .resolver
        .resolve(Some(&args.provenance), args.region.as_deref())?;

    let summary = ResolveSummary {
        coords: locations.iter().map(GeoResult::coord).collect(),
        stats: ctx.resolver.geocoder().stats(),
        provenance: args.provenance,
        region: args.region,
    };

    Ok(CommandResult {
        error_count: usize::from(summary.coords.is_empty()),
        exit_on_errors: true,
        summary: CommandSummary::Resolve(summary),
    })
}
