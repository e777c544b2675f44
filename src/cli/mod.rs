use anyhow::Result;
use tracing_subscriber::EnvFilter;

pub use args::{Arguments, Command};
pub use exit_code::ExitStatus;

use exit_code::exit_status_from_result;

pub mod args;
mod commands;
mod exit_code;
mod report;
mod run;

pub fn run_cli(args: Arguments) -> Result<ExitStatus> {
    let verbose = args.verbose();

    let Some(args) = args.with_command_or_help() else {
        return Ok(ExitStatus::Success);
    };

    init_logging(verbose);

    let result = run::run(args)?;
    report::print(&result, verbose);

    Ok(exit_status_from_result(&result))
}

/// Log to stderr. `RUST_LOG` wins over the `-v` flag.
fn init_logging(verbose: bool) {
    let default_filter = if verbose { "tunemap=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_ansi(std::env::var_os("NO_COLOR").is_none())
        .try_init();
}
