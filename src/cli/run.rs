//! Dispatches to the appropriate command handler based on the parsed arguments.
//!
//! # Returns
//! - `Ok(CommandResult)` with the command summary and unresolved-row count
//! - `Err` if the command fails (e.g., unreadable config, boundary file or sheet,
//!   cache write failure, geocoder unreachable)
use anyhow::Result;

use super::{
    args::{Arguments, Command},
    commands::CommandResult,
    commands::{build::build, init::init, resolve::resolve},
};

pub fn run(Arguments { command }: Arguments) -> Result<CommandResult> {
    match command {
        Some(Command::Build(args)) => build(args),
        Some(Command::Resolve(args)) => resolve(args),
        Some(Command::Init) => init(),
        None => {
            anyhow::bail!("No command provided. Use --help to see available commands.")
        }
    }
}
