use std::process::ExitCode;

use super::commands::CommandResult;

/// How a tunemap run ended.
///
/// - `Success` (0): everything resolved, or unresolved rows were tolerated
/// - `Failure` (1): the run finished but left places unresolved
/// - `Error` (2): the run was aborted (config, input, cache or network error)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        ExitCode::from(match status {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Error => 2,
        })
    }
}

pub fn exit_status_from_result(result: &CommandResult) -> ExitStatus {
    if result.exit_on_errors && result.error_count > 0 {
        ExitStatus::Failure
    } else {
        ExitStatus::Success
    }
}
