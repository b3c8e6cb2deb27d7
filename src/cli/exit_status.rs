use std::process::ExitCode;

/// Process exit status of `autoglot`.
///
/// - `Success` (0): the command ran and found nothing to report as an error
/// - `Failure` (1): `check` found errors, or `init` found an existing config
/// - `Error` (2): the command could not run (bad config, unreadable locale file)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}
