use std::process::ExitCode;

/// Process exit status of a tolk run.
///
/// - `Success` (0): the command completed
/// - `Failure` (1): `inline --deny-missing` met missing translation values
/// - `Error` (2): the command failed (unreadable files, invalid config, ...)
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
