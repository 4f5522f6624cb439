use crate::{CoreResult, Platform, RecorderError};

use std::panic::Location;

use error_location::ErrorLocation;

/// How an encoder run ended, judged from its exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitOutcome {
    /// Exit code 0.
    Clean,
    /// The platform's interrupted-by-stop code; the file is finalised.
    Stopped,
    /// Any other code, or termination by a signal (`None`).
    Failed(Option<i32>),
}

impl ExitOutcome {
    /// Classify an exit code for the given platform.
    pub fn classify(platform: &Platform, code: Option<i32>) -> Self {
        match code {
            Some(0) => ExitOutcome::Clean,
            Some(c) if platform.stop_exit_code() == Some(c) => ExitOutcome::Stopped,
            other => ExitOutcome::Failed(other),
        }
    }

    /// Keep clean and stopped runs; turn a failed run into
    /// [`RecorderError::EncodingFailed`].
    #[track_caller]
    pub fn check(self) -> CoreResult<Self> {
        match self {
            ExitOutcome::Failed(code) => Err(RecorderError::EncodingFailed {
                code,
                location: ErrorLocation::from(Location::caller()),
            }),
            outcome => Ok(outcome),
        }
    }
}
