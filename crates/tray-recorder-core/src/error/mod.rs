use std::{panic::Location, path::PathBuf};

use error_location::ErrorLocation;
use thiserror::Error;

/// Recording, supervision and export errors with source location tracking.
#[derive(Error, Debug)]
pub enum RecorderError {
    /// The encoder or trim executable could not be located or launched.
    #[error("Failed to spawn {program:?}: {source} {location}")]
    SpawnFailed {
        /// Executable that failed to launch.
        program: PathBuf,
        /// Underlying OS error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The encoder exited with a code that is neither clean nor the stop code.
    #[error("Encoder exited unexpectedly with code {code:?} {location}")]
    EncodingFailed {
        /// Exit code, `None` when terminated by a signal.
        code: Option<i32>,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// No capture source is known for the current platform.
    #[error("Screen recording is not supported on {platform} {location}")]
    UnsupportedPlatform {
        /// Name of the unsupported platform.
        platform: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The capture region has no usable area after normalisation.
    #[error("Invalid capture region: {reason} {location}")]
    InvalidRegion {
        /// Description of the problem.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// A trim range was rejected before any process was started.
    #[error("Invalid trim range: {reason} {location}")]
    InvalidTrimRange {
        /// Description of the problem.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// The trim process failed; the destination file is not trusted.
    #[error("Trim failed: {reason} {location}")]
    TrimFailed {
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Reading the duration of a recording failed.
    #[error("Duration probe failed: {reason} {location}")]
    ProbeFailed {
        /// Description of the failure.
        reason: String,
        /// Source location where error occurred.
        location: ErrorLocation,
    },

    /// Filesystem error.
    #[error("IO error: {source} {location}")]
    Io {
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
        /// Source location where error occurred.
        location: ErrorLocation,
    },
}

impl From<std::io::Error> for RecorderError {
    #[track_caller]
    fn from(source: std::io::Error) -> Self {
        RecorderError::Io {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

/// Result type alias using [`RecorderError`].
pub type Result<T> = std::result::Result<T, RecorderError>;
