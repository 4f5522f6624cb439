use crate::{CaptureRegion, ExitOutcome};

use std::path::PathBuf;

use uuid::Uuid;

/// Notifications from the session to the UI collaborators.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The encoder was spawned and capture has begun.
    Started {
        /// Log correlation id for this recording.
        session_id: Uuid,
        /// Where the artifact is being written.
        output_path: PathBuf,
        /// Normalised capture region, `None` for full screen.
        region: Option<CaptureRegion>,
    },
    /// Elapsed time display update, formatted `MM:SS`.
    Elapsed(String),
    /// A graceful stop was sent to the encoder.
    StopRequested {
        /// Log correlation id for this recording.
        session_id: Uuid,
    },
    /// The elapsed-time display should disappear.
    TimerHidden,
    /// The encoder exited cleanly; the artifact is ready for preview/export.
    Completed {
        /// Log correlation id for this recording.
        session_id: Uuid,
        /// The finished recording.
        artifact: PathBuf,
        /// How the encoder exited.
        outcome: ExitOutcome,
    },
    /// The encoder failed; the artifact was discarded.
    Failed {
        /// Log correlation id for this recording.
        session_id: Uuid,
        /// Encoder exit code, `None` when terminated by a signal.
        code: Option<i32>,
    },
}
