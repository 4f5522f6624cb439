use crate::AppResult;

use tray_recorder_core::{CaptureRegion, TrimSelection};

use std::path::PathBuf;

/// Commands delivered to the application control loop.
#[derive(Debug)]
pub enum AppCommand {
    /// Start a full-screen recording, or stop the current one.
    ToggleRecording,
    /// The region selection window reported a rectangle in screen pixels.
    RegionSelected(CaptureRegion),
    /// Export the last finished recording.
    SaveLastRecording,
    /// The trim window confirmed a range; ask for a destination and export.
    TrimSelected {
        /// Recording to cut from.
        source: PathBuf,
        /// Range chosen in the trim window.
        selection: TrimSelection,
    },
    /// Delete the last finished recording.
    DiscardLastRecording,
    /// Open the last finished recording in the system player.
    OpenLastRecording,
    /// A background export finished or was cancelled.
    ExportFinished {
        /// Recording that was exported.
        source: PathBuf,
        /// Destination on success, `None` when the user cancelled.
        result: AppResult<Option<PathBuf>>,
    },
}
