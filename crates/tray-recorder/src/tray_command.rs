use crate::TrayIconState;

use std::path::PathBuf;

/// Commands sent from the async runtime to the main UI thread.
///
/// The main thread owns `TrayManager` and the selection and trim windows
/// (all `!Send`), so all UI mutations flow through this enum.
#[derive(Debug, Clone)]
pub enum TrayCommand {
    /// Update the tray icon to a new state.
    SetState(TrayIconState),
    /// Show an `MM:SS` elapsed label, or hide it with `None`.
    SetElapsed(Option<String>),
    /// Enable or disable the menu items acting on the last recording.
    SetLastRecording(bool),
    /// Open the drag-to-select region window.
    SelectRegion,
    /// Open the trim window for a recording of `duration` seconds.
    EditTrim {
        /// Recording to export.
        source: PathBuf,
        /// Recording length in seconds, as reported by ffprobe.
        duration: f64,
    },
    /// Shut down the application. The main thread will exit the event loop.
    Shutdown,
}
