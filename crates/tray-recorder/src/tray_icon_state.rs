/// Tray icon states corresponding to application workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrayIconState {
    /// Ready to start recording.
    Idle,
    /// Currently recording the screen.
    Recording,
    /// Waiting for the encoder to finalise the file.
    Stopping,
    /// Exporting a recording.
    Exporting,
}
