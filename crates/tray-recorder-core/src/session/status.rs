/// Lifecycle state of the recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    /// No encoder is running.
    Idle,
    /// The encoder is capturing.
    Recording,
    /// A stop was requested; waiting for the encoder to exit.
    Stopping,
}
