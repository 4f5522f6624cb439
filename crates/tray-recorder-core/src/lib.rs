//! Tray Recorder Core Library
//!
//! Recording-session lifecycle and external encoder supervision for a
//! screen recorder that delegates capture and encoding to `ffmpeg`.
//!
//! # Example
//!
//! ```no_run
//! use tray_recorder_core::{
//!     CoreResult, DisplaySize, Platform, ProcessSupervisor, RecordingSession, SessionSettings,
//! };
//!
//! #[tokio::main]
//! async fn main() -> CoreResult<()> {
//!     let (exit_tx, mut exit_rx) = tokio::sync::mpsc::unbounded_channel();
//!     let (event_tx, _event_rx) = tokio::sync::mpsc::unbounded_channel();
//!
//!     let settings = SessionSettings {
//!         platform: Platform::current(),
//!         display: DisplaySize::new(1920, 1080),
//!         scratch_dir: std::env::temp_dir().join("tray-recorder"),
//!         framerate: 30,
//!         input: None,
//!     };
//!     let mut session =
//!         RecordingSession::new(ProcessSupervisor::new("ffmpeg", exit_tx), settings, event_tx);
//!
//!     session.begin(None)?;
//!     tokio::time::sleep(std::time::Duration::from_secs(3)).await;
//!     session.end();
//!
//!     if let Some(exit) = exit_rx.recv().await {
//!         session.on_exit(exit);
//!     }
//!     Ok(())
//! }
//! ```

mod capture;
mod encoder;
mod error;
mod export;
mod process;
mod session;

pub use {
    capture::{CaptureRegion, DisplaySize, Platform, RegionSelector, SelectionOutcome},
    encoder::{DEFAULT_FRAMERATE, EncoderInvocation, ExitOutcome},
    error::{RecorderError, Result as CoreResult},
    export::{
        MIN_SELECTION_SECS, TrimRange, TrimRequest, TrimSelection, Trimmer, artifact,
        probe_duration,
    },
    process::{HandleId, ProcessExit, ProcessHandle, ProcessSupervisor, STOP_TOKEN, Spawner},
    session::{RecordingSession, SessionEvent, SessionSettings, SessionStatus, format_elapsed},
};

#[cfg(test)]
mod tests;
