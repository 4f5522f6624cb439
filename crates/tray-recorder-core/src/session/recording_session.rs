//! Recording lifecycle: `Idle -> Recording -> Stopping -> Idle`.
//!
//! All transitions go through [`RecordingSession::begin`],
//! [`RecordingSession::end`] and [`RecordingSession::on_exit`]. The owner
//! serialises these calls on a single control task; the session never
//! blocks on the encoder.

use crate::{
    CaptureRegion, CoreResult, DisplaySize, EncoderInvocation, ExitOutcome, HandleId, Platform,
    ProcessExit, ProcessHandle, SessionEvent, SessionStatus, Spawner, artifact, format_elapsed,
};

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

/// Fixed inputs for every recording made by a session.
#[derive(Debug, Clone)]
pub struct SessionSettings {
    /// Platform whose capture driver is used.
    pub platform: Platform,
    /// Primary display size, used for full-screen capture.
    pub display: DisplaySize,
    /// Directory temporary recordings are written to.
    pub scratch_dir: PathBuf,
    /// Capture framerate.
    pub framerate: u32,
    /// Capture device override.
    pub input: Option<String>,
}

struct ActiveRecording {
    session_id: Uuid,
    handle: ProcessHandle,
    output_path: PathBuf,
    region: Option<CaptureRegion>,
    started_at: Instant,
}

/// The single recording session of the application.
pub struct RecordingSession<S: Spawner> {
    spawner: S,
    settings: SessionSettings,
    events: mpsc::UnboundedSender<SessionEvent>,
    status: SessionStatus,
    active: Option<ActiveRecording>,
}

impl<S: Spawner> RecordingSession<S> {
    /// Create an idle session.
    pub fn new(
        spawner: S,
        settings: SessionSettings,
        events: mpsc::UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            spawner,
            settings,
            events,
            status: SessionStatus::Idle,
            active: None,
        }
    }

    /// Current lifecycle state.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// Whether an encoder process is associated with the session.
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    /// Artifact path of the current recording; `None` while idle.
    pub fn output_path(&self) -> Option<&Path> {
        self.active.as_ref().map(|a| a.output_path.as_path())
    }

    /// Normalised capture region of the current recording.
    pub fn region(&self) -> Option<CaptureRegion> {
        self.active.as_ref().and_then(|a| a.region)
    }

    /// When the current recording started.
    pub fn started_at(&self) -> Option<Instant> {
        self.active.as_ref().map(|a| a.started_at)
    }

    /// Log correlation id of the current recording.
    pub fn session_id(&self) -> Option<Uuid> {
        self.active.as_ref().map(|a| a.session_id)
    }

    /// Handle id of the live encoder.
    pub fn handle_id(&self) -> Option<HandleId> {
        self.active.as_ref().map(|a| a.handle.id())
    }

    /// Access the spawner.
    pub fn spawner(&self) -> &S {
        &self.spawner
    }

    /// Start recording `region` (or the full display).
    ///
    /// Returns `Ok(false)` without side effects unless the session is idle.
    /// On error the session stays idle.
    #[track_caller]
    #[instrument(skip(self))]
    pub fn begin(&mut self, region: Option<CaptureRegion>) -> CoreResult<bool> {
        if self.status != SessionStatus::Idle || self.active.is_some() {
            debug!(status = ?self.status, "Begin ignored, session not idle");
            return Ok(false);
        }

        let region = region.map(CaptureRegion::normalized).transpose()?;

        std::fs::create_dir_all(&self.settings.scratch_dir)?;
        let output_path = artifact::recording_path(&self.settings.scratch_dir);

        let args = EncoderInvocation::new(
            self.settings.platform.clone(),
            self.settings.display,
            output_path.clone(),
        )
        .with_region(region)
        .with_framerate(self.settings.framerate)
        .with_input(self.settings.input.clone())
        .build()?;

        let handle = self.spawner.spawn(args)?;
        let session_id = Uuid::new_v4();

        info!(
            session_id = %session_id,
            handle = %handle.id(),
            output_path = ?output_path,
            region = ?region,
            "Recording started"
        );

        self.active = Some(ActiveRecording {
            session_id,
            handle,
            output_path: output_path.clone(),
            region,
            started_at: Instant::now(),
        });
        self.status = SessionStatus::Recording;

        self.emit(SessionEvent::Elapsed(format_elapsed(Duration::ZERO)));
        self.emit(SessionEvent::Started {
            session_id,
            output_path,
            region,
        });

        Ok(true)
    }

    /// Request a graceful stop of the current recording.
    ///
    /// Returns `false` without side effects unless recording. Cleanup
    /// happens when the exit event arrives.
    #[instrument(skip(self))]
    pub fn end(&mut self) -> bool {
        if self.status != SessionStatus::Recording {
            debug!(status = ?self.status, "End ignored, not recording");
            return false;
        }

        let Some(active) = self.active.as_ref() else {
            return false;
        };

        active.handle.request_graceful_stop();
        let session_id = active.session_id;
        self.status = SessionStatus::Stopping;

        info!(
            session_id = %session_id,
            elapsed_ms = active.started_at.elapsed().as_millis(),
            "Stop requested"
        );

        self.emit(SessionEvent::StopRequested { session_id });

        true
    }

    /// Consume the encoder's exit event and return to idle.
    ///
    /// Events for anything but the live handle are ignored and return `None`.
    #[instrument(skip(self))]
    pub fn on_exit(&mut self, exit: ProcessExit) -> Option<ExitOutcome> {
        if self.handle_id() != Some(exit.handle) {
            warn!(handle = %exit.handle, "Exit for unknown process ignored");
            return None;
        }

        let active = self.active.take()?;
        let previous = self.status;
        self.status = SessionStatus::Idle;

        let outcome = ExitOutcome::classify(&self.settings.platform, exit.code);
        let session_id = active.session_id;

        self.emit(SessionEvent::TimerHidden);

        match outcome.check() {
            Ok(outcome) => {
                info!(
                    session_id = %session_id,
                    artifact = ?active.output_path,
                    outcome = ?outcome,
                    "Recording complete"
                );
                self.emit(SessionEvent::Completed {
                    session_id,
                    artifact: active.output_path,
                    outcome,
                });
            }
            Err(e) => {
                error!(
                    session_id = %session_id,
                    status = ?previous,
                    error = %e,
                    "Encoder failed, discarding artifact"
                );
                discard(&active.output_path);
                self.emit(SessionEvent::Failed {
                    session_id,
                    code: exit.code,
                });
            }
        }

        Some(outcome)
    }

    /// Emit an elapsed-time update while an encoder is running.
    ///
    /// Returns the label that was sent.
    pub fn tick(&self) -> Option<String> {
        let active = self.active.as_ref()?;
        let label = format_elapsed(active.started_at.elapsed());
        self.emit(SessionEvent::Elapsed(label.clone()));
        Some(label)
    }

    fn emit(&self, event: SessionEvent) {
        if self.events.send(event).is_err() {
            debug!("Session event receiver dropped");
        }
    }
}

fn discard(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => debug!(path = ?path, "Artifact removed"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(path = ?path, error = ?e, "Failed to remove artifact"),
    }
}
