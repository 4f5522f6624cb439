use crate::{
    AppCommand, AppResult, Notifier, TrayCommand, TrayIconState, TrayMenuIds, config::Config,
    tray_manager::MenuAction,
};

use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
    time::Duration,
};

use rfd::AsyncFileDialog;
use tao::event_loop::EventLoopProxy;
use tokio::{
    sync::{mpsc, watch},
    time::{Instant, Interval, MissedTickBehavior},
};
use tracing::{debug, error, info, instrument, warn};
use tray_icon::menu::MenuEvent;
use tray_recorder_core::{
    CaptureRegion, DisplaySize, Platform, ProcessExit, ProcessSupervisor, RecordingSession,
    SessionEvent, SessionSettings, SessionStatus, TrimRequest, TrimSelection, Trimmer, artifact,
    probe_duration,
};

const TICK_INTERVAL: Duration = Duration::from_secs(1);
const SHUTDOWN_GRACE: Duration = Duration::from_secs(5);

/// Main application state.
///
/// Runs on the async runtime thread and owns the recording session. Tray
/// and window updates go back to the main thread through `tray_proxy`
/// because `TrayIcon` and `Window` are `!Send`.
pub struct App {
    session: RecordingSession<ProcessSupervisor>,
    exit_rx: mpsc::UnboundedReceiver<ProcessExit>,
    event_rx: mpsc::UnboundedReceiver<SessionEvent>,
    ticker: Interval,
    trimmer: Trimmer,
    ffprobe: PathBuf,
    scratch_dir: PathBuf,
    export_dir: PathBuf,
    open_preview: bool,
    notifier: Notifier,
    tray_proxy: EventLoopProxy<TrayCommand>,
    command_tx: mpsc::Sender<AppCommand>,
    command_rx: mpsc::Receiver<AppCommand>,
    shutdown_tx: watch::Sender<bool>,
    menu_ids: TrayMenuIds,
    last_recording: Option<PathBuf>,
    exporting: Option<PathBuf>,
    tray_state: TrayIconState,
}

impl App {
    /// Build the application from its configuration.
    ///
    /// Must be called from within a tokio runtime.
    pub(crate) fn new(
        config: &Config,
        display: DisplaySize,
        tray_proxy: EventLoopProxy<TrayCommand>,
        command_tx: mpsc::Sender<AppCommand>,
        command_rx: mpsc::Receiver<AppCommand>,
        shutdown_tx: watch::Sender<bool>,
        menu_ids: TrayMenuIds,
    ) -> Self {
        let (exit_tx, exit_rx) = mpsc::unbounded_channel();
        let (event_tx, event_rx) = mpsc::unbounded_channel();

        let settings = SessionSettings {
            platform: Platform::current(),
            display,
            scratch_dir: config.scratch_dir(),
            framerate: config.encoder.framerate,
            input: config.encoder.capture_input.clone(),
        };
        let supervisor = ProcessSupervisor::new(&config.encoder.ffmpeg_path, exit_tx);

        let mut ticker = tokio::time::interval(TICK_INTERVAL);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        Self {
            session: RecordingSession::new(supervisor, settings, event_tx),
            exit_rx,
            event_rx,
            ticker,
            trimmer: Trimmer::new(&config.encoder.ffmpeg_path),
            ffprobe: config.encoder.ffprobe_path.clone(),
            scratch_dir: config.scratch_dir(),
            export_dir: config.export_dir(),
            open_preview: config.behavior.open_preview,
            notifier: Notifier::new(config.behavior.notify_on_failure),
            tray_proxy,
            command_tx,
            command_rx,
            shutdown_tx,
            menu_ids,
            last_recording: None,
            exporting: None,
            tray_state: TrayIconState::Idle,
        }
    }

    /// Run the main application event loop.
    #[instrument(skip(self))]
    pub(crate) async fn run(mut self) -> AppResult<()> {
        info!(encoder = ?self.session.spawner().program(), "Tray Recorder starting");

        // Recordings only outlive a run when it ends without saving them.
        match artifact::prune_recordings(&self.scratch_dir) {
            Ok(0) => {}
            Ok(removed) => info!(removed, "Removed unsaved recordings from an earlier run"),
            Err(e) => warn!(
                dir = ?self.scratch_dir,
                error = ?e,
                "Failed to clean scratch directory"
            ),
        }

        // MenuEvent::receiver() is a blocking crossbeam receiver; one blocking
        // task forwards it until tray_event_rx is dropped.
        let (tray_event_tx, mut tray_event_rx) = mpsc::channel(32);
        let tray_handle = tokio::task::spawn_blocking(move || {
            let receiver = MenuEvent::receiver();
            while let Ok(event) = receiver.recv() {
                if tray_event_tx.blocking_send(event).is_err() {
                    break;
                }
            }
        });

        loop {
            tokio::select! {
                Some(event) = tray_event_rx.recv() => {
                    if self.handle_tray_event(event) {
                        info!("Exit requested from tray menu");
                        break;
                    }
                }

                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }

                Some(exit) = self.exit_rx.recv() => {
                    self.session.on_exit(exit);
                }

                Some(event) = self.event_rx.recv() => {
                    self.handle_session_event(event);
                }

                _ = self.ticker.tick(), if self.session.is_active() => {
                    self.session.tick();
                }

                else => {
                    info!("All channels closed, shutting down");
                    break;
                }
            }

            self.refresh_tray_state();
        }

        self.finish_recording().await;

        while let Ok(event) = self.event_rx.try_recv() {
            if let SessionEvent::Completed { artifact, .. } = event {
                info!(artifact = ?artifact, "Unsaved recording kept until next start");
            }
        }

        drop(tray_event_rx);

        match tokio::time::timeout(Duration::from_secs(1), tray_handle).await {
            Ok(Ok(())) => info!("Tray event forwarder stopped cleanly"),
            Ok(Err(e)) => error!(error = ?e, "Tray event forwarder task panicked"),
            Err(_) => info!(
                "Tray event forwarder did not stop within timeout, \
                     will be cleaned up on exit"
            ),
        }

        self.send_tray(TrayCommand::Shutdown);
        let _ = self.shutdown_tx.send(true);
        info!("Tray Recorder shut down successfully");

        Ok(())
    }

    fn handle_command(&mut self, cmd: AppCommand) {
        match cmd {
            AppCommand::ToggleRecording => self.toggle_recording(),
            AppCommand::RegionSelected(region) => self.start_recording(Some(region)),
            AppCommand::SaveLastRecording => self.save_last_recording(),
            AppCommand::TrimSelected { source, selection } => {
                self.export_selection(source, selection)
            }
            AppCommand::DiscardLastRecording => self.discard_last_recording(),
            AppCommand::OpenLastRecording => match &self.last_recording {
                Some(path) => open_artifact(path),
                None => debug!("No recording to open"),
            },
            AppCommand::ExportFinished { source, result } => self.export_finished(source, result),
        }
    }

    /// Handle tray menu events. Returns `true` when the user chose Exit.
    #[instrument(skip(self))]
    fn handle_tray_event(&mut self, event: MenuEvent) -> bool {
        let Some(action) = self.menu_ids.action(&event.id) else {
            debug!(id = ?event.id, "Unknown tray menu item");
            return false;
        };

        match action {
            MenuAction::ToggleRecording => self.toggle_recording(),
            MenuAction::SelectArea => {
                if self.session.status() == SessionStatus::Idle {
                    self.send_tray(TrayCommand::SelectRegion);
                } else {
                    debug!(
                        status = ?self.session.status(),
                        "Area selection ignored while recording"
                    );
                }
            }
            MenuAction::Save => self.save_last_recording(),
            MenuAction::Open => self.handle_command(AppCommand::OpenLastRecording),
            MenuAction::Discard => self.discard_last_recording(),
            MenuAction::Exit => return true,
        }
        false
    }

    fn toggle_recording(&mut self) {
        match self.session.status() {
            SessionStatus::Idle => self.start_recording(None),
            SessionStatus::Recording => {
                let elapsed_ms = self.session.started_at().map(|t| t.elapsed().as_millis());
                info!(region = ?self.session.region(), ?elapsed_ms, "Stopping recording");
                self.session.end();
            }
            SessionStatus::Stopping => debug!("Toggle ignored while the encoder is finishing"),
        }
    }

    fn start_recording(&mut self, region: Option<CaptureRegion>) {
        if let Err(e) = self.try_start_recording(region) {
            error!(error = ?e, "Failed to start recording");
            self.notifier.failure(format!("Could not start recording: {}", e));
        }
    }

    fn try_start_recording(&mut self, region: Option<CaptureRegion>) -> AppResult<()> {
        if self.session.begin(region)? {
            self.ticker.reset();
        } else {
            debug!("Recording already in progress");
        }
        Ok(())
    }

    fn handle_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::Elapsed(label) => self.send_tray(TrayCommand::SetElapsed(Some(label))),
            SessionEvent::TimerHidden => self.send_tray(TrayCommand::SetElapsed(None)),
            SessionEvent::Started { session_id, .. } => {
                debug!(session_id = %session_id, "Session started");
            }
            SessionEvent::StopRequested { session_id } => {
                debug!(session_id = %session_id, "Waiting for encoder to finish");
            }
            SessionEvent::Completed {
                session_id,
                artifact,
                ..
            } => {
                info!(session_id = %session_id, artifact = ?artifact, "Recording ready");

                // A newer recording supersedes the previous one unless it is
                // still being exported.
                if let Some(previous) = self.last_recording.replace(artifact.clone())
                    && self.exporting.as_ref() != Some(&previous)
                {
                    remove_artifact(&previous);
                }
                self.send_tray(TrayCommand::SetLastRecording(true));

                if self.open_preview {
                    open_artifact(&artifact);
                }
            }
            SessionEvent::Failed { session_id, code } => {
                warn!(session_id = %session_id, exit_code = ?code, "Recording failed");
                self.notifier
                    .failure(format!("Recording failed (encoder exit code {:?})", code));
            }
        }
    }

    /// Read the last recording's duration and open the trim window for it.
    fn save_last_recording(&mut self) {
        let Some(source) = self.last_recording.clone() else {
            debug!("No recording to save");
            return;
        };

        if let Some(running) = &self.exporting {
            info!(running = ?running, "Export already in progress");
            return;
        }

        self.exporting = Some(source.clone());
        info!(source = ?source, "Preparing export");

        let ffprobe = self.ffprobe.clone();
        let tray_proxy = self.tray_proxy.clone();
        let command_tx = self.command_tx.clone();

        tokio::spawn(async move {
            match probe_duration(&ffprobe, &source).await {
                Ok(duration) => {
                    let edit = TrayCommand::EditTrim { source, duration };
                    if let Err(e) = tray_proxy.send_event(edit) {
                        debug!(error = ?e, "Tray event loop closed before trim window opened");
                    }
                }
                Err(e) => {
                    let finished = AppCommand::ExportFinished {
                        source,
                        result: Err(e.into()),
                    };
                    if command_tx.send(finished).await.is_err() {
                        debug!("Control loop gone before export finished");
                    }
                }
            }
        });
    }

    /// Ask for a destination and export the confirmed range in the background.
    fn export_selection(&mut self, source: PathBuf, selection: TrimSelection) {
        info!(
            source = ?source,
            start = selection.start(),
            end = selection.end(),
            "Export range selected"
        );

        let trimmer = self.trimmer.clone();
        let export_dir = self.export_dir.clone();
        let command_tx = self.command_tx.clone();

        tokio::spawn(async move {
            let result = save_with_dialog(&trimmer, &export_dir, &source, &selection).await;
            if command_tx
                .send(AppCommand::ExportFinished { source, result })
                .await
                .is_err()
            {
                debug!("Control loop gone before export finished");
            }
        });
    }

    fn export_finished(&mut self, source: PathBuf, result: AppResult<Option<PathBuf>>) {
        self.exporting = None;

        match result {
            Ok(Some(destination)) => {
                info!(destination = ?destination, "Export complete");
                if self.last_recording.as_ref() == Some(&source) {
                    self.last_recording = None;
                    self.send_tray(TrayCommand::SetLastRecording(false));
                }
            }
            Ok(None) => info!(source = ?source, "Export cancelled, recording kept"),
            Err(e) => {
                error!(source = ?source, error = ?e, "Export failed, recording kept");
                self.notifier.failure(format!("Export failed: {}", e));
            }
        }
    }

    fn discard_last_recording(&mut self) {
        if self.exporting.is_some() && self.exporting == self.last_recording {
            warn!("Recording is being exported, not discarding");
            return;
        }

        if let Some(path) = self.last_recording.take() {
            remove_artifact(&path);
            self.send_tray(TrayCommand::SetLastRecording(false));
        }
    }

    /// Stop a running encoder and wait for its exit before shutting down.
    async fn finish_recording(&mut self) {
        if !self.session.is_active() {
            return;
        }

        self.session.end();
        info!("Waiting for encoder to finalise recording");

        let deadline = Instant::now() + SHUTDOWN_GRACE;
        loop {
            match tokio::time::timeout_at(deadline, self.exit_rx.recv()).await {
                Ok(Some(exit)) => {
                    if self.session.on_exit(exit).is_some() {
                        break;
                    }
                }
                Ok(None) => break,
                Err(_) => {
                    warn!(
                        grace_secs = SHUTDOWN_GRACE.as_secs(),
                        "Encoder did not exit in time"
                    );
                    break;
                }
            }
        }
    }

    fn refresh_tray_state(&mut self) {
        let state = tray_state(self.session.status(), self.exporting.is_some());
        if state != self.tray_state {
            self.tray_state = state;
            self.send_tray(TrayCommand::SetState(state));
        }
    }

    fn send_tray(&self, cmd: TrayCommand) {
        if let Err(e) = self.tray_proxy.send_event(cmd) {
            debug!(error = ?e, "Tray event loop closed");
        }
    }
}

/// Icon state for a session status. Recording states take precedence over
/// a background export.
pub(crate) fn tray_state(status: SessionStatus, exporting: bool) -> TrayIconState {
    match status {
        SessionStatus::Recording => TrayIconState::Recording,
        SessionStatus::Stopping => TrayIconState::Stopping,
        SessionStatus::Idle if exporting => TrayIconState::Exporting,
        SessionStatus::Idle => TrayIconState::Idle,
    }
}

/// Offer a save dialog seeded with a timestamped name, then export the
/// selected range there. `Ok(None)` when the dialog is dismissed.
async fn save_with_dialog(
    trimmer: &Trimmer,
    export_dir: &Path,
    source: &Path,
    selection: &TrimSelection,
) -> AppResult<Option<PathBuf>> {
    tokio::fs::create_dir_all(export_dir).await?;

    let Some(file) = AsyncFileDialog::new()
        .set_title("Save recording")
        .set_directory(export_dir)
        .set_file_name(artifact::suggested_export_name())
        .add_filter("MP4 video", &["mp4"])
        .save_file()
        .await
    else {
        return Ok(None);
    };

    let request = export_request(source, file.path().to_path_buf(), selection)?;
    export_recording(trimmer, &request).await.map(Some)
}

/// Build the export job for `selection` of `source`. A destination
/// without an extension gets `.mp4`.
#[track_caller]
pub(crate) fn export_request(
    source: &Path,
    mut destination: PathBuf,
    selection: &TrimSelection,
) -> AppResult<TrimRequest> {
    if destination.extension().is_none() {
        destination.set_extension("mp4");
    }

    Ok(TrimRequest {
        source: source.to_path_buf(),
        destination,
        range: selection.to_range()?,
    })
}

/// Run an export job, creating the destination directory first.
pub(crate) async fn export_recording(
    trimmer: &Trimmer,
    request: &TrimRequest,
) -> AppResult<PathBuf> {
    if let Some(dir) = request.destination.parent() {
        tokio::fs::create_dir_all(dir).await?;
    }

    Ok(trimmer.export(request).await?)
}

fn open_artifact(path: &Path) {
    if let Err(e) = open::that_detached(path) {
        warn!(path = ?path, error = ?e, "Failed to open recording");
    }
}

fn remove_artifact(path: &Path) {
    match std::fs::remove_file(path) {
        Ok(()) => info!(path = ?path, "Recording discarded"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(path = ?path, error = ?e, "Failed to remove recording"),
    }
}
