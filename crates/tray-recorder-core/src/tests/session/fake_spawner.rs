use crate::{CoreResult, HandleId, ProcessHandle, RecorderError, Spawner};

use std::{
    ffi::OsString,
    panic::Location,
    sync::{Arc, Mutex},
};

use error_location::ErrorLocation;
use tokio::sync::mpsc;

/// Shared view of what a [`FakeSpawner`] was asked to do.
#[derive(Default)]
pub(crate) struct FakeState {
    pub(crate) spawned: Vec<Vec<OsString>>,
    pub(crate) stop_rx: Vec<(HandleId, mpsc::UnboundedReceiver<()>)>,
    pub(crate) fail_next: bool,
}

impl FakeState {
    /// Number of stop requests received by `id` since the last call.
    pub(crate) fn drain_stops(&mut self, id: HandleId) -> usize {
        let mut count = 0;
        for (handle, rx) in &mut self.stop_rx {
            if *handle == id {
                while rx.try_recv().is_ok() {
                    count += 1;
                }
            }
        }
        count
    }
}

/// Spawner that records argument lists instead of starting processes.
pub(crate) struct FakeSpawner {
    pub(crate) state: Arc<Mutex<FakeState>>,
}

impl FakeSpawner {
    pub(crate) fn new() -> (Self, Arc<Mutex<FakeState>>) {
        let state = Arc::new(Mutex::new(FakeState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            state,
        )
    }
}

impl Spawner for FakeSpawner {
    fn spawn(&mut self, args: Vec<OsString>) -> CoreResult<ProcessHandle> {
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());

        if state.fail_next {
            state.fail_next = false;
            return Err(RecorderError::SpawnFailed {
                program: "ffmpeg".into(),
                source: std::io::Error::new(std::io::ErrorKind::NotFound, "not installed"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        state.spawned.push(args);
        let id = HandleId(state.spawned.len() as u64);
        let (stop_tx, stop_rx) = mpsc::unbounded_channel();
        state.stop_rx.push((id, stop_rx));

        Ok(ProcessHandle::new(id, stop_tx))
    }
}

/// Idle Linux session writing into `scratch_dir`, driven by a fake spawner.
pub(crate) fn new_session(
    scratch_dir: &std::path::Path,
) -> (
    crate::RecordingSession<FakeSpawner>,
    Arc<Mutex<FakeState>>,
    mpsc::UnboundedReceiver<crate::SessionEvent>,
) {
    let (spawner, state) = FakeSpawner::new();
    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let settings = crate::SessionSettings {
        platform: crate::Platform::Linux,
        display: crate::DisplaySize::new(1920, 1080),
        scratch_dir: scratch_dir.to_path_buf(),
        framerate: 30,
        input: None,
    };
    (
        crate::RecordingSession::new(spawner, settings, event_tx),
        state,
        event_rx,
    )
}

/// Everything emitted so far.
pub(crate) fn drain_events(
    rx: &mut mpsc::UnboundedReceiver<crate::SessionEvent>,
) -> Vec<crate::SessionEvent> {
    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    events
}
