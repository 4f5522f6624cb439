mod elapsed;
mod event;
mod recording_session;
mod status;

pub use {
    elapsed::format_elapsed,
    event::SessionEvent,
    recording_session::{RecordingSession, SessionSettings},
    status::SessionStatus,
};
