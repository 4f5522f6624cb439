use std::fmt;

use tokio::sync::mpsc;
use tracing::debug;

/// Identifies one spawned process for the lifetime of its supervisor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandleId(pub u64);

impl fmt::Display for HandleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Completion event for a supervised process. Sent exactly once per spawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessExit {
    /// Which process exited.
    pub handle: HandleId,
    /// Exit code, `None` when the process was terminated by a signal.
    pub code: Option<i32>,
}

/// Caller-side handle to a supervised process.
///
/// Dropping the handle does not stop the process; only the exit event ends
/// its lifecycle.
#[derive(Debug)]
pub struct ProcessHandle {
    id: HandleId,
    stop_tx: mpsc::UnboundedSender<()>,
}

impl ProcessHandle {
    /// Pair an id with the channel its supervising task listens on for stop
    /// requests.
    pub fn new(id: HandleId, stop_tx: mpsc::UnboundedSender<()>) -> Self {
        Self { id, stop_tx }
    }

    /// Id carried by this process's [`ProcessExit`].
    pub fn id(&self) -> HandleId {
        self.id
    }

    /// Ask the process to finalise and exit. Returns immediately.
    ///
    /// No-op once the process has exited.
    pub fn request_graceful_stop(&self) {
        if self.stop_tx.send(()).is_err() {
            debug!(handle = %self.id, "Stop requested after process exit, ignoring");
        }
    }
}
