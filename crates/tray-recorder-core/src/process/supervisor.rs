//! External process supervision.
//!
//! Each spawned process gets one supervising task that owns the child and
//! its stdin. The task writes the stop token when asked and reports the exit
//! code on the supervisor's exit channel once the child is gone.

use crate::{CoreResult, HandleId, ProcessExit, ProcessHandle, RecorderError};

use std::{
    ffi::OsString,
    panic::Location,
    path::{Path, PathBuf},
    process::Stdio,
};

use error_location::ErrorLocation;
use tokio::{
    io::{AsyncBufReadExt, AsyncRead, AsyncWriteExt, BufReader},
    process::{Child, ChildStdin, Command},
    sync::mpsc,
};
use tracing::{debug, error, info, instrument, warn};

/// Written to the encoder's stdin to request a clean finalise-and-exit.
pub const STOP_TOKEN: &[u8] = b"q";

/// Something that can start a supervised process.
///
/// The session only talks to this seam, so it can be driven without real
/// child processes.
pub trait Spawner {
    /// Start a process with `args`. Its exit is reported asynchronously.
    fn spawn(&mut self, args: Vec<OsString>) -> CoreResult<ProcessHandle>;
}

/// Spawns and supervises a fixed executable (the encoder).
pub struct ProcessSupervisor {
    program: PathBuf,
    exit_tx: mpsc::UnboundedSender<ProcessExit>,
    next_id: u64,
}

impl ProcessSupervisor {
    /// Create a supervisor reporting exits on `exit_tx`.
    pub fn new(program: impl Into<PathBuf>, exit_tx: mpsc::UnboundedSender<ProcessExit>) -> Self {
        Self {
            program: program.into(),
            exit_tx,
            next_id: 0,
        }
    }

    /// Executable this supervisor launches.
    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Spawner for ProcessSupervisor {
    /// Must be called from within a tokio runtime.
    #[track_caller]
    #[instrument(skip(self, args), fields(program = ?self.program))]
    fn spawn(&mut self, args: Vec<OsString>) -> CoreResult<ProcessHandle> {
        debug!(?args, "Spawning process");

        let mut child = Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| RecorderError::SpawnFailed {
                program: self.program.clone(),
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;

        self.next_id += 1;
        let id = HandleId(self.next_id);

        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_output(stdout, id, "stdout"));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_output(stderr, id, "stderr"));
        }

        let pid = child.id();
        let stdin = child.stdin.take();
        let (stop_tx, stop_rx) = mpsc::unbounded_channel();
        tokio::spawn(supervise(child, stdin, stop_rx, id, self.exit_tx.clone()));

        info!(handle = %id, pid = ?pid, "Process spawned");

        Ok(ProcessHandle::new(id, stop_tx))
    }
}

async fn supervise(
    mut child: Child,
    mut stdin: Option<ChildStdin>,
    mut stop_rx: mpsc::UnboundedReceiver<()>,
    id: HandleId,
    exit_tx: mpsc::UnboundedSender<ProcessExit>,
) {
    let status = loop {
        tokio::select! {
            status = child.wait() => break status,
            Some(()) = stop_rx.recv(), if stdin.is_some() => {
                // Only the first request writes; stdin is closed afterwards.
                if let Some(mut pipe) = stdin.take() {
                    match pipe.write_all(STOP_TOKEN).await {
                        Ok(()) => {
                            let _ = pipe.flush().await;
                            info!(handle = %id, "Stop token sent");
                        }
                        Err(e) => warn!(handle = %id, error = ?e, "Failed to send stop token"),
                    }
                }
            }
        }
    };

    let code = match status {
        Ok(status) => status.code(),
        Err(e) => {
            error!(handle = %id, error = ?e, "Failed to wait for process");
            None
        }
    };

    info!(handle = %id, exit_code = ?code, "Process exited");

    if exit_tx.send(ProcessExit { handle: id, code }).is_err() {
        debug!(handle = %id, "Exit receiver dropped");
    }
}

async fn forward_output<R>(stream: R, id: HandleId, label: &'static str)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(stream).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) => {
                let line = line.trim();
                if !line.is_empty() {
                    debug!(handle = %id, stream = label, "{}", line);
                }
            }
            Ok(None) => break,
            Err(e) => {
                debug!(handle = %id, stream = label, error = ?e, "Output stream closed");
                break;
            }
        }
    }
}
