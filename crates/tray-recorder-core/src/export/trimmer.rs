//! Re-encode a sub-range of a recording into its export destination.

use crate::{CoreResult, RecorderError, TrimRange};

use std::{
    ffi::OsString,
    panic::Location,
    path::{Path, PathBuf},
    process::Stdio,
};

use error_location::ErrorLocation;
use tracing::{debug, error, info, instrument, warn};

/// One export job.
#[derive(Debug, Clone, PartialEq)]
pub struct TrimRequest {
    /// Temporary recording to cut from.
    pub source: PathBuf,
    /// User-chosen output file.
    pub destination: PathBuf,
    /// Portion of `source` to keep.
    pub range: TrimRange,
}

/// Runs the trim command to completion.
#[derive(Debug, Clone)]
pub struct Trimmer {
    program: PathBuf,
}

impl Trimmer {
    /// Create a trimmer invoking `program` (normally `ffmpeg`).
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Argument list for `request`, excluding the program name.
    ///
    /// Both video and audio are re-encoded so the output plays everywhere.
    pub fn arguments(request: &TrimRequest) -> Vec<OsString> {
        let start = format!("{:.3}", request.range.start());
        let length = format!("{:.3}", request.range.duration());

        let mut args: Vec<OsString> = ["-y", "-ss", start.as_str(), "-i"]
            .iter()
            .map(OsString::from)
            .collect();
        args.push(request.source.clone().into_os_string());
        args.extend(
            [
                "-t",
                length.as_str(),
                "-c:v",
                "libx264",
                "-preset",
                "ultrafast",
                "-pix_fmt",
                "yuv420p",
                "-c:a",
                "aac",
            ]
            .iter()
            .map(OsString::from),
        );
        args.push(request.destination.clone().into_os_string());
        args
    }

    /// Export the range and delete the source recording on success.
    ///
    /// On failure the source is kept and the destination must not be
    /// trusted. There is no cancellation once started.
    #[instrument(skip(self), fields(program = ?self.program))]
    pub async fn export(&self, request: &TrimRequest) -> CoreResult<PathBuf> {
        if same_file(&request.source, &request.destination) {
            return Err(RecorderError::TrimFailed {
                reason: format!("destination {:?} is the source recording", request.destination),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let args = Self::arguments(request);
        debug!(?args, "Starting trim");

        let output = tokio::process::Command::new(&self.program)
            .args(&args)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| RecorderError::SpawnFailed {
                program: self.program.clone(),
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let last_line = stderr.lines().rev().find(|l| !l.trim().is_empty());
            error!(
                exit_code = ?output.status.code(),
                source = ?request.source,
                "Trim failed, keeping source recording"
            );
            return Err(RecorderError::TrimFailed {
                reason: format!(
                    "exit code {:?}: {}",
                    output.status.code(),
                    last_line.unwrap_or("no diagnostic output").trim()
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if let Err(e) = tokio::fs::remove_file(&request.source).await {
            warn!(source = ?request.source, error = ?e, "Exported, but failed to remove source recording");
        }

        info!(
            destination = ?request.destination,
            start = request.range.start(),
            end = request.range.end(),
            "Export complete"
        );

        Ok(request.destination.clone())
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
