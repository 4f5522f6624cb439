use crate::{CoreResult, RecorderError};

use std::{panic::Location, path::Path, process::Stdio};

use error_location::ErrorLocation;
use tokio::process::Command;
use tracing::{debug, instrument};

/// Read a media file's duration in seconds with `ffprobe`.
#[instrument]
pub async fn probe_duration(ffprobe: &Path, media: &Path) -> CoreResult<f64> {
    let output = Command::new(ffprobe)
        .args(["-v", "error"])
        .args(["-show_entries", "format=duration"])
        .args(["-of", "default=noprint_wrappers=1:nokey=1"])
        .arg(media)
        .stdin(Stdio::null())
        .output()
        .await
        .map_err(|e| RecorderError::SpawnFailed {
            program: ffprobe.to_path_buf(),
            source: e,
            location: ErrorLocation::from(Location::caller()),
        })?;

    if !output.status.success() {
        return Err(RecorderError::ProbeFailed {
            reason: format!(
                "ffprobe exited with {:?}: {}",
                output.status.code(),
                String::from_utf8_lossy(&output.stderr).trim()
            ),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let text = stdout.trim();

    let duration = text.parse::<f64>().map_err(|e| RecorderError::ProbeFailed {
        reason: format!("Failed to parse duration '{}': {}", text, e),
        location: ErrorLocation::from(Location::caller()),
    })?;

    if !duration.is_finite() || duration < 0.0 {
        return Err(RecorderError::ProbeFailed {
            reason: format!("Implausible duration {duration}"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    debug!(duration, "Probed duration");

    Ok(duration)
}
