//! Naming of recordings on disk.

use std::{
    io::{self, ErrorKind},
    path::{Path, PathBuf},
    time::{SystemTime, UNIX_EPOCH},
};

use tracing::{debug, warn};
use uuid::Uuid;

const PREFIX: &str = "recording-";
const EXTENSION: &str = "mp4";

/// Fresh, process-unique path for a temporary recording in `scratch_dir`.
pub fn recording_path(scratch_dir: &Path) -> PathBuf {
    let nonce = Uuid::new_v4().simple().to_string();
    scratch_dir.join(format!(
        "{PREFIX}{}-{}.{EXTENSION}",
        unix_millis(),
        nonce.get(..8).unwrap_or(&nonce)
    ))
}

/// Default file name offered when exporting a recording.
pub fn suggested_export_name() -> String {
    format!("{PREFIX}{}.{EXTENSION}", unix_millis())
}

/// Delete temporary recordings left in `scratch_dir` by earlier runs.
///
/// Only files named like [`recording_path`] output are touched. A missing
/// directory counts as empty. Returns the number of files removed.
pub fn prune_recordings(scratch_dir: &Path) -> io::Result<usize> {
    let entries = match std::fs::read_dir(scratch_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
        Err(e) => return Err(e),
    };

    let mut removed = 0;
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() || !is_recording_name(&path) {
            continue;
        }
        match std::fs::remove_file(&path) {
            Ok(()) => {
                debug!(path = ?path, "Removed stale recording");
                removed += 1;
            }
            Err(e) => warn!(path = ?path, error = ?e, "Failed to remove stale recording"),
        }
    }
    Ok(removed)
}

fn is_recording_name(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
    name.starts_with(PREFIX) && path.extension().and_then(|e| e.to_str()) == Some(EXTENSION)
}

fn unix_millis() -> u128 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default()
}
