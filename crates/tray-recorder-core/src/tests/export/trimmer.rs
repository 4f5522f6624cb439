use crate::{RecorderError, TrimRange, TrimRequest, Trimmer};

use std::{ffi::OsString, path::PathBuf};

#[allow(clippy::unwrap_used)]
fn request(source: PathBuf, destination: PathBuf) -> TrimRequest {
    TrimRequest {
        source,
        destination,
        range: TrimRange::new(5.0, 8.0, Some(10.0)).unwrap(),
    }
}

/// WHAT: The trim command seeks, limits duration and re-encodes both streams
/// WHY: The export must contain only the selected range and play everywhere
#[test]
fn given_request_when_building_arguments_then_seek_duration_and_codecs_present() {
    // Given: A 5s..8s export request
    let req = request("/tmp/in.mp4".into(), "/home/me/out.mp4".into());

    // When: Building the argument list
    let args = Trimmer::arguments(&req);

    // Then: The arguments are in the expected order
    let expected: Vec<OsString> = [
        "-y",
        "-ss",
        "5.000",
        "-i",
        "/tmp/in.mp4",
        "-t",
        "3.000",
        "-c:v",
        "libx264",
        "-preset",
        "ultrafast",
        "-pix_fmt",
        "yuv420p",
        "-c:a",
        "aac",
        "/home/me/out.mp4",
    ]
    .iter()
    .map(OsString::from)
    .collect();
    assert_eq!(args, expected);
}

/// WHAT: A successful trim deletes the temporary recording
/// WHY: Ownership passes to the exported file
#[cfg(unix)]
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_successful_trim_when_exporting_then_source_removed() {
    // Given: A source recording and a trim command that succeeds
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("recording.mp4");
    std::fs::write(&source, b"video").unwrap();
    let destination = dir.path().join("export.mp4");
    let trimmer = Trimmer::new("true");

    // When: Exporting
    let result = trimmer.export(&request(source.clone(), destination.clone())).await;

    // Then: The destination is returned and the source is gone
    assert_eq!(result.unwrap(), destination);
    assert!(!source.exists());
}

/// WHAT: A failed trim keeps the temporary recording
/// WHY: The user must not lose the recording when the export fails
#[cfg(unix)]
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_failing_trim_when_exporting_then_trim_failed_and_source_kept() {
    // Given: A source recording and a trim command that exits non-zero
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("recording.mp4");
    std::fs::write(&source, b"video").unwrap();
    let trimmer = Trimmer::new("false");

    // When: Exporting
    let result = trimmer
        .export(&request(source.clone(), dir.path().join("export.mp4")))
        .await;

    // Then: TrimFailed is returned and the source remains
    assert!(matches!(result, Err(RecorderError::TrimFailed { .. })));
    assert!(source.exists());
}

/// WHAT: A missing trim executable fails with SpawnFailed
/// WHY: Spawn errors are distinguished from encoding failures
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_missing_executable_when_exporting_then_spawn_failed_and_source_kept() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("recording.mp4");
    std::fs::write(&source, b"video").unwrap();
    let trimmer = Trimmer::new("/nonexistent/ffmpeg");

    let result = trimmer
        .export(&request(source.clone(), dir.path().join("export.mp4")))
        .await;

    assert!(matches!(result, Err(RecorderError::SpawnFailed { .. })));
    assert!(source.exists());
}

/// WHAT: Exporting onto the source file is refused
/// WHY: Success would delete the only copy of the recording
#[tokio::test]
#[allow(clippy::unwrap_used)]
async fn given_destination_equal_to_source_when_exporting_then_trim_failed() {
    let dir = tempfile::tempdir().unwrap();
    let source = dir.path().join("recording.mp4");
    std::fs::write(&source, b"video").unwrap();
    let trimmer = Trimmer::new("true");

    let result = trimmer.export(&request(source.clone(), source.clone())).await;

    assert!(matches!(result, Err(RecorderError::TrimFailed { .. })));
    assert!(source.exists());
}
