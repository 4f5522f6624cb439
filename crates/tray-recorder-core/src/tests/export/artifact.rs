use crate::artifact;

use std::path::Path;

/// WHAT: Recording paths are unique, timestamped and inside the scratch dir
/// WHY: Two recordings in the same millisecond must not overwrite each other
#[test]
fn given_scratch_dir_when_naming_recordings_then_unique_mp4_paths() {
    // Given: A scratch directory
    let scratch = Path::new("/tmp/tray-recorder");

    // When: Naming two recordings back to back
    let first = artifact::recording_path(scratch);
    let second = artifact::recording_path(scratch);

    // Then: Both live in the scratch dir, use the mp4 extension, and differ
    assert_ne!(first, second);
    for path in [&first, &second] {
        assert_eq!(path.parent(), Some(scratch));
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("mp4"));
        let name = path.file_name().and_then(|n| n.to_str()).unwrap_or_default();
        assert!(name.starts_with("recording-"));
    }
}

/// WHAT: The suggested export name is timestamp-derived
/// WHY: The save step offers a sensible default file name
#[test]
fn given_nothing_when_suggesting_export_name_then_timestamped_mp4() {
    let name = artifact::suggested_export_name();

    let stamp = name
        .strip_prefix("recording-")
        .and_then(|rest| rest.strip_suffix(".mp4"))
        .unwrap_or_default();
    assert!(!stamp.is_empty());
    assert!(stamp.chars().all(|c| c.is_ascii_digit()));
}

/// WHAT: Pruning removes leftover recordings and leaves other files alone
/// WHY: Unsaved recordings from earlier runs must not pile up in scratch
#[test]
#[allow(clippy::unwrap_used)]
fn given_scratch_with_leftovers_when_pruning_then_only_recordings_removed() {
    // Given: Two leftover recordings and two unrelated files
    let dir = tempfile::tempdir().unwrap();
    let first = artifact::recording_path(dir.path());
    let second = artifact::recording_path(dir.path());
    std::fs::write(&first, b"a").unwrap();
    std::fs::write(&second, b"b").unwrap();
    let notes = dir.path().join("notes.txt");
    let other_video = dir.path().join("holiday.mp4");
    std::fs::write(&notes, b"keep").unwrap();
    std::fs::write(&other_video, b"keep").unwrap();

    // When: Pruning the scratch dir
    let removed = artifact::prune_recordings(dir.path()).unwrap();

    // Then: Only the recordings are gone
    assert_eq!(removed, 2);
    assert!(!first.exists());
    assert!(!second.exists());
    assert!(notes.exists());
    assert!(other_video.exists());
}

/// WHAT: Pruning a scratch dir that does not exist yet is a no-op
/// WHY: The first run has no scratch dir until a recording starts
#[test]
#[allow(clippy::unwrap_used)]
fn given_missing_scratch_when_pruning_then_nothing_removed() {
    // Given: A path that does not exist
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("never-created");

    // When: Pruning it
    let removed = artifact::prune_recordings(&missing).unwrap();

    // Then: Nothing is reported
    assert_eq!(removed, 0);
}
