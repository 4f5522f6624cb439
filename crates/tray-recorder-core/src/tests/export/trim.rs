use crate::{MIN_SELECTION_SECS, RecorderError, TrimRange, TrimSelection};

/// WHAT: A range whose end precedes its start is rejected
/// WHY: The trim command must never run with a negative duration
#[test]
fn given_end_before_start_when_creating_range_then_invalid_trim_range() {
    // Given/When: start=5, end=2
    let result = TrimRange::new(5.0, 2.0, None);

    // Then: Rejected before any invocation
    assert!(matches!(result, Err(RecorderError::InvalidTrimRange { .. })));
}

/// WHAT: Ranges outside the recording are rejected
/// WHY: Both bounds must lie within [0, duration]
#[test]
fn given_out_of_bounds_ranges_when_creating_then_rejected() {
    assert!(TrimRange::new(-1.0, 2.0, Some(10.0)).is_err());
    assert!(TrimRange::new(1.0, 10.5, Some(10.0)).is_err());
    assert!(TrimRange::new(3.0, 3.0, Some(10.0)).is_err());
    assert!(TrimRange::new(f64::NAN, 3.0, Some(10.0)).is_err());
}

/// WHAT: A valid range reports its bounds and length
/// WHY: The trim command takes a start offset and a duration
#[test]
#[allow(clippy::unwrap_used)]
fn given_valid_bounds_when_creating_range_then_duration_is_difference() {
    let range = TrimRange::new(2.5, 10.0, Some(10.0)).unwrap();

    assert!((range.start() - 2.5).abs() < f64::EPSILON);
    assert!((range.end() - 10.0).abs() < f64::EPSILON);
    assert!((range.duration() - 7.5).abs() < f64::EPSILON);
}

/// WHAT: The selection starts as the whole recording
/// WHY: Saving without touching the handles exports everything
#[test]
#[allow(clippy::unwrap_used)]
fn given_new_selection_when_converting_then_full_range() {
    let selection = TrimSelection::new(12.0);

    let range = selection.to_range().unwrap();

    assert!((range.start() - 0.0).abs() < f64::EPSILON);
    assert!((range.end() - 12.0).abs() < f64::EPSILON);
}

/// WHAT: Handles cannot cross or leave the recording
/// WHY: The selection always keeps a minimum length inside [0, duration]
#[test]
#[allow(clippy::unwrap_used)]
fn given_handles_dragged_past_limits_when_moving_then_clamped() {
    // Given: A 10 second selection
    let mut selection = TrimSelection::new(10.0);

    // When: Dragging the end handle to 4s, then the start handle past it
    selection.set_end(4.0);
    selection.set_start(9.0);

    // Then: The start stops MIN_SELECTION_SECS before the end
    assert!((selection.end() - 4.0).abs() < 1e-9);
    assert!((selection.start() - (4.0 - MIN_SELECTION_SECS)).abs() < 1e-9);

    // When: Dragging the end below the start and the start below zero
    selection.set_end(0.0);
    selection.set_start(-5.0);

    // Then: End stays MIN_SELECTION_SECS past the old start, start clamps to zero
    assert!((selection.end() - 4.0).abs() < 1e-9);
    assert!(selection.start().abs() < 1e-9);

    // When: Dragging the end beyond the recording
    selection.set_end(99.0);

    // Then: It clamps to the duration and still converts to a valid range
    assert!((selection.end() - 10.0).abs() < 1e-9);
    assert!(selection.to_range().is_ok());
}
