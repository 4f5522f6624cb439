use crate::{CaptureRegion, RegionSelector, SelectionOutcome};

/// WHAT: Press, drag and release reports the dragged rectangle
/// WHY: This is the single "selection complete" message of the surface
#[test]
fn given_drag_gesture_when_released_then_selection_complete() {
    // Given: A selector with the pointer at (40, 30)
    let mut selector = RegionSelector::new();
    selector.pointer_moved(40, 30);

    // When: Pressing, dragging to (140, 90), and releasing
    selector.button_pressed();
    selector.pointer_moved(140, 90);
    let outcome = selector.button_released();

    // Then: The rectangle between the two points is reported
    assert_eq!(
        outcome,
        Some(SelectionOutcome::Complete(CaptureRegion::new(40, 30, 100, 60)))
    );
}

/// WHAT: The in-progress rectangle follows the pointer
/// WHY: The outline drawn during the drag needs the live rectangle
#[test]
fn given_active_drag_when_pointer_moves_then_current_region_tracks_pointer() {
    // Given: A drag started at the origin
    let mut selector = RegionSelector::new();
    selector.pointer_moved(0, 0);
    selector.button_pressed();

    // When: Moving the pointer
    selector.pointer_moved(64, 48);

    // Then: The current rectangle reflects the pointer position
    assert_eq!(selector.current(), Some(CaptureRegion::new(0, 0, 64, 48)));
}

/// WHAT: Releasing where the drag began cancels
/// WHY: Zero-area selections must not start a recording
#[test]
fn given_click_without_drag_when_released_then_cancelled() {
    // Given: A press at (10, 10)
    let mut selector = RegionSelector::new();
    selector.pointer_moved(10, 10);
    selector.button_pressed();

    // When: Releasing without moving
    let outcome = selector.button_released();

    // Then: The selection is cancelled
    assert_eq!(outcome, Some(SelectionOutcome::Cancelled));
}

/// WHAT: Escape abandons an in-progress drag
/// WHY: Cancelling must leave no pending anchor behind
#[test]
fn given_active_drag_when_cancelled_then_release_is_ignored() {
    // Given: A drag in progress
    let mut selector = RegionSelector::new();
    selector.pointer_moved(10, 10);
    selector.button_pressed();
    selector.pointer_moved(50, 50);

    // When: Cancelling, then releasing the button
    let cancelled = selector.cancel();
    let released = selector.button_released();

    // Then: Cancel reports Cancelled and the release reports nothing
    assert_eq!(cancelled, SelectionOutcome::Cancelled);
    assert_eq!(released, None);
    assert_eq!(selector.current(), None);
}
