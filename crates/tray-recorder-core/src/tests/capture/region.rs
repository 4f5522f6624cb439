use crate::{CaptureRegion, RecorderError};

/// WHAT: Dragging up and to the left still yields a positive rectangle
/// WHY: The selection surface reports corners in drag order, not sorted
#[test]
fn given_reversed_drag_when_building_region_then_origin_is_top_left() {
    // Given: A drag from (300, 200) back to (100, 50)
    let start = (300, 200);
    let end = (100, 50);

    // When: Building the region from the corners
    let region = CaptureRegion::from_corners(start, end);

    // Then: Origin is the top-left corner and size is the absolute span
    assert_eq!(region, Some(CaptureRegion::new(100, 50, 200, 150)));
}

/// WHAT: A drag with no width or height produces no region
/// WHY: Zero-area selections cancel instead of starting a recording
#[test]
fn given_zero_area_drag_when_building_region_then_none() {
    // Given/When: Drags that collapse horizontally or vertically
    let flat = CaptureRegion::from_corners((10, 10), (200, 10));
    let thin = CaptureRegion::from_corners((10, 10), (10, 200));

    // Then: No region is produced
    assert_eq!(flat, None);
    assert_eq!(thin, None);
}

/// WHAT: Odd dimensions are rounded down to even
/// WHY: The encoder rejects odd frame sizes for yuv420p
#[test]
#[allow(clippy::unwrap_used)]
fn given_odd_width_when_normalizing_then_width_decremented() {
    // Given: A region 101 pixels wide and 50 high
    let region = CaptureRegion::new(10, 10, 101, 50);

    // When: Normalising
    let normalized = region.normalized().unwrap();

    // Then: Width becomes 100, height and origin are unchanged
    assert_eq!(normalized, CaptureRegion::new(10, 10, 100, 50));
}

/// WHAT: A one-pixel-wide region is rejected after normalisation
/// WHY: Rounding down would otherwise hand the encoder a zero-width frame
#[test]
fn given_one_pixel_width_when_normalizing_then_invalid_region_error() {
    // Given: A region 1 pixel wide
    let region = CaptureRegion::new(0, 0, 1, 40);

    // When: Normalising
    let result = region.normalized();

    // Then: Returns InvalidRegion
    assert!(matches!(result, Err(RecorderError::InvalidRegion { .. })));
}

/// WHAT: Offsetting moves the origin without resizing
/// WHY: Window-local selections must be translated to screen coordinates
#[test]
fn given_window_origin_when_offsetting_region_then_origin_translated() {
    // Given: A region selected inside a window placed at (1920, 0)
    let region = CaptureRegion::new(5, 6, 320, 240);

    // When: Offsetting by the window origin
    let moved = region.offset(1920, 0);

    // Then: Only the origin changes
    assert_eq!(moved, CaptureRegion::new(1925, 6, 320, 240));
}
