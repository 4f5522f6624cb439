//! Drag-to-select state for the region selection surface.
//!
//! The surface feeds pointer and key events in window-local pixels; the
//! selector reports a single completed [`CaptureRegion`] or a cancellation.

use crate::CaptureRegion;

/// Result of a finished selection gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The user released the button over a non-empty rectangle.
    Complete(CaptureRegion),
    /// Escape was pressed or the rectangle had no area.
    Cancelled,
}

/// Tracks one drag gesture.
#[derive(Debug, Default)]
pub struct RegionSelector {
    anchor: Option<(i32, i32)>,
    cursor: (i32, i32),
}

impl RegionSelector {
    /// Create an idle selector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the latest pointer position.
    pub fn pointer_moved(&mut self, x: i32, y: i32) {
        self.cursor = (x, y);
    }

    /// Begin a drag at the last known pointer position.
    pub fn button_pressed(&mut self) {
        self.anchor = Some(self.cursor);
    }

    /// Rectangle currently being dragged, for drawing an outline.
    pub fn current(&self) -> Option<CaptureRegion> {
        self.anchor
            .and_then(|anchor| CaptureRegion::from_corners(anchor, self.cursor))
    }

    /// Finish the drag at the last known pointer position.
    ///
    /// A release without a preceding press is ignored.
    pub fn button_released(&mut self) -> Option<SelectionOutcome> {
        let anchor = self.anchor.take()?;

        Some(match CaptureRegion::from_corners(anchor, self.cursor) {
            Some(region) => SelectionOutcome::Complete(region),
            None => SelectionOutcome::Cancelled,
        })
    }

    /// Abandon the selection.
    pub fn cancel(&mut self) -> SelectionOutcome {
        self.anchor = None;
        SelectionOutcome::Cancelled
    }
}
