use crate::{CoreResult, RecorderError};

use std::panic::Location;

use error_location::ErrorLocation;

/// Rectangle limiting a recording to part of the primary display.
///
/// Coordinates are screen pixels. The encoder only accepts even frame
/// dimensions, see [`CaptureRegion::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRegion {
    /// Left edge in screen pixels.
    pub x: i32,
    /// Top edge in screen pixels.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl CaptureRegion {
    /// Create a region from its origin and size.
    pub fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Build the region spanned by two drag corners, in any order.
    ///
    /// Returns `None` for a zero-area rectangle.
    pub fn from_corners(start: (i32, i32), end: (i32, i32)) -> Option<Self> {
        let width = start.0.abs_diff(end.0);
        let height = start.1.abs_diff(end.1);

        if width == 0 || height == 0 {
            return None;
        }

        Some(Self {
            x: start.0.min(end.0),
            y: start.1.min(end.1),
            width,
            height,
        })
    }

    /// Shift the region by a screen offset (e.g. the origin of the window
    /// the drag was drawn in).
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx),
            y: self.y.saturating_add(dy),
            ..self
        }
    }

    /// Round odd dimensions down to the nearest even value.
    ///
    /// Fails if either dimension ends up zero.
    #[track_caller]
    pub fn normalized(self) -> CoreResult<Self> {
        let width = self.width & !1;
        let height = self.height & !1;

        if width == 0 || height == 0 {
            return Err(RecorderError::InvalidRegion {
                reason: format!(
                    "{}x{} has no area once rounded to even dimensions",
                    self.width, self.height
                ),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            width,
            height,
            ..self
        })
    }
}
