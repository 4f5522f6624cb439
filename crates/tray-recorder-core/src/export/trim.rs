use crate::{CoreResult, RecorderError};

use std::panic::Location;

use error_location::ErrorLocation;

/// Smallest selection the preview handles allow, in seconds.
pub const MIN_SELECTION_SECS: f64 = 0.1;

/// Validated sub-range of a recording, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimRange {
    start: f64,
    end: f64,
}

impl TrimRange {
    /// Validate `[start, end]` against an optional known duration.
    #[track_caller]
    pub fn new(start: f64, end: f64, duration: Option<f64>) -> CoreResult<Self> {
        let reject = |reason: String| RecorderError::InvalidTrimRange {
            reason,
            location: ErrorLocation::from(Location::caller()),
        };

        if !start.is_finite() || !end.is_finite() {
            return Err(reject(format!("non-finite bounds {start}..{end}")));
        }
        if start < 0.0 {
            return Err(reject(format!("start {start} is negative")));
        }
        if end <= start {
            return Err(reject(format!("end {end} must exceed start {start}")));
        }
        if let Some(duration) = duration
            && end > duration
        {
            return Err(reject(format!("end {end} exceeds duration {duration}")));
        }

        Ok(Self { start, end })
    }

    /// Start offset in seconds.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// End offset in seconds.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Length of the range in seconds.
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Two-handle selection over a recording, as shown in the preview.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrimSelection {
    duration: f64,
    start: f64,
    end: f64,
}

impl TrimSelection {
    /// Select the whole recording.
    pub fn new(duration: f64) -> Self {
        let duration = if duration.is_finite() { duration.max(0.0) } else { 0.0 };
        Self {
            duration,
            start: 0.0,
            end: duration,
        }
    }

    /// Move the start handle, keeping at least [`MIN_SELECTION_SECS`] before
    /// the end handle.
    pub fn set_start(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        self.start = seconds
            .clamp(0.0, self.duration)
            .min(self.end - MIN_SELECTION_SECS)
            .max(0.0);
    }

    /// Move the end handle, keeping at least [`MIN_SELECTION_SECS`] after
    /// the start handle.
    pub fn set_end(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        self.end = seconds
            .clamp(0.0, self.duration)
            .max(self.start + MIN_SELECTION_SECS)
            .min(self.duration);
    }

    /// Start handle position in seconds.
    pub fn start(&self) -> f64 {
        self.start
    }

    /// End handle position in seconds.
    pub fn end(&self) -> f64 {
        self.end
    }

    /// Length of the recording.
    pub fn duration(&self) -> f64 {
        self.duration
    }

    /// Convert to a validated range.
    #[track_caller]
    pub fn to_range(&self) -> CoreResult<TrimRange> {
        TrimRange::new(self.start, self.end, Some(self.duration))
    }
}
