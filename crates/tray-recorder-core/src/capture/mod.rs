mod platform;
mod region;
mod selector;

pub use {
    platform::{DisplaySize, Platform},
    region::CaptureRegion,
    selector::{RegionSelector, SelectionOutcome},
};
