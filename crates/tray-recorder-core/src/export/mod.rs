pub mod artifact;
mod probe;
mod trim;
mod trimmer;

pub use {
    probe::probe_duration,
    trim::{MIN_SELECTION_SECS, TrimRange, TrimSelection},
    trimmer::{TrimRequest, Trimmer},
};
