use std::time::Duration;

/// Format an elapsed duration as `MM:SS`.
///
/// Minutes keep counting past 59 rather than rolling into hours.
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
