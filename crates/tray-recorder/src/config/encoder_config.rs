use crate::config::{default_ffmpeg, default_ffprobe, default_framerate};

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// External encoder configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncoderConfig {
    /// Encoder executable, looked up on `PATH` unless absolute.
    #[serde(default = "default_ffmpeg")]
    pub ffmpeg_path: PathBuf,

    /// Probe executable used to read recording durations.
    #[serde(default = "default_ffprobe")]
    pub ffprobe_path: PathBuf,

    /// Capture framerate.
    #[serde(default = "default_framerate")]
    pub framerate: u32,

    /// Capture device override (e.g. `:1.0` on X11, `2:none` on macOS).
    #[serde(default)]
    pub capture_input: Option<String>,
}

impl Default for EncoderConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: default_ffmpeg(),
            ffprobe_path: default_ffprobe(),
            framerate: default_framerate(),
            capture_input: None,
        }
    }
}
