mod behaviour_config;
#[allow(clippy::module_inception)]
mod config;
mod encoder_config;
mod storage_config;

pub(crate) use {
    behaviour_config::BehaviourConfig, config::Config, encoder_config::EncoderConfig,
    storage_config::StorageConfig,
};

pub(crate) const DEFAULT_FFMPEG: &str = "ffmpeg";
pub(crate) const DEFAULT_FFPROBE: &str = "ffprobe";
pub(crate) const DEFAULT_OPEN_PREVIEW: bool = true;
pub(crate) const DEFAULT_NOTIFY_ON_FAILURE: bool = true;

pub(crate) fn default_ffmpeg() -> std::path::PathBuf {
    DEFAULT_FFMPEG.into()
}

pub(crate) fn default_ffprobe() -> std::path::PathBuf {
    DEFAULT_FFPROBE.into()
}

pub(crate) fn default_framerate() -> u32 {
    tray_recorder_core::DEFAULT_FRAMERATE
}

pub(crate) fn default_open_preview() -> bool {
    DEFAULT_OPEN_PREVIEW
}

pub(crate) fn default_notify_on_failure() -> bool {
    DEFAULT_NOTIFY_ON_FAILURE
}
