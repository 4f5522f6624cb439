use crate::config::{default_notify_on_failure, default_open_preview};

use serde::{Deserialize, Serialize};

/// Application behavior configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BehaviourConfig {
    /// Open the finished recording in the system player.
    #[serde(default = "default_open_preview")]
    pub open_preview: bool,

    /// Show a desktop notification when recording or export fails.
    #[serde(default = "default_notify_on_failure")]
    pub notify_on_failure: bool,
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            open_preview: default_open_preview(),
            notify_on_failure: default_notify_on_failure(),
        }
    }
}
