use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where recordings are written.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for temporary recordings (None = system temp dir).
    #[serde(default)]
    pub scratch_dir: Option<PathBuf>,

    /// Directory exports are saved to (None = the user's video folder).
    #[serde(default)]
    pub export_dir: Option<PathBuf>,
}
