//! Configuration management for tray-recorder.
//!
//! Handles loading and saving TOML configuration files with cross-platform
//! paths and atomic write operations.

use crate::{
    AppError, AppResult,
    config::{BehaviourConfig, EncoderConfig, StorageConfig},
};

use std::{
    fs,
    io::Write,
    panic::Location,
    path::{Path, PathBuf},
};

use directories::{ProjectDirs, UserDirs};
use error_location::ErrorLocation;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

const SCRATCH_DIR_NAME: &str = "tray-recorder";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// External encoder settings.
    #[serde(default)]
    pub encoder: EncoderConfig,
    /// Recording and export locations.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Application behavior settings.
    #[serde(default)]
    pub behavior: BehaviourConfig,
}

impl Config {
    /// Load configuration from disk, creating default if not found.
    #[track_caller]
    #[instrument]
    pub fn load() -> AppResult<Self> {
        let config_path = Self::config_path()?;

        if config_path.exists() {
            let config = Self::load_from(&config_path)?;
            info!(config_path = ?config_path, "Configuration loaded");
            Ok(config)
        } else {
            info!("No config found, creating default");
            let config = Config::default();
            config.save_to(&config_path)?;
            Ok(config)
        }
    }

    /// Parse the configuration file at `path`.
    #[track_caller]
    pub fn load_from(path: &Path) -> AppResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to read config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        toml::from_str(&contents).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to parse config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }

    /// Save configuration to `path` using atomic write pattern.
    ///
    /// Writes to a temporary file first, then renames to prevent corruption
    /// if the process crashes during the write.
    #[track_caller]
    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        let contents = toml::to_string_pretty(self).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to serialize config: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        let temp_path = path.with_extension("toml.tmp");

        let mut temp_file = fs::File::create(&temp_path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to create temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        temp_file
            .write_all(contents.as_bytes())
            .map_err(|e| AppError::ConfigError {
                reason: format!("Failed to write temp config file: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })?;

        temp_file.sync_all().map_err(|e| AppError::ConfigError {
            reason: format!("Failed to sync temp config file: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        fs::rename(&temp_path, path).map_err(|e| AppError::ConfigError {
            reason: format!("Failed to rename temp config to final: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })?;

        info!(config_path = ?path, "Configuration saved (atomic write)");

        Ok(())
    }

    /// Directory temporary recordings are written to.
    pub fn scratch_dir(&self) -> PathBuf {
        self.storage
            .scratch_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(SCRATCH_DIR_NAME))
    }

    /// Directory exports are saved to.
    ///
    /// Falls back from the configured path to the user's video folder,
    /// desktop, home, and finally the working directory.
    pub fn export_dir(&self) -> PathBuf {
        if let Some(dir) = &self.storage.export_dir {
            return dir.clone();
        }

        UserDirs::new()
            .and_then(|dirs| {
                dirs.video_dir()
                    .or_else(|| dirs.desktop_dir())
                    .map(Path::to_path_buf)
                    .or_else(|| Some(dirs.home_dir().to_path_buf()))
            })
            .unwrap_or_else(|| PathBuf::from("."))
    }

    /// Directory the rolling log files are written to.
    #[track_caller]
    pub fn log_dir() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        Ok(proj_dirs.data_dir().join("logs"))
    }

    #[track_caller]
    fn config_path() -> AppResult<PathBuf> {
        let proj_dirs = Self::project_dirs()?;
        let config_dir = proj_dirs.config_dir();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir)?;
            debug!(config_dir = ?config_dir, "Created config directory");
        }

        Ok(config_dir.join("config.toml"))
    }

    #[track_caller]
    fn project_dirs() -> AppResult<ProjectDirs> {
        ProjectDirs::from("com", "tray-recorder", "Tray-Recorder").ok_or_else(|| {
            AppError::ConfigError {
                reason: "Failed to get project directories".to_string(),
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }
}
