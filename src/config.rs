use std::path::PathBuf;

use directories::ProjectDirs;
use serde::Deserialize;

/// Application configuration loaded from the optional TOML config file.
/// Both fields default to unset; the CLI can always override them.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Directory of unsorted audio files (used when the CLI gives none).
    pub source_dir: Option<PathBuf>,
    /// Root of the sorted destination tree (used when the CLI gives none).
    pub dest_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Load config from `~/.config/tonesort/config.toml`.
    /// Returns the defaults if the file doesn't exist, and logs a warning
    /// if it exists but can't be read or parsed.
    pub fn load() -> Self {
        let Some(path) = Self::config_path() else {
            return Self::default();
        };
        if !path.exists() {
            log::debug!("No config file found, using defaults");
            return Self::default();
        }

        let contents = match std::fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(e) => {
                log::warn!("Failed to read {}: {}. Using defaults.", path.display(), e);
                return Self::default();
            }
        };
        match toml::from_str::<AppConfig>(&contents) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Failed to parse {}: {}. Using defaults.", path.display(), e);
                Self::default()
            }
        }
    }

    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", crate::APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
    }
}
