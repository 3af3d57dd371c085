use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::types::{ConversionMode, Theme};

pub const APP_NAME: &str = "ffmpeg_converter_gui";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    pub ffmpeg_path: PathBuf,
    pub default_mode: ConversionMode,
    pub last_directory: Option<PathBuf>,
    pub theme: Theme,
}

impl ::std::default::Default for AppConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: PathBuf::from("ffmpeg"),
            default_mode: ConversionMode::default(),
            last_directory: None,
            theme: Theme::default(),
        }
    }
}

impl AppConfig {
    pub fn path() -> Result<PathBuf, ConfigError> {
        confy::get_configuration_file_path(APP_NAME, None).map_err(ConfigError::Locate)
    }

    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::path()?)
    }

    // a broken config file never stops the app
    pub fn load_or_default() -> Self {
        match Self::load() {
            Ok(config) => {
                debug!(?config, "loaded settings");
                config
            }
            Err(err) => {
                warn!(error = %err, "using default settings");
                Self::default()
            }
        }
    }

    pub fn store(&self) -> Result<(), ConfigError> {
        self.store_to(&Self::path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        confy::load_path(path).map_err(ConfigError::Load)
    }

    pub fn store_to(&self, path: &Path) -> Result<(), ConfigError> {
        confy::store_path(path, self).map_err(ConfigError::Store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_ffmpeg_on_path() {
        let config = AppConfig::default();
        assert_eq!(config.ffmpeg_path, PathBuf::from("ffmpeg"));
        assert_eq!(config.default_mode, ConversionMode::ReEncode);
        assert!(config.last_directory.is_none());
        assert_eq!(config.theme, Theme::System);
    }

    #[test]
    fn settings_survive_a_store_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");

        let config = AppConfig {
            ffmpeg_path: PathBuf::from("/usr/local/bin/ffmpeg"),
            default_mode: ConversionMode::Passthrough,
            last_directory: Some(dir.path().to_path_buf()),
            theme: Theme::Dark,
        };
        config.store_to(&path).unwrap();

        assert_eq!(AppConfig::load_from(&path).unwrap(), config);
    }

    #[test]
    fn missing_keys_fall_back_to_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.toml");
        std::fs::write(&path, "default_mode = \"Passthrough\"\n").unwrap();

        let config = AppConfig::load_from(&path).unwrap();
        assert_eq!(config.default_mode, ConversionMode::Passthrough);
        assert_eq!(config.ffmpeg_path, PathBuf::from("ffmpeg"));
    }
}
