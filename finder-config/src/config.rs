//! The `Config` struct, its YAML persistence and the host-variable overlay.

use crate::defaults;
use crate::error::ConfigError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Host variable holding the pane buffer base name.
pub const VAR_BUFFER_NAME: &str = "finder_buffer_name";
/// Host variable holding the pane file-type tag.
pub const VAR_FILE_TYPE: &str = "finder_file_type";
/// Host variable holding the pane width in columns.
pub const VAR_WIDTH: &str = "finder_width";

/// Resolved finder configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Base name of pane buffers; the pane index is appended to it
    #[serde(default = "defaults::buffer_name")]
    pub buffer_name: String,

    /// File-type tag that marks a buffer as a pane buffer
    #[serde(default = "defaults::file_type")]
    pub file_type: String,

    /// Fixed width of every pane window in columns
    #[serde(default = "defaults::width")]
    pub width: usize,

    /// Bind the default key sequences in pane buffers
    #[serde(default = "defaults::bool_true")]
    pub default_keymaps: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            buffer_name: defaults::buffer_name(),
            file_type: defaults::file_type(),
            width: defaults::width(),
            default_keymaps: true,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// A missing file is not an error; defaults are returned instead.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path();
        log::info!("Config path: {:?}", config_path);

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            log::info!("Config file not found, using defaults");
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from an explicit YAML file.
    pub fn load_from(path: &Path) -> Result<Self> {
        log::info!("Loading config from {:?}", path);
        let contents = fs::read_to_string(path)
            .map_err(ConfigError::from)
            .with_context(|| format!("reading {}", path.display()))?;
        let config = Self::from_yaml(&contents)?;
        Ok(config)
    }

    /// Parse and validate a YAML document.
    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        let config: Config = serde_yaml_ng::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject values that would produce unusable panes.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.buffer_name.trim().is_empty() {
            return Err(ConfigError::Validation(
                "buffer_name must not be empty".to_string(),
            ));
        }
        if self.file_type.trim().is_empty() {
            return Err(ConfigError::Validation(
                "file_type must not be empty".to_string(),
            ));
        }
        if self.width == 0 {
            return Err(ConfigError::Validation(
                "width must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Overlay host variables on top of this configuration.
    ///
    /// `lookup` returns the raw value of a host variable, or `None` when it is
    /// unset. Unset, empty, zero or unparsable values keep the current value.
    pub fn with_variables<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(name) = lookup(VAR_BUFFER_NAME).filter(|v| !v.is_empty()) {
            self.buffer_name = name;
        }
        if let Some(file_type) = lookup(VAR_FILE_TYPE).filter(|v| !v.is_empty()) {
            self.file_type = file_type;
        }
        if let Some(raw) = lookup(VAR_WIDTH) {
            match raw.trim().parse::<usize>() {
                Ok(0) => {}
                Ok(width) => self.width = width,
                Err(e) => log::warn!("Ignoring {VAR_WIDTH}={raw:?}: {e}"),
            }
        }
        self
    }

    /// Get the configuration file path (using XDG convention)
    pub fn config_path() -> PathBuf {
        Self::config_dir().join("config.yaml")
    }

    /// Get the configuration directory path (using XDG convention)
    pub fn config_dir() -> PathBuf {
        #[cfg(target_os = "windows")]
        {
            if let Some(config_dir) = dirs::config_dir() {
                config_dir.join("finder")
            } else {
                PathBuf::from(".")
            }
        }
        #[cfg(not(target_os = "windows"))]
        {
            if let Some(home_dir) = dirs::home_dir() {
                home_dir.join(".config").join("finder")
            } else {
                PathBuf::from(".")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.buffer_name, "finder");
        assert_eq!(config.file_type, "finder");
        assert_eq!(config.width, 30);
        assert!(config.default_keymaps);
    }

    #[test]
    fn test_partial_yaml_fills_defaults() {
        let config = Config::from_yaml("width: 42\n").unwrap();
        assert_eq!(config.width, 42);
        assert_eq!(config.buffer_name, "finder");
    }

    #[test]
    fn test_zero_width_rejected() {
        let err = Config::from_yaml("width: 0\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_empty_buffer_name_rejected() {
        let err = Config::from_yaml("buffer_name: \"\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }

    #[test]
    fn test_variables_override() {
        let v = vars(&[
            (VAR_BUFFER_NAME, "tree"),
            (VAR_FILE_TYPE, "treeft"),
            (VAR_WIDTH, "40"),
        ]);
        let config = Config::default().with_variables(|k| v.get(k).cloned());
        assert_eq!(config.buffer_name, "tree");
        assert_eq!(config.file_type, "treeft");
        assert_eq!(config.width, 40);
    }

    #[test]
    fn test_empty_and_zero_variables_fall_back() {
        let v = vars(&[(VAR_BUFFER_NAME, ""), (VAR_WIDTH, "0")]);
        let config = Config::default().with_variables(|k| v.get(k).cloned());
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_unparsable_width_ignored() {
        let v = vars(&[(VAR_WIDTH, "wide")]);
        let config = Config::default().with_variables(|k| v.get(k).cloned());
        assert_eq!(config.width, 30);
    }

    #[test]
    fn test_load_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "buffer_name: tree\nwidth: 36\ndefault_keymaps: false\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.buffer_name, "tree");
        assert_eq!(config.file_type, "finder");
        assert_eq!(config.width, 36);
        assert!(!config.default_keymaps);
    }

    #[test]
    fn test_load_from_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = Config::load_from(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Io(_))
        ));
    }

    #[test]
    fn test_load_from_invalid_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "width: [30\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "file_type: \"  \"\n").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<ConfigError>(),
            Some(ConfigError::Validation(_))
        ));
    }
}
