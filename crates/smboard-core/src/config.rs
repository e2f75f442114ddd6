//! Dashboard configuration
//!
//! Read from `smboard.toml` (current directory) or
//! `<config_dir>/smboard/config.toml`. Every key is optional.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::CoreError;

pub const DEFAULT_TITLE: &str = "Social Media vs Productivity";
pub const DEFAULT_DATA_PATH: &str = "cleandata.csv";
pub const DEFAULT_PORT: u16 = 8501;
const LOCAL_CONFIG_FILE: &str = "smboard.toml";

/// Settings shared by the CLI and the web server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Page and report title
    pub title: String,
    /// CSV dataset location
    pub data_path: PathBuf,
    /// Optional banner image shown above the title
    pub banner: Option<PathBuf>,
    /// Web server port
    pub port: u16,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            banner: None,
            port: DEFAULT_PORT,
        }
    }
}

impl DashboardConfig {
    /// Parse and validate a config file
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                CoreError::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CoreError::FileRead {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        let config = Self::from_toml(&content, path)?;
        debug!(path = %path.display(), "Loaded dashboard config");
        Ok(config)
    }

    /// Explicit path if given, else the first default location that exists,
    /// else built-in defaults
    pub fn discover(explicit: Option<&Path>) -> Result<Self, CoreError> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_locations().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::load(&path),
            None => Ok(Self::default()),
        }
    }

    fn default_locations() -> Vec<PathBuf> {
        let mut locations = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            locations.push(dir.join("smboard").join("config.toml"));
        }
        locations
    }

    fn from_toml(content: &str, path: &Path) -> Result<Self, CoreError> {
        let config: Self = toml::from_str(content).map_err(|source| CoreError::ConfigParse {
            path: path.to_path_buf(),
            message: source.message().to_string(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::InvalidConfig {
                message: "title must not be empty".to_string(),
            });
        }
        if self.port == 0 {
            return Err(CoreError::InvalidConfig {
                message: "port must be between 1 and 65535".to_string(),
            });
        }
        Ok(())
    }

    /// Apply command-line overrides
    pub fn with_overrides(mut self, data_path: Option<PathBuf>, port: Option<u16>) -> Self {
        if let Some(data_path) = data_path {
            self.data_path = data_path;
        }
        if let Some(port) = port {
            self.port = port;
        }
        self
    }
}
