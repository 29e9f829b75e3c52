//! Configuration file support for cmdhub.
//!
//! Loads optional `config.toml` from `$CMDHUB_CONFIG` or the user config
//! directory (`<config_dir>/cmdhub/config.toml`). A missing file means
//! defaults; a broken one is reported and ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::colors::ColorMode;
use crate::registry::DEFAULT_SUGGEST_TOLERANCE;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV: &str = "CMDHUB_CONFIG";

/// Root configuration structure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HubConfig {
    /// Edits tolerated when suggesting commands for an unknown name
    pub suggest_tolerance: usize,
    /// Color mode for listing headers
    pub color: ColorMode,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            suggest_tolerance: DEFAULT_SUGGEST_TOLERANCE,
            color: ColorMode::Auto,
        }
    }
}

impl HubConfig {
    /// Where the config is looked up: `$CMDHUB_CONFIG`, else the user config dir.
    pub fn default_path() -> Option<PathBuf> {
        std::env::var_os(CONFIG_ENV)
            .filter(|value| !value.is_empty())
            .map(PathBuf::from)
            .or_else(|| dirs::config_dir().map(|dir| dir.join("cmdhub").join("config.toml")))
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::default_path() {
            Some(path) => Self::load_from_path(&path),
            None => Self::default(),
        }
    }

    /// Load config from a specific path.
    /// Returns default config if file doesn't exist or is invalid.
    pub fn load_from_path(path: &Path) -> Self {
        if !path.exists() {
            debug!(path = %path.display(), "no config file, using defaults");
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => config,
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    pub fn parse(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }
}
