//! File-based logger configuration (YAML or JSON)
//!
//! Supports a user-level file (~/.config/badgelog/config.yaml) and a
//! workspace-level file (.config/badgelog/config.yaml).
//!
//! ```yaml
//! options:
//!   indention: 7
//! types:
//!   success:
//!     color: green
//!     badge: "✔"
//!     label: success
//!   error:
//!     color: red
//!     badge: "✖"
//!     label: error
//!     streams: [stderr]
//!   audit:
//!     file: /var/log/app/audit.log
//!     stack: false
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{LogError, LogResult};
use crate::logger::{create_logger, Logger, LoggerOptions, TypeEntry, TypeOptions};

/// Configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Options shared by every type
    #[serde(default)]
    pub options: LoggerOptions,

    /// Log types, in declaration order
    #[serde(default)]
    pub types: IndexMap<String, TypeOptions>,
}

impl ConfigFile {
    /// User-level config path (~/.config/badgelog/config.yaml)
    pub fn user_path() -> PathBuf {
        // XDG config directory (~/.config on Linux, ~/Library/Application Support on macOS)
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")).join(".config"));
        config_dir.join("badgelog").join("config.yaml")
    }

    /// Workspace-level config path (.config/badgelog/config.yaml)
    pub fn workspace_path(workspace_root: impl AsRef<Path>) -> PathBuf {
        workspace_root.as_ref().join(".config").join("badgelog").join("config.yaml")
    }

    /// Load a config file
    ///
    /// A missing file yields the default (empty) config. Files ending in
    /// `.json` are parsed as JSON, everything else as YAML.
    pub fn load(path: impl AsRef<Path>) -> LogResult<Self> {
        let path = path.as_ref();
        if !path.exists() {
            crate::diag_debug!("no config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        if path.extension().is_some_and(|ext| ext == "json") {
            Self::from_json_str(&content)
        } else {
            Self::from_yaml_str(&content)
        }
    }

    pub fn from_yaml_str(content: &str) -> LogResult<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> LogResult<Self> {
        Ok(serde_json::from_str(content)?)
    }

    pub fn to_yaml(&self) -> LogResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn to_json(&self) -> LogResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Save as YAML, creating parent directories
    pub fn save(&self, path: impl AsRef<Path>) -> LogResult<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_yaml()?)?;
        Ok(())
    }

    /// Add or replace a type
    pub fn set_type(&mut self, name: impl Into<String>, options: TypeOptions) {
        self.types.insert(name.into(), options);
    }

    /// Build a logger from this config
    pub fn build(&self) -> LogResult<Logger> {
        if self.types.keys().any(|name| name.is_empty()) {
            return Err(LogError::Config("type names must not be empty".to_string()));
        }

        create_logger(
            self.types
                .iter()
                .map(|(name, options)| (name.clone(), TypeEntry::Config(options.clone()))),
            self.options,
        )
    }
}
