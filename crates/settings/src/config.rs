//! Configuration types

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::info;

use symmerkle_core::TreeConfig;

use crate::{default_settings_path, Result, SettingsError};

/// Main settings structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Hash algorithm and sentinel policy shared by prover and verifier
    #[serde(default)]
    pub tree: TreeConfig,

    /// Log filter settings
    #[serde(default)]
    pub logging: LoggingSettings,

    /// CLI output settings
    #[serde(default)]
    pub output: OutputSettings,

    /// Custom settings file path (not serialized)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

impl Settings {
    /// Load settings from the default path, or create defaults
    pub fn load_or_default() -> Result<Self> {
        Self::load_from(&default_settings_path())
    }

    /// Load settings from a specific path, or create defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path).map_err(SettingsError::ReadError)?;
            let mut settings: Settings =
                serde_json::from_str(&content).map_err(SettingsError::ParseError)?;
            settings.config_path = Some(path.to_path_buf());
            info!("Loaded settings from {:?}", path);
            Ok(settings)
        } else {
            let mut settings = Self::default();
            settings.config_path = Some(path.to_path_buf());
            Ok(settings)
        }
    }

    /// Path the settings were loaded from, if any
    pub fn config_path(&self) -> Option<&Path> {
        self.config_path.as_deref()
    }

    /// Save settings to the configured path
    pub fn save(&self) -> Result<()> {
        let path = self.config_path.clone().unwrap_or_else(default_settings_path);
        self.save_to(&path)
    }

    /// Save settings to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent).map_err(SettingsError::CreateDirError)?;
            }
        }

        let content = serde_json::to_string_pretty(self).map_err(SettingsError::ParseError)?;
        std::fs::write(path, content).map_err(SettingsError::WriteError)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

/// Logging settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// `EnvFilter` directives, e.g. "info,symmerkle=debug". `RUST_LOG` wins.
    #[serde(default)]
    pub filter: Option<String>,

    /// Verbose logging when no filter is configured
    #[serde(default)]
    pub verbose: bool,
}

/// Output settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputSettings {
    /// Pretty-print JSON output
    #[serde(default = "default_true")]
    pub pretty_json: bool,
}

fn default_true() -> bool {
    true
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            pretty_json: default_true(),
        }
    }
}
