//! SymMerkle Settings
//!
//! Configuration shared by the SymMerkle binaries.
//!
//! ## Features
//!
//! - Tree parameters (hash algorithm, sentinel policy)
//! - Log filter and output format
//! - JSON settings file under the user's config directory
//!
//! ## Usage
//!
//! ```no_run
//! use symmerkle_settings::Settings;
//! use symmerkle_core::HashAlgorithm;
//!
//! // Load or create default settings
//! let mut settings = Settings::load_or_default()?;
//!
//! // Modify settings
//! settings.tree.hash_algorithm = HashAlgorithm::Sha256;
//!
//! // Save settings
//! settings.save()?;
//! # Ok::<(), symmerkle_settings::SettingsError>(())
//! ```

mod config;

pub use config::{LoggingSettings, OutputSettings, Settings};

use std::path::PathBuf;

use thiserror::Error;

/// Overrides the config directory when set.
pub const CONFIG_DIR_ENV: &str = "SYMMERKLE_CONFIG_DIR";

#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read settings: {0}")]
    ReadError(std::io::Error),

    #[error("Failed to write settings: {0}")]
    WriteError(std::io::Error),

    #[error("Failed to parse settings: {0}")]
    ParseError(serde_json::Error),

    #[error("Failed to create config directory: {0}")]
    CreateDirError(std::io::Error),
}

pub type Result<T> = std::result::Result<T, SettingsError>;

/// `$SYMMERKLE_CONFIG_DIR`, else `~/.symmerkle`, else `./.symmerkle`
pub fn default_config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV) {
        return PathBuf::from(dir);
    }
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".symmerkle")
}

/// Get the default settings file path
pub fn default_settings_path() -> PathBuf {
    default_config_dir().join("settings.json")
}
