//! Unified path management for tutor configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/tutor/             # Config directory (platform config dir)
//! └── config.toml              # Application configuration
//! ```

use std::path::PathBuf;

use tutor_core::config::RootConfig;

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

const APP_DIR: &str = "tutor";
const CONFIG_FILE: &str = "config.toml";

/// Path resolution for tutor.
pub struct TutorPaths;

impl TutorPaths {
    /// Returns the tutor configuration directory (e.g. `~/.config/tutor/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to the main configuration file.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Ensures the config file exists, writing the defaults if it doesn't.
    ///
    /// # Returns
    ///
    /// - `Ok(PathBuf)`: Path to the config file (existing or newly created)
    /// - `Err(std::io::Error)`: If the directory or file could not be written
    pub fn ensure_config_file() -> Result<PathBuf, std::io::Error> {
        let config_path = Self::config_file()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::NotFound, e.to_string()))?;
        write_default_config(&config_path)?;
        Ok(config_path)
    }
}

/// Writes a default config to `path` unless a file already exists there.
pub fn write_default_config(path: &std::path::Path) -> Result<(), std::io::Error> {
    if path.exists() {
        return Ok(());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let template = toml::to_string_pretty(&RootConfig::default())
        .map_err(std::io::Error::other)?;
    std::fs::write(path, template)
}
