//! Configuration service implementation.
//!
//! This module provides a ConfigService that loads the root configuration
//! from the configuration file (~/.config/tutor/config.toml) and applies
//! environment overrides on top of it.

use crate::paths::TutorPaths;
use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};
use tutor_core::config::RootConfig;
use tutor_core::error::{Result, TutorError};

/// Environment variable overriding `backend.base_url`.
pub const BASE_URL_ENV: &str = "TUTOR_BASE_URL";

/// Configuration service that loads and caches the root configuration.
#[derive(Debug, Clone)]
pub struct ConfigService {
    /// Explicit config path; the platform default is used when unset.
    path: Option<PathBuf>,
    /// Cached configuration loaded from file.
    config: Arc<RwLock<Option<RootConfig>>>,
}

impl ConfigService {
    /// Creates a ConfigService reading the default config file.
    ///
    /// The configuration is loaded lazily on first access.
    pub fn new() -> Self {
        Self {
            path: None,
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Creates a ConfigService reading a specific file.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            config: Arc::new(RwLock::new(None)),
        }
    }

    /// Gets the root configuration, loading from file if not cached.
    pub fn get_config(&self) -> Result<RootConfig> {
        {
            let read_lock = self.config.read().unwrap_or_else(PoisonError::into_inner);
            if let Some(ref cached) = *read_lock {
                return Ok(cached.clone());
            }
        }

        let mut loaded = self.load_config()?;
        apply_env_overrides(&mut loaded, |key| std::env::var(key).ok());

        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = Some(loaded.clone());
        Ok(loaded)
    }

    /// Invalidates the cache, forcing a reload on next access.
    pub fn invalidate_cache(&self) {
        let mut write_lock = self.config.write().unwrap_or_else(PoisonError::into_inner);
        *write_lock = None;
    }

    /// Path of the file this service reads.
    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.path {
            Some(path) => Ok(path.clone()),
            None => TutorPaths::config_file().map_err(|e| TutorError::config(e.to_string())),
        }
    }

    fn load_config(&self) -> Result<RootConfig> {
        let path = self.config_path()?;
        load_config_file(&path)
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

/// Reads a config file; a missing file yields the defaults.
pub fn load_config_file(path: &Path) -> Result<RootConfig> {
    if !path.exists() {
        tracing::debug!("No config file at {:?}, using defaults", path);
        return Ok(RootConfig::default());
    }

    let content = std::fs::read_to_string(path).map_err(|e| {
        TutorError::io(format!("Failed to read config file at {}: {}", path.display(), e))
    })?;

    let config = toml::from_str(&content).map_err(|e| {
        TutorError::serialization("TOML", format!("{}: {}", path.display(), e))
    })?;
    tracing::debug!("Loaded config from {:?}", path);
    Ok(config)
}

/// Applies environment overrides using `lookup` to read variables.
pub fn apply_env_overrides<F>(config: &mut RootConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(base_url) = lookup(BASE_URL_ENV).filter(|v| !v.trim().is_empty()) {
        tracing::debug!("{} overrides backend.base_url", BASE_URL_ENV);
        config.backend.base_url = base_url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;
    use tutor_core::backend::Difficulty;
    use tutor_core::config::DEFAULT_BASE_URL;
    use tutor_core::session::StaleReplyPolicy;

    #[test]
    fn test_missing_file_yields_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = load_config_file(&temp_dir.path().join("config.toml")).unwrap();
        assert_eq!(config, RootConfig::default());
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.session.question_subject, "Programming");
        assert_eq!(config.speech.output_program(), Some("espeak"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[backend]
base_url = "http://campus.local:8000"

[session]
sound_enabled = true
stale_replies = "discard"
question_difficulty = "hard"

[speech]
output_command = "say"
output_args = ["-v", "{lang}"]
"#,
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.backend.base_url, "http://campus.local:8000");
        assert_eq!(config.backend.timeout_secs, 30);
        assert!(config.session.sound_enabled);
        assert_eq!(config.session.stale_replies, StaleReplyPolicy::Discard);
        assert_eq!(config.session.question_difficulty, Difficulty::Hard);
        assert_eq!(config.speech.output_command.as_deref(), Some("say"));
        assert_eq!(config.speech.language, "en-US");
        assert!(config.speech.input_command.is_none());
    }

    #[test]
    fn test_invalid_file_is_serialization_error() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[session]\nstale_replies = \"sometimes\"\n").unwrap();

        let err = load_config_file(&path).unwrap_err();
        assert!(matches!(err, TutorError::Serialization { .. }));
    }

    #[test]
    fn test_env_override() {
        let mut config = RootConfig::default();
        apply_env_overrides(&mut config, |key| {
            (key == BASE_URL_ENV).then(|| "http://override:5000".to_string())
        });
        assert_eq!(config.backend.base_url, "http://override:5000");

        let mut config = RootConfig::default();
        apply_env_overrides(&mut config, |_| Some("  ".to_string()));
        assert_eq!(config.backend.base_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn test_service_caches_until_invalidated() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.toml");
        std::fs::write(&path, "[backend]\ntimeout_secs = 5\n").unwrap();

        let service = ConfigService::with_path(&path);
        assert_eq!(service.get_config().unwrap().backend.timeout_secs, 5);

        std::fs::write(&path, "[backend]\ntimeout_secs = 9\n").unwrap();
        assert_eq!(service.get_config().unwrap().backend.timeout_secs, 5);

        service.invalidate_cache();
        assert_eq!(service.get_config().unwrap().backend.timeout_secs, 9);
    }
}
