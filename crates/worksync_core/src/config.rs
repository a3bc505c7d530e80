//! Environment-driven runtime configuration.
//!
//! # Responsibility
//! - Resolve storage, logging and AI gateway settings from the environment.
//! - Validate values once so callers receive a consistent config.
//!
//! # Invariants
//! - The API key is optional here; AI operations fail when it is absent.
//! - `log_dir`, when set, is an absolute path.

use crate::gateway::{GeminiConfig, DEFAULT_API_BASE, DEFAULT_MODEL};
use log::LevelFilter;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const ENV_DB: &str = "WORKSYNC_DB";
pub const ENV_LOG_LEVEL: &str = "WORKSYNC_LOG_LEVEL";
pub const ENV_LOG_DIR: &str = "WORKSYNC_LOG_DIR";
pub const ENV_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_API_KEY_FALLBACK: &str = "API_KEY";
pub const ENV_MODEL: &str = "WORKSYNC_MODEL";
pub const ENV_API_BASE: &str = "WORKSYNC_API_BASE";
pub const ENV_API_TIMEOUT_SECS: &str = "WORKSYNC_API_TIMEOUT_SECS";

const DEFAULT_DB_FILE: &str = "worksync.db";
const DEFAULT_API_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Variable is set but its value is unusable.
    InvalidValue { var: &'static str, message: String },
    /// An AI operation was requested without a credential.
    MissingApiKey,
}

impl Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidValue { var, message } => write!(f, "invalid {var}: {message}"),
            Self::MissingApiKey => write!(
                f,
                "no API key configured; set {ENV_API_KEY} (or {ENV_API_KEY_FALLBACK})"
            ),
        }
    }
}

impl Error for ConfigError {}

/// Resolved workspace configuration.
#[derive(Clone, PartialEq, Eq)]
pub struct WorkspaceConfig {
    pub db_path: PathBuf,
    pub log_level: LevelFilter,
    pub log_dir: Option<PathBuf>,
    pub api_key: Option<String>,
    pub model: String,
    pub api_base: String,
    pub api_timeout: Duration,
}

impl Debug for WorkspaceConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WorkspaceConfig")
            .field("db_path", &self.db_path)
            .field("log_level", &self.log_level)
            .field("log_dir", &self.log_dir)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("api_base", &self.api_base)
            .field("api_timeout", &self.api_timeout)
            .finish()
    }
}

impl WorkspaceConfig {
    /// Loads configuration from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Loads configuration through `lookup`; blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |var: &str| {
            lookup(var)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let log_dir = match get(ENV_LOG_DIR) {
            Some(dir) => {
                let path = PathBuf::from(dir);
                if !path.is_absolute() {
                    return Err(ConfigError::InvalidValue {
                        var: ENV_LOG_DIR,
                        message: format!("must be an absolute path, got `{}`", path.display()),
                    });
                }
                Some(path)
            }
            None => None,
        };

        let log_level = match get(ENV_LOG_LEVEL) {
            Some(raw) => raw.parse::<LevelFilter>().map_err(|_| ConfigError::InvalidValue {
                var: ENV_LOG_LEVEL,
                message: format!("expected off|error|warn|info|debug|trace, got `{raw}`"),
            })?,
            None => default_log_level(),
        };

        let api_timeout = match get(ENV_API_TIMEOUT_SECS) {
            Some(raw) => match raw.parse::<u64>() {
                Ok(secs) if secs > 0 => Duration::from_secs(secs),
                _ => {
                    return Err(ConfigError::InvalidValue {
                        var: ENV_API_TIMEOUT_SECS,
                        message: format!("expected a positive number of seconds, got `{raw}`"),
                    })
                }
            },
            None => Duration::from_secs(DEFAULT_API_TIMEOUT_SECS),
        };

        Ok(Self {
            db_path: get(ENV_DB)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DB_FILE)),
            log_level,
            log_dir,
            api_key: get(ENV_API_KEY).or_else(|| get(ENV_API_KEY_FALLBACK)),
            model: get(ENV_MODEL).unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            api_base: get(ENV_API_BASE).unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            api_timeout,
        })
    }

    /// Overrides the database path (e.g. from a CLI flag).
    pub fn with_db_path(mut self, path: impl AsRef<Path>) -> Self {
        self.db_path = path.as_ref().to_path_buf();
        self
    }

    /// Gateway settings; requires an API key.
    pub fn gemini(&self) -> Result<GeminiConfig, ConfigError> {
        let api_key = self.api_key.clone().ok_or(ConfigError::MissingApiKey)?;
        let mut config = GeminiConfig::new(api_key);
        config.model = self.model.clone();
        config.api_base = self.api_base.clone();
        config.timeout = self.api_timeout;
        Ok(config)
    }
}

/// `debug` in debug builds, `info` in release builds.
fn default_log_level() -> LevelFilter {
    if cfg!(debug_assertions) {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        move |var| vars.get(var).cloned()
    }

    #[test]
    fn defaults_apply_when_environment_is_empty() {
        let config = WorkspaceConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.db_path, PathBuf::from("worksync.db"));
        assert_eq!(config.log_level, default_log_level());
        assert_eq!(config.log_dir, None);
        assert_eq!(config.api_key, None);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert_eq!(config.api_timeout, Duration::from_secs(60));
        assert_eq!(config.gemini().unwrap_err(), ConfigError::MissingApiKey);
    }

    #[test]
    fn api_key_falls_back_and_blank_values_are_unset() {
        let config =
            WorkspaceConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "  "), ("API_KEY", "k-2")]))
                .unwrap();
        assert_eq!(config.api_key.as_deref(), Some("k-2"));

        let gemini = config.gemini().unwrap();
        assert_eq!(gemini.api_key, "k-2");
        assert_eq!(gemini.model, DEFAULT_MODEL);
    }

    #[test]
    fn rejects_relative_log_dir_and_bad_timeout() {
        let err = WorkspaceConfig::from_lookup(lookup(&[("WORKSYNC_LOG_DIR", "logs")])).unwrap_err();
        assert!(err.to_string().contains("absolute"));

        for raw in ["0", "soon", "-5"] {
            let err =
                WorkspaceConfig::from_lookup(lookup(&[("WORKSYNC_API_TIMEOUT_SECS", raw)]))
                    .unwrap_err();
            assert!(
                matches!(err, ConfigError::InvalidValue { var: "WORKSYNC_API_TIMEOUT_SECS", .. }),
                "unexpected error for `{raw}`: {err}"
            );
        }
    }

    #[test]
    fn log_level_is_parsed_case_insensitively() {
        let config =
            WorkspaceConfig::from_lookup(lookup(&[("WORKSYNC_LOG_LEVEL", "WARN")])).unwrap();
        assert_eq!(config.log_level, LevelFilter::Warn);

        let err = WorkspaceConfig::from_lookup(lookup(&[("WORKSYNC_LOG_LEVEL", "chatty")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var: "WORKSYNC_LOG_LEVEL", .. }));
    }

    #[test]
    fn debug_output_redacts_api_key() {
        let config =
            WorkspaceConfig::from_lookup(lookup(&[("GEMINI_API_KEY", "top-secret")])).unwrap();
        assert!(!format!("{config:?}").contains("top-secret"));
    }
}
