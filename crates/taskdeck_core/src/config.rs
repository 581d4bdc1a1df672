//! Runtime configuration.
//!
//! # Responsibility
//! - Describe where tasks are stored and how logging is set up.
//! - Load settings from a TOML file with per-field defaults.
//!
//! # Invariants
//! - A loaded config is always validated.
//! - Missing fields fall back to defaults; unknown fields are rejected.

use crate::logging::{default_log_level, normalize_level};
use crate::store::snapshot::DEFAULT_STORAGE_KEY;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_FILE_NAME: &str = "taskdeck.sqlite3";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("failed to render config: {0}")]
    Render(#[from] toml::ser::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CoreConfig {
    /// SQLite file holding the key-value store.
    pub db_path: PathBuf,
    /// Slot name the task snapshot is saved under.
    pub storage_key: String,
    pub log_level: String,
    /// Absolute directory for rolling log files. File logging is off when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            db_path: PathBuf::from(DEFAULT_DB_FILE_NAME),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            log_level: default_log_level().to_string(),
            log_dir: None,
        }
    }
}

impl CoreConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads and validates a TOML config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.storage_key.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "storage_key must not be empty".to_string(),
            ));
        }
        if self.db_path.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("db_path must not be empty".to_string()));
        }
        normalize_level(&self.log_level).map_err(|err| ConfigError::Invalid(err.to_string()))?;
        if let Some(dir) = &self.log_dir {
            if !dir.is_absolute() {
                return Err(ConfigError::Invalid(format!(
                    "log_dir must be an absolute path, got `{}`",
                    dir.display()
                )));
            }
        }
        Ok(())
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, CoreConfig, DEFAULT_DB_FILE_NAME};
    use std::io::Write;
    use std::path::PathBuf;

    #[test]
    fn empty_file_uses_defaults() {
        let config = CoreConfig::from_toml_str("").unwrap();
        assert_eq!(config, CoreConfig::default());
        assert_eq!(config.db_path, PathBuf::from(DEFAULT_DB_FILE_NAME));
        assert_eq!(config.storage_key, "tasks");
    }

    #[test]
    fn partial_file_overrides_fields() {
        let config = CoreConfig::from_toml_str(
            r#"
            db_path = "/var/lib/taskdeck/tasks.db"
            log_level = "WARN"
            "#,
        )
        .unwrap();
        assert_eq!(config.db_path, PathBuf::from("/var/lib/taskdeck/tasks.db"));
        assert_eq!(config.log_level, "WARN");
        assert_eq!(config.storage_key, "tasks");
    }

    #[test]
    fn rejects_blank_storage_key_and_bad_level() {
        let err = CoreConfig::from_toml_str(r#"storage_key = " ""#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid(_)));

        let err = CoreConfig::from_toml_str(r#"log_level = "chatty""#).unwrap_err();
        assert!(err.to_string().contains("chatty"));
    }

    #[test]
    fn rejects_unknown_fields() {
        let err = CoreConfig::from_toml_str("colour = true").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn load_reads_file_and_reports_missing_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "storage_key = \"work\"").unwrap();
        let config = CoreConfig::load(file.path()).unwrap();
        assert_eq!(config.storage_key, "work");

        let err = CoreConfig::load("/nonexistent/taskdeck.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn rendered_config_parses_back() {
        let config = CoreConfig::default();
        let text = config.to_toml_string().unwrap();
        assert_eq!(CoreConfig::from_toml_str(&text).unwrap(), config);
    }
}
