//! Runtime configuration.
//!
//! Layered as defaults, then an optional JSON file, then `ACME_MEDICAL_*`
//! environment variables.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for {key}: {value}")]
    InvalidValue { key: &'static str, value: String },
}

/// Argon2id cost parameters.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PasswordHashConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordHashConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Config {
    /// SQLite file; `None` keeps everything in memory
    pub database_path: Option<PathBuf>,
    pub admin_username: String,
    pub admin_password: String,
    /// Prefix of usernames generated for physicians
    pub user_prefix: String,
    pub default_user_password: String,
    pub password_hash: PasswordHashConfig,
    pub log_filter: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_path: None,
            admin_username: "admin".into(),
            admin_password: "admin".into(),
            user_prefix: "user".into(),
            default_user_password: "password".into(),
            password_hash: PasswordHashConfig::default(),
            log_filter: "info".into(),
        }
    }
}

impl Config {
    /// Defaults, then `path` if given, then the process environment.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let base = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        base.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Defaults overridden by the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::default().with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Read a JSON config file. Missing fields keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Apply `ACME_MEDICAL_*` overrides resolved through `lookup`.
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(path) = lookup("ACME_MEDICAL_DATABASE_PATH") {
            self.database_path = Some(PathBuf::from(path));
        }
        if let Some(value) = lookup("ACME_MEDICAL_ADMIN_USERNAME") {
            self.admin_username = value;
        }
        if let Some(value) = lookup("ACME_MEDICAL_ADMIN_PASSWORD") {
            self.admin_password = value;
        }
        if let Some(value) = lookup("ACME_MEDICAL_USER_PREFIX") {
            self.user_prefix = value;
        }
        if let Some(value) = lookup("ACME_MEDICAL_DEFAULT_USER_PASSWORD") {
            self.default_user_password = value;
        }
        if let Some(value) = lookup("ACME_MEDICAL_LOG") {
            self.log_filter = value;
        }
        if let Some(value) = lookup("ACME_MEDICAL_HASH_MEMORY_KIB") {
            self.password_hash.memory_kib = parse_u32("ACME_MEDICAL_HASH_MEMORY_KIB", value)?;
        }
        if let Some(value) = lookup("ACME_MEDICAL_HASH_ITERATIONS") {
            self.password_hash.iterations = parse_u32("ACME_MEDICAL_HASH_ITERATIONS", value)?;
        }
        if let Some(value) = lookup("ACME_MEDICAL_HASH_PARALLELISM") {
            self.password_hash.parallelism = parse_u32("ACME_MEDICAL_HASH_PARALLELISM", value)?;
        }
        Ok(self)
    }
}

fn parse_u32(key: &'static str, value: String) -> Result<u32, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::InvalidValue { key, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.admin_username, "admin");
        assert_eq!(config.admin_password, "admin");
        assert_eq!(config.user_prefix, "user");
        assert_eq!(config.default_user_password, "password");
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("ACME_MEDICAL_USER_PREFIX", "doc"),
            ("ACME_MEDICAL_HASH_ITERATIONS", "3"),
            ("ACME_MEDICAL_DATABASE_PATH", "/tmp/acme.db"),
        ]
        .into_iter()
        .collect();

        let config = Config::default()
            .with_overrides_from(|key| vars.get(key).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.user_prefix, "doc");
        assert_eq!(config.password_hash.iterations, 3);
        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/acme.db")));
        assert_eq!(config.admin_username, "admin");
    }

    #[test]
    fn test_invalid_number() {
        let result = Config::default().with_overrides_from(|key| {
            (key == "ACME_MEDICAL_HASH_MEMORY_KIB").then(|| "lots".to_string())
        });
        assert!(matches!(
            result,
            Err(ConfigError::InvalidValue {
                key: "ACME_MEDICAL_HASH_MEMORY_KIB",
                ..
            })
        ));
    }

    #[test]
    fn test_partial_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"admin_password": "s3cret", "password_hash": {{"iterations": 1}}}}"#
        )
        .unwrap();

        let config = Config::from_file(file.path()).unwrap();
        assert_eq!(config.admin_password, "s3cret");
        assert_eq!(config.password_hash.iterations, 1);
        assert_eq!(config.password_hash.memory_kib, 19_456);
        assert_eq!(config.user_prefix, "user");
    }

    #[test]
    fn test_missing_file() {
        let result = Config::from_file(Path::new("/nonexistent/acme.json"));
        assert!(matches!(result, Err(ConfigError::Io { .. })));
    }
}
