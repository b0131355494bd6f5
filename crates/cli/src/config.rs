//! Application configuration loaded from `FORMKIT_*` environment variables

use formkit_storage::{StorageConfig, DEFAULT_QUOTA_BYTES};
use std::path::PathBuf;
use std::str::FromStr;
use thiserror::Error;

/// Configuration error type
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for '{field}': '{value}'. Expected: {expected}")]
    InvalidValue {
        field: String,
        value: String,
        expected: String,
    },
}

impl ConfigError {
    pub fn invalid_value(
        field: impl Into<String>,
        value: impl Into<String>,
        expected: impl Into<String>,
    ) -> Self {
        Self::InvalidValue {
            field: field.into(),
            value: value.into(),
            expected: expected.into(),
        }
    }
}

/// Environment enumeration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Testing,
    Production,
}

impl FromStr for Environment {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Environment::Development),
            "testing" | "test" => Ok(Environment::Testing),
            "production" | "prod" => Ok(Environment::Production),
            _ => Err(ConfigError::invalid_value(
                "FORMKIT_ENV",
                s,
                "development, testing, or production",
            )),
        }
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let env_str = match self {
            Environment::Development => "development",
            Environment::Testing => "testing",
            Environment::Production => "production",
        };
        write!(f, "{}", env_str)
    }
}

impl Environment {
    /// Default log filter for this environment
    pub fn default_log_level(&self) -> &'static str {
        match self {
            Environment::Development => "debug",
            Environment::Testing => "error",
            Environment::Production => "info",
        }
    }
}

/// Which backend holds the key/value data
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreKind {
    /// Lives only as long as the process
    Memory,
    /// Persisted JSON file
    File(PathBuf),
}

pub const DEFAULT_STORE_PATH: &str = ".formkit/storage.json";

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub store: StoreKind,
    pub log_level: String,
    pub quota_bytes: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Development,
            store: StoreKind::File(PathBuf::from(DEFAULT_STORE_PATH)),
            log_level: Environment::Development.default_log_level().to_string(),
            quota_bytes: DEFAULT_QUOTA_BYTES,
        }
    }
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("FORMKIT_ENV") {
            Some(value) => value.parse()?,
            None => Environment::Development,
        };

        let path = lookup("FORMKIT_STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_STORE_PATH));

        let store = match lookup("FORMKIT_STORE").as_deref().map(str::to_lowercase) {
            None => StoreKind::File(path),
            Some(kind) if kind == "file" => StoreKind::File(path),
            Some(kind) if kind == "memory" => StoreKind::Memory,
            Some(other) => {
                return Err(ConfigError::invalid_value("FORMKIT_STORE", other, "file or memory"))
            }
        };

        let log_level = lookup("FORMKIT_LOG_LEVEL")
            .unwrap_or_else(|| environment.default_log_level().to_string());

        let quota_bytes = match lookup("FORMKIT_QUOTA_BYTES") {
            Some(value) => value.trim().parse::<usize>().map_err(|_| {
                ConfigError::invalid_value("FORMKIT_QUOTA_BYTES", value.as_str(), "a byte count")
            })?,
            None => DEFAULT_QUOTA_BYTES,
        };

        Ok(Self {
            environment,
            store,
            log_level,
            quota_bytes,
        })
    }

    /// Storage settings derived from this configuration
    pub fn storage_config(&self) -> StorageConfig {
        StorageConfig::new().with_quota(self.quota_bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();

        assert_eq!(config.environment, Environment::Development);
        assert_eq!(config.store, StoreKind::File(PathBuf::from(DEFAULT_STORE_PATH)));
        assert_eq!(config.log_level, "debug");
        assert_eq!(config.quota_bytes, DEFAULT_QUOTA_BYTES);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup(&[
            ("FORMKIT_ENV", "prod"),
            ("FORMKIT_STORE", "Memory"),
            ("FORMKIT_QUOTA_BYTES", "1024"),
        ]))
        .unwrap();

        assert_eq!(config.environment, Environment::Production);
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.log_level, "info");
        assert_eq!(*config.storage_config().get_quota_bytes(), Some(1024));
    }

    #[test]
    fn test_custom_store_path() {
        let config = AppConfig::from_lookup(lookup(&[
            ("FORMKIT_STORE_PATH", "/tmp/counter.json"),
            ("FORMKIT_LOG_LEVEL", "warn"),
        ]))
        .unwrap();

        assert_eq!(config.store, StoreKind::File(PathBuf::from("/tmp/counter.json")));
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn test_invalid_values() {
        let err = AppConfig::from_lookup(lookup(&[("FORMKIT_ENV", "staging")])).unwrap_err();
        assert!(err.to_string().contains("FORMKIT_ENV"));

        let err = AppConfig::from_lookup(lookup(&[("FORMKIT_STORE", "redis")])).unwrap_err();
        assert!(err.to_string().contains("file or memory"));

        let err = AppConfig::from_lookup(lookup(&[("FORMKIT_QUOTA_BYTES", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { ref field, .. } if field == "FORMKIT_QUOTA_BYTES"));
    }

    #[test]
    #[serial]
    fn test_from_env() {
        std::env::set_var("FORMKIT_ENV", "testing");
        std::env::set_var("FORMKIT_STORE", "memory");
        let config = AppConfig::from_env();
        std::env::remove_var("FORMKIT_ENV");
        std::env::remove_var("FORMKIT_STORE");

        let config = config.unwrap();
        assert_eq!(config.environment, Environment::Testing);
        assert_eq!(config.store, StoreKind::Memory);
        assert_eq!(config.environment.to_string(), "testing");
    }
}
