//! Storage configuration

use serde::{Deserialize, Serialize};
use service_builder::builder;

/// Customary per-origin limit of browser local storage
pub const DEFAULT_QUOTA_BYTES: usize = 5 * 1024 * 1024;

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[builder]
pub struct StorageConfig {
    /// Maximum bytes of keys plus values (None = unlimited)
    #[builder(default = "Some(5 * 1024 * 1024)", getter)]
    pub quota_bytes: Option<usize>,

    /// Create missing parent directories for file-backed stores
    #[builder(default = "true", getter)]
    pub create_directories: bool,

    /// Pretty-print the JSON written by file-backed stores
    #[builder(default = "true", getter)]
    pub pretty: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            quota_bytes: Some(DEFAULT_QUOTA_BYTES),
            create_directories: true,
            pretty: true,
        }
    }
}

impl StorageConfig {
    /// Create a new storage configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the quota in bytes
    pub fn with_quota(mut self, bytes: usize) -> Self {
        self.quota_bytes = Some(bytes);
        self
    }

    /// Remove the quota
    pub fn unlimited(mut self) -> Self {
        self.quota_bytes = None;
        self
    }
}

impl StorageConfigBuilder {
    /// Configuration for tests: small quota, compact files
    pub fn testing() -> Self {
        StorageConfigBuilder::new()
            .quota_bytes(Some(64 * 1024))
            .pretty(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorageConfig::default();
        assert_eq!(*config.get_quota_bytes(), Some(DEFAULT_QUOTA_BYTES));
        assert!(*config.get_create_directories());
        assert!(*config.get_pretty());
    }

    #[test]
    fn test_builder_matches_defaults() {
        let built = StorageConfigBuilder::new().build().expect("Failed to build config");
        let defaults = StorageConfig::default();
        assert_eq!(built.get_quota_bytes(), defaults.get_quota_bytes());
        assert_eq!(built.get_create_directories(), defaults.get_create_directories());
        assert_eq!(built.get_pretty(), defaults.get_pretty());
    }

    #[test]
    fn test_testing_preset() {
        let config = StorageConfigBuilder::testing()
            .build()
            .expect("Failed to build config");
        assert_eq!(*config.get_quota_bytes(), Some(64 * 1024));
        assert!(!*config.get_pretty());
    }

    #[test]
    fn test_builder_overrides() {
        let config = StorageConfigBuilder::new()
            .create_directories(false)
            .pretty(false)
            .quota_bytes(None)
            .build()
            .expect("Failed to build config");

        assert!(!*config.get_create_directories());
        assert!(!*config.get_pretty());
        assert!(config.get_quota_bytes().is_none());
    }

    #[test]
    fn test_helpers() {
        assert_eq!(*StorageConfig::new().with_quota(42).get_quota_bytes(), Some(42));
        assert!(StorageConfig::new().unlimited().get_quota_bytes().is_none());
    }
}
