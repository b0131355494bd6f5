//! # formkit-storage
//!
//! A small persistent string key/value store modelled on browser local
//! storage: `get_item` returns the stored string or `None`, `set_item`
//! replaces it. Backends hold the data; the [`Storage`] facade enforces the
//! configured quota.
//!
//! ## Quick Start
//!
//! ```rust
//! use formkit_storage::{MemoryStore, Storage};
//!
//! let storage = Storage::new(MemoryStore::new());
//! storage.set_item("count", "3").unwrap();
//!
//! assert_eq!(storage.get_item("count").unwrap().as_deref(), Some("3"));
//! assert_eq!(storage.get_parsed::<u32>("count").unwrap(), Some(3));
//! ```

use std::str::FromStr;
use thiserror::Error;

pub mod backends;
pub mod config;

pub use backends::*;
pub use config::*;

/// Storage operation errors
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Quota exceeded: storing '{key}' needs {required} bytes, quota is {quota} bytes")]
    QuotaExceeded {
        key: String,
        required: usize,
        quota: usize,
    },

    #[error("Value stored under '{key}' could not be parsed: {value:?}")]
    InvalidValue { key: String, value: String },

    #[error("Backend error: {0}")]
    Backend(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Byte cost of one entry towards the quota
pub fn entry_size(key: &str, value: &str) -> usize {
    key.len() + value.len()
}

/// Core storage backend trait that all storage implementations must implement
pub trait StorageBackend: Send + Sync {
    /// Read the value stored under `key`
    fn get_item(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value
    fn set_item(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Remove `key`; returns whether it was present
    fn remove_item(&self, key: &str) -> StorageResult<bool>;

    /// Remove every key
    fn clear(&self) -> StorageResult<()>;

    /// All keys, sorted
    fn keys(&self) -> StorageResult<Vec<String>>;

    /// Total bytes used by keys and values
    fn used_bytes(&self) -> StorageResult<usize>;

    /// Number of stored keys
    fn len(&self) -> StorageResult<usize> {
        Ok(self.keys()?.len())
    }

    fn is_empty(&self) -> StorageResult<bool> {
        Ok(self.len()? == 0)
    }
}

impl<B: StorageBackend + ?Sized> StorageBackend for Box<B> {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> StorageResult<bool> {
        (**self).remove_item(key)
    }

    fn clear(&self) -> StorageResult<()> {
        (**self).clear()
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        (**self).keys()
    }

    fn used_bytes(&self) -> StorageResult<usize> {
        (**self).used_bytes()
    }

    fn len(&self) -> StorageResult<usize> {
        (**self).len()
    }
}

/// High-level storage interface adding quota enforcement and typed reads
pub struct Storage<B: StorageBackend> {
    backend: B,
    config: StorageConfig,
}

impl<B: StorageBackend> Storage<B> {
    /// Create a new storage instance with the default configuration
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            config: StorageConfig::default(),
        }
    }

    /// Create a storage instance with custom configuration
    pub fn with_config(backend: B, config: StorageConfig) -> Self {
        Self { backend, config }
    }

    pub fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        self.backend.get_item(key)
    }

    /// Store a value after checking it fits within the quota.
    ///
    /// On `QuotaExceeded` the store is left untouched. The check and the write
    /// are separate backend calls, so the quota is only exact for a single
    /// writer.
    pub fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        if let Some(quota) = *self.config.get_quota_bytes() {
            let current = self
                .backend
                .get_item(key)?
                .map(|old| entry_size(key, &old))
                .unwrap_or(0);
            let required = self
                .backend
                .used_bytes()?
                .saturating_sub(current)
                + entry_size(key, value);

            if required > quota {
                tracing::warn!(key, required, quota, "Storage quota exceeded");
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    required,
                    quota,
                });
            }
        }

        self.backend.set_item(key, value)
    }

    pub fn remove_item(&self, key: &str) -> StorageResult<bool> {
        self.backend.remove_item(key)
    }

    pub fn clear(&self) -> StorageResult<()> {
        self.backend.clear()
    }

    pub fn keys(&self) -> StorageResult<Vec<String>> {
        self.backend.keys()
    }

    pub fn len(&self) -> StorageResult<usize> {
        self.backend.len()
    }

    pub fn is_empty(&self) -> StorageResult<bool> {
        self.backend.is_empty()
    }

    /// Read and parse a value; `InvalidValue` if the stored text does not parse
    pub fn get_parsed<T: FromStr>(&self, key: &str) -> StorageResult<Option<T>> {
        match self.backend.get_item(key)? {
            Some(value) => value
                .trim()
                .parse::<T>()
                .map(Some)
                .map_err(|_| StorageError::InvalidValue {
                    key: key.to_string(),
                    value,
                }),
            None => Ok(None),
        }
    }

    /// Store any displayable value as its string form
    pub fn set_display<T: std::fmt::Display>(&self, key: &str, value: &T) -> StorageResult<()> {
        self.set_item(key, &value.to_string())
    }

    /// Get the underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Get the storage configuration
    pub fn config(&self) -> &StorageConfig {
        &self.config
    }
}
