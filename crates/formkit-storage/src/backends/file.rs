//! File-backed storage: one JSON object per store, rewritten atomically

use crate::config::StorageConfig;
use crate::{entry_size, StorageBackend, StorageError, StorageResult};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Key/value store persisted to a single JSON file.
///
/// The file is read once on open. Every mutation writes the full map to a
/// temporary file in the same directory and renames it over the original, so
/// readers never observe a partial write. A failed write leaves both the file
/// and the in-memory view unchanged.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    pretty: bool,
    entries: RwLock<BTreeMap<String, String>>,
}

impl FileStore {
    /// Open the store at `path`, creating it empty if the file does not exist
    pub fn open(path: impl Into<PathBuf>, config: &StorageConfig) -> StorageResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            if !parent.exists() {
                if *config.get_create_directories() {
                    fs::create_dir_all(parent)?;
                } else {
                    return Err(StorageError::Backend(format!(
                        "Directory {} does not exist",
                        parent.display()
                    )));
                }
            }
        }

        let entries = match fs::read_to_string(&path) {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::info!(path = %path.display(), keys = entries.len(), "Opened file store");

        Ok(Self {
            path,
            pretty: *config.get_pretty(),
            entries: RwLock::new(entries),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self, entries: &BTreeMap<String, String>) -> StorageResult<()> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let body = if self.pretty {
            serde_json::to_vec_pretty(entries)?
        } else {
            serde_json::to_vec(entries)?
        };

        let mut tmp = tempfile::NamedTempFile::new_in(&dir)?;
        tmp.write_all(&body)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;

        tracing::debug!(path = %self.path.display(), bytes = body.len(), "Persisted file store");
        Ok(())
    }

    /// Apply `change` to a copy of the entries, persist it, then publish it
    fn mutate<R>(&self, change: impl FnOnce(&mut BTreeMap<String, String>) -> R) -> StorageResult<R> {
        let mut entries = self.entries.write();
        let mut next = entries.clone();
        let result = change(&mut next);
        self.persist(&next)?;
        *entries = next;
        Ok(result)
    }
}

impl StorageBackend for FileStore {
    fn get_item(&self, key: &str) -> StorageResult<Option<String>> {
        Ok(self.entries.read().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> StorageResult<()> {
        self.mutate(|entries| {
            entries.insert(key.to_string(), value.to_string());
        })
    }

    fn remove_item(&self, key: &str) -> StorageResult<bool> {
        if !self.entries.read().contains_key(key) {
            return Ok(false);
        }
        self.mutate(|entries| entries.remove(key).is_some())
    }

    fn clear(&self) -> StorageResult<()> {
        self.mutate(|entries| entries.clear())
    }

    fn keys(&self) -> StorageResult<Vec<String>> {
        Ok(self.entries.read().keys().cloned().collect())
    }

    fn used_bytes(&self) -> StorageResult<usize> {
        Ok(self
            .entries
            .read()
            .iter()
            .map(|(key, value)| entry_size(key, value))
            .sum())
    }

    fn len(&self) -> StorageResult<usize> {
        Ok(self.entries.read().len())
    }
}
