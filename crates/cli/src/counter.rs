//! A persisted counter whose next value must pass validation before it is stored

use crate::forms::counter_schema;
use formkit_storage::{Storage, StorageBackend, StorageError, StorageResult};
use formkit_validation::{Schema, ValidationErrors, ValidationService};
use serde_json::json;

/// Storage key holding the counter as decimal text
pub const COUNT_KEY: &str = "count";

/// Result of an increment attempt
#[derive(Debug, Clone, PartialEq)]
pub enum Increment {
    /// The new value, already persisted
    Accepted(i64),
    /// The next value failed validation; nothing changed
    Rejected(ValidationErrors),
}

pub struct Counter<'a, B: StorageBackend> {
    storage: &'a Storage<B>,
    validator: ValidationService,
    schema: Schema,
    value: i64,
}

impl<'a, B: StorageBackend> Counter<'a, B> {
    /// Load the stored count. A missing or unparseable value starts at zero.
    pub fn load(storage: &'a Storage<B>, validator: ValidationService) -> StorageResult<Self> {
        let value = match storage.get_parsed::<i64>(COUNT_KEY) {
            Ok(Some(value)) => value,
            Ok(None) => 0,
            Err(StorageError::InvalidValue { value, .. }) => {
                tracing::warn!(key = COUNT_KEY, stored = %value, "Ignoring unparseable count");
                0
            }
            Err(e) => return Err(e),
        };

        Ok(Self {
            storage,
            validator,
            schema: counter_schema(),
            value,
        })
    }

    pub fn value(&self) -> i64 {
        self.value
    }

    /// Validate `value + 1`; persist and adopt it only if it passes
    pub fn increment(&mut self) -> StorageResult<Increment> {
        let next = self.value.checked_add(1);
        // Past i64::MAX the schema still sees a number, just not an exact one
        let candidate = match next {
            Some(next) => json!(next),
            None => json!(self.value as f64 + 1.0),
        };
        let outcome = self
            .validator
            .validate(&json!({ "count": candidate }), &self.schema);

        match (outcome.into_result(), next) {
            (Ok(_), Some(next)) => {
                self.storage.set_display(COUNT_KEY, &next)?;
                self.value = next;
                tracing::info!(count = next, "Counter incremented");
                Ok(Increment::Accepted(next))
            }
            (Ok(_), None) => Err(StorageError::InvalidValue {
                key: COUNT_KEY.to_string(),
                value: self.value.to_string(),
            }),
            (Err(errors), _) => {
                tracing::info!(count = self.value, attempted = %candidate, %errors, "Counter increment rejected");
                Ok(Increment::Rejected(errors))
            }
        }
    }

    /// Forget the stored value
    pub fn reset(&mut self) -> StorageResult<()> {
        self.storage.remove_item(COUNT_KEY)?;
        self.value = 0;
        tracing::info!("Counter reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use formkit_storage::{FileStore, MemoryStore, StorageConfig};
    use tempfile::TempDir;

    #[test]
    fn test_starts_at_zero() {
        let storage = Storage::new(MemoryStore::new());
        let counter = Counter::load(&storage, ValidationService::new()).unwrap();
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn test_increment_persists_as_text() {
        let storage = Storage::new(MemoryStore::new());
        let mut counter = Counter::load(&storage, ValidationService::new()).unwrap();

        assert_eq!(counter.increment().unwrap(), Increment::Accepted(1));
        assert_eq!(storage.get_item(COUNT_KEY).unwrap().as_deref(), Some("1"));
    }

    #[test]
    fn test_stops_at_nine() {
        let storage = Storage::new(MemoryStore::new());
        storage.set_item(COUNT_KEY, "8").unwrap();
        let mut counter = Counter::load(&storage, ValidationService::new()).unwrap();

        assert_eq!(counter.increment().unwrap(), Increment::Accepted(9));

        match counter.increment().unwrap() {
            Increment::Rejected(errors) => {
                assert_eq!(errors.first_message("count"), Some("Count must be less than 10"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(counter.value(), 9);
        assert_eq!(storage.get_item(COUNT_KEY).unwrap().as_deref(), Some("9"));
    }

    #[test]
    fn test_increment_at_i64_max_is_rejected() {
        let storage = Storage::new(MemoryStore::new());
        storage.set_item(COUNT_KEY, &i64::MAX.to_string()).unwrap();
        let mut counter = Counter::load(&storage, ValidationService::new()).unwrap();

        match counter.increment().unwrap() {
            Increment::Rejected(errors) => {
                assert_eq!(errors.first_message("count"), Some("Count must be less than 10"));
            }
            other => panic!("expected rejection, got {:?}", other),
        }
        assert_eq!(counter.value(), i64::MAX);
        assert_eq!(
            storage.get_item(COUNT_KEY).unwrap(),
            Some(i64::MAX.to_string())
        );
    }

    #[test]
    fn test_unparseable_value_starts_at_zero() {
        let storage = Storage::new(MemoryStore::new());
        storage.set_item(COUNT_KEY, "NaN").unwrap();

        let counter = Counter::load(&storage, ValidationService::new()).unwrap();
        assert_eq!(counter.value(), 0);
    }

    #[test]
    fn test_reset() {
        let storage = Storage::new(MemoryStore::new());
        storage.set_item(COUNT_KEY, "5").unwrap();
        let mut counter = Counter::load(&storage, ValidationService::new()).unwrap();

        counter.reset().unwrap();
        assert_eq!(counter.value(), 0);
        assert_eq!(storage.get_item(COUNT_KEY).unwrap(), None);
    }

    #[test]
    fn test_survives_restart_with_file_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("storage.json");
        let config = StorageConfig::default();

        {
            let storage = Storage::with_config(FileStore::open(&path, &config).unwrap(), config.clone());
            let mut counter = Counter::load(&storage, ValidationService::new()).unwrap();
            counter.increment().unwrap();
            counter.increment().unwrap();
        }

        let storage = Storage::with_config(FileStore::open(&path, &config).unwrap(), config);
        let counter = Counter::load(&storage, ValidationService::new()).unwrap();
        assert_eq!(counter.value(), 2);
    }
}
