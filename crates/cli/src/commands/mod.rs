pub mod count;
pub mod signup;
pub mod validate;

use crate::config::{AppConfig, StoreKind};
use anyhow::Context as _;
use formkit_storage::{FileStore, MemoryStore, Storage, StorageBackend};
use formkit_validation::ValidationService;

pub type DynStorage = Storage<Box<dyn StorageBackend>>;

/// Everything a command needs
pub struct Context {
    pub storage: DynStorage,
    pub validator: ValidationService,
    /// Print machine-readable JSON instead of text
    pub json: bool,
}

impl Context {
    pub fn new(storage: DynStorage, json: bool) -> Self {
        Self {
            storage,
            validator: ValidationService::new(),
            json,
        }
    }
}

/// Open the store selected by the configuration
pub fn open_storage(config: &AppConfig) -> anyhow::Result<DynStorage> {
    let storage_config = config.storage_config();

    let backend: Box<dyn StorageBackend> = match &config.store {
        StoreKind::Memory => Box::new(MemoryStore::new()),
        StoreKind::File(path) => Box::new(
            FileStore::open(path, &storage_config)
                .with_context(|| format!("Failed to open store at {}", path.display()))?,
        ),
    };

    Ok(Storage::with_config(backend, storage_config))
}

#[cfg(test)]
pub(crate) fn memory_context(json: bool) -> Context {
    let backend: Box<dyn StorageBackend> = Box::new(MemoryStore::new());
    Context::new(Storage::new(backend), json)
}
