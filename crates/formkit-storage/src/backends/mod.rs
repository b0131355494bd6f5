//! Storage backend implementations

pub mod memory;

#[cfg(feature = "file")]
pub mod file;

pub use memory::MemoryStore;

#[cfg(feature = "file")]
pub use file::FileStore;
