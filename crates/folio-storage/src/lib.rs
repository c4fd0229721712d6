//! Folio Storage Library
//!
//! Object-storage contract for processed images plus the backends that
//! implement it: a local filesystem directory and an in-memory map.
//!
//! # Path format
//!
//! Objects live at `{folder}/{file_name}`, e.g. `posts/sunset-1700000000000-k3j9x1.jpg`.
//! When that path is taken, callers retry once with `{folder}/{unix_millis}-{file_name}`.
//! Paths must not contain `..` or a leading `/`.

pub mod factory;
pub mod keys;
#[cfg(feature = "storage-local")]
pub mod local;
#[cfg(feature = "storage-memory")]
pub mod memory;
pub mod traits;

// Re-export commonly used types
pub use factory::create_storage;
pub use folio_core::StorageBackend;
#[cfg(feature = "storage-local")]
pub use local::LocalStorage;
#[cfg(feature = "storage-memory")]
pub use memory::MemoryStorage;
pub use traits::{
    ListOptions, ObjectInfo, PutOptions, Storage, StorageError, StorageResult, StoredObject,
};
