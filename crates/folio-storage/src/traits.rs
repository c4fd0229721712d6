//! Storage abstraction trait
//!
//! This module defines the Storage trait that all storage backends must implement.

use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use serde::Serialize;
use thiserror::Error;

/// Storage operation errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Object already exists: {0}")]
    AlreadyExists(String),

    #[error("Upload failed: {0}")]
    UploadFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),

    #[error("File not found: {0}")]
    NotFound(String),

    #[error("Invalid storage key: {0}")]
    InvalidKey(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

/// Result type for storage operations
pub type StorageResult<T> = Result<T, StorageError>;

/// Options for a single `put`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PutOptions {
    /// Cache lifetime in seconds, forwarded to backends that serve files.
    pub cache_control: String,
    /// Overwrite an existing object instead of failing with `AlreadyExists`.
    pub upsert: bool,
}

impl Default for PutOptions {
    fn default() -> Self {
        Self {
            cache_control: folio_core::constants::DEFAULT_CACHE_CONTROL.to_string(),
            upsert: false,
        }
    }
}

/// Pagination for `list`. Results are ordered newest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListOptions {
    pub limit: usize,
    pub offset: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            limit: folio_core::constants::DEFAULT_LIST_LIMIT,
            offset: 0,
        }
    }
}

/// Location of an object that was just written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredObject {
    pub path: String,
    pub public_url: String,
}

/// Listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ObjectInfo {
    pub name: String,
    pub path: String,
    pub url: String,
    pub size: u64,
    pub created_at: DateTime<Utc>,
}

/// Storage abstraction trait
///
/// The upload pipeline only sees this trait; the concrete client is injected by
/// the caller rather than cached globally.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Write `data` at `path` and return the stored path and its public URL.
    ///
    /// Without `upsert`, an existing object makes this fail with
    /// `StorageError::AlreadyExists`.
    async fn put(
        &self,
        path: &str,
        content_type: &str,
        data: Bytes,
        options: PutOptions,
    ) -> StorageResult<StoredObject>;

    /// Publicly reachable URL for a path. Does not check existence.
    fn public_url(&self, path: &str) -> String;

    /// Delete an object. Deleting a missing object is not an error.
    async fn delete(&self, path: &str) -> StorageResult<()>;

    /// List objects directly under `folder`, newest first.
    async fn list(&self, folder: &str, options: ListOptions) -> StorageResult<Vec<ObjectInfo>>;

    /// Check if an object exists
    async fn exists(&self, path: &str) -> StorageResult<bool>;

    /// Get the storage backend type
    fn backend_type(&self) -> StorageBackend;
}
