//! Shared path handling for storage backends.
//!
//! Path format: `{folder}/{file_name}`; the collision fallback is
//! `{folder}/{unix_millis}-{file_name}`.

use crate::traits::{StorageError, StorageResult};

/// Reject paths that could escape the storage root.
pub fn validate_key(path: &str) -> StorageResult<()> {
    if path.is_empty() {
        return Err(StorageError::InvalidKey("Storage key is empty".to_string()));
    }
    if path.contains("..") || path.starts_with('/') || path.contains('\\') {
        return Err(StorageError::InvalidKey(
            "Storage key contains invalid characters".to_string(),
        ));
    }
    Ok(())
}

/// Object path for a file inside a folder.
pub fn object_key(folder: &str, file_name: &str) -> String {
    let folder = folder.trim_matches('/');
    if folder.is_empty() {
        file_name.to_string()
    } else {
        format!("{}/{}", folder, file_name)
    }
}

/// Fallback path used after a collision: the file name prefixed with a timestamp.
pub fn timestamped_key(folder: &str, unix_millis: i64, file_name: &str) -> String {
    object_key(folder, &format!("{}-{}", unix_millis, file_name))
}

/// Last path segment.
pub fn file_name_of(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}
