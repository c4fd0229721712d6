use crate::keys::{file_name_of, object_key, validate_key};
use crate::traits::{
    ListOptions, ObjectInfo, PutOptions, Storage, StorageError, StorageResult, StoredObject,
};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::io::AsyncWriteExt;

/// Local filesystem storage implementation
#[derive(Clone, Debug)]
pub struct LocalStorage {
    base_path: PathBuf,
    base_url: String,
}

impl LocalStorage {
    /// Create a new LocalStorage instance
    ///
    /// # Arguments
    /// * `base_path` - Root directory for file storage (e.g., "/var/lib/folio/blog-images")
    /// * `base_url` - Base URL for serving files (e.g., "http://localhost:3000/blog-images")
    pub async fn new(base_path: impl Into<PathBuf>, base_url: String) -> StorageResult<Self> {
        let base_path = base_path.into();

        fs::create_dir_all(&base_path).await.map_err(|e| {
            StorageError::ConfigError(format!(
                "Failed to create storage directory {}: {}",
                base_path.display(),
                e
            ))
        })?;

        Ok(LocalStorage {
            base_path,
            base_url,
        })
    }

    /// Convert storage key to filesystem path
    ///
    /// Keys with traversal sequences or absolute prefixes are rejected before
    /// they are joined onto the base directory.
    fn key_to_path(&self, storage_key: &str) -> StorageResult<PathBuf> {
        validate_key(storage_key)?;
        Ok(self.base_path.join(storage_key))
    }

    /// Ensure parent directory exists
    async fn ensure_parent_dir(&self, path: &Path) -> StorageResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }
}

/// Await a write into the freshly opened `path`, deleting the file if it
/// fails so no truncated object is left under the key.
async fn remove_on_failure<F>(path: &Path, write: F) -> std::io::Result<()>
where
    F: Future<Output = std::io::Result<()>>,
{
    let Err(e) = write.await else {
        return Ok(());
    };

    if let Err(remove_err) = fs::remove_file(path).await {
        tracing::warn!(
            path = %path.display(),
            error = %remove_err,
            "Failed to remove partially written file"
        );
    }
    Err(e)
}

#[async_trait]
impl Storage for LocalStorage {
    async fn put(
        &self,
        path: &str,
        _content_type: &str,
        data: Bytes,
        options: PutOptions,
    ) -> StorageResult<StoredObject> {
        let file_path = self.key_to_path(path)?;
        let size = data.len();

        self.ensure_parent_dir(&file_path).await?;

        let start = std::time::Instant::now();

        let mut open = fs::OpenOptions::new();
        open.write(true);
        if options.upsert {
            open.create(true).truncate(true);
        } else {
            open.create_new(true);
        }

        let mut file = open.open(&file_path).await.map_err(|e| {
            if e.kind() == ErrorKind::AlreadyExists {
                StorageError::AlreadyExists(path.to_string())
            } else {
                StorageError::UploadFailed(format!(
                    "Failed to create file {}: {}",
                    file_path.display(),
                    e
                ))
            }
        })?;

        remove_on_failure(&file_path, async {
            file.write_all(&data).await?;
            file.sync_all().await
        })
        .await
        .map_err(|e| {
            StorageError::UploadFailed(format!(
                "Failed to write file {}: {}",
                file_path.display(),
                e
            ))
        })?;

        let public_url = self.public_url(path);

        tracing::info!(
            path = %file_path.display(),
            key = %path,
            size_bytes = size,
            cache_control = %options.cache_control,
            duration_ms = start.elapsed().as_secs_f64() * 1000.0,
            "Local storage upload successful"
        );

        Ok(StoredObject {
            path: path.to_string(),
            public_url,
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn delete(&self, path: &str) -> StorageResult<()> {
        let file_path = self.key_to_path(path)?;

        match fs::remove_file(&file_path).await {
            Ok(()) => {
                tracing::info!(key = %path, "Local storage delete successful");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::debug!(key = %path, "Delete of missing object ignored");
                Ok(())
            }
            Err(e) => Err(StorageError::DeleteFailed(format!(
                "Failed to delete file {}: {}",
                file_path.display(),
                e
            ))),
        }
    }

    async fn list(&self, folder: &str, options: ListOptions) -> StorageResult<Vec<ObjectInfo>> {
        let dir = if folder.trim_matches('/').is_empty() {
            self.base_path.clone()
        } else {
            self.key_to_path(folder.trim_matches('/'))?
        };

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut objects = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let metadata = entry.metadata().await?;
            if !metadata.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().into_owned();
            let path = object_key(folder, &name);
            let created_at: DateTime<Utc> = metadata
                .created()
                .or_else(|_| metadata.modified())
                .map(DateTime::<Utc>::from)
                .unwrap_or_else(|_| Utc::now());

            objects.push(ObjectInfo {
                url: self.public_url(&path),
                name: file_name_of(&path).to_string(),
                path,
                size: metadata.len(),
                created_at,
            });
        }

        objects.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.name.cmp(&b.name)));

        Ok(objects
            .into_iter()
            .skip(options.offset)
            .take(options.limit)
            .collect())
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        let file_path = self.key_to_path(path)?;
        Ok(fs::try_exists(&file_path).await.unwrap_or(false))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Local
    }
}
