//! In-memory storage backend.
//!
//! Keeps objects in a map behind an async lock. Used for dry runs of the
//! upload pipeline and in tests.

use crate::keys::{file_name_of, validate_key};
use crate::traits::{
    ListOptions, ObjectInfo, PutOptions, Storage, StorageError, StorageResult, StoredObject,
};
use crate::StorageBackend;
use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone, Debug)]
struct MemoryObject {
    data: Bytes,
    content_type: String,
    created_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct MemoryStorage {
    base_url: String,
    objects: Arc<RwLock<BTreeMap<String, MemoryObject>>>,
}

impl MemoryStorage {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            objects: Arc::new(RwLock::new(BTreeMap::new())),
        }
    }

    /// Stored bytes and content type of an object.
    pub async fn get(&self, path: &str) -> Option<(Bytes, String)> {
        self.objects
            .read()
            .await
            .get(path)
            .map(|o| (o.data.clone(), o.content_type.clone()))
    }

    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

#[async_trait]
impl Storage for MemoryStorage {
    async fn put(
        &self,
        path: &str,
        content_type: &str,
        data: Bytes,
        options: PutOptions,
    ) -> StorageResult<StoredObject> {
        validate_key(path)?;

        let mut objects = self.objects.write().await;
        if !options.upsert && objects.contains_key(path) {
            return Err(StorageError::AlreadyExists(path.to_string()));
        }

        tracing::debug!(key = %path, size_bytes = data.len(), "Memory storage put");
        objects.insert(
            path.to_string(),
            MemoryObject {
                data,
                content_type: content_type.to_string(),
                created_at: Utc::now(),
            },
        );

        Ok(StoredObject {
            path: path.to_string(),
            public_url: self.public_url(path),
        })
    }

    fn public_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn delete(&self, path: &str) -> StorageResult<()> {
        validate_key(path)?;
        self.objects.write().await.remove(path);
        Ok(())
    }

    async fn list(&self, folder: &str, options: ListOptions) -> StorageResult<Vec<ObjectInfo>> {
        let folder = folder.trim_matches('/');
        let prefix = if folder.is_empty() {
            String::new()
        } else {
            format!("{}/", folder)
        };

        let objects = self.objects.read().await;
        let mut listed: Vec<ObjectInfo> = objects
            .iter()
            .filter(|(path, _)| {
                path.strip_prefix(prefix.as_str())
                    .is_some_and(|rest| !rest.contains('/'))
            })
            .map(|(path, object)| ObjectInfo {
                name: file_name_of(path).to_string(),
                path: path.clone(),
                url: self.public_url(path),
                size: object.data.len() as u64,
                created_at: object.created_at,
            })
            .collect();

        listed.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(a.name.cmp(&b.name)));

        Ok(listed
            .into_iter()
            .skip(options.offset)
            .take(options.limit)
            .collect())
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        validate_key(path)?;
        Ok(self.objects.read().await.contains_key(path))
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
