use async_trait::async_trait;
use bytes::Bytes;
use folio_storage::{
    ListOptions, MemoryStorage, ObjectInfo, PutOptions, Storage, StorageBackend, StorageError,
    StorageResult, StoredObject,
};
use std::sync::Mutex;

/// Memory storage that reports `AlreadyExists` for the first `collisions` puts.
pub struct CollidingStorage {
    inner: MemoryStorage,
    collisions: Mutex<usize>,
    attempts: Mutex<Vec<String>>,
}

impl CollidingStorage {
    pub fn new(collisions: usize) -> Self {
        Self {
            inner: MemoryStorage::new("http://localhost:3000/blog-images"),
            collisions: Mutex::new(collisions),
            attempts: Mutex::new(Vec::new()),
        }
    }

    pub fn attempts(&self) -> Vec<String> {
        self.attempts.lock().unwrap().clone()
    }

    pub fn inner(&self) -> &MemoryStorage {
        &self.inner
    }
}

#[async_trait]
impl Storage for CollidingStorage {
    async fn put(
        &self,
        path: &str,
        content_type: &str,
        data: Bytes,
        options: PutOptions,
    ) -> StorageResult<StoredObject> {
        self.attempts.lock().unwrap().push(path.to_string());
        {
            let mut remaining = self.collisions.lock().unwrap();
            if *remaining > 0 {
                *remaining -= 1;
                return Err(StorageError::AlreadyExists(path.to_string()));
            }
        }
        self.inner.put(path, content_type, data, options).await
    }

    fn public_url(&self, path: &str) -> String {
        self.inner.public_url(path)
    }

    async fn delete(&self, path: &str) -> StorageResult<()> {
        self.inner.delete(path).await
    }

    async fn list(&self, folder: &str, options: ListOptions) -> StorageResult<Vec<ObjectInfo>> {
        self.inner.list(folder, options).await
    }

    async fn exists(&self, path: &str) -> StorageResult<bool> {
        self.inner.exists(path).await
    }

    fn backend_type(&self) -> StorageBackend {
        StorageBackend::Memory
    }
}
