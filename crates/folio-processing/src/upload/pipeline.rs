//! Upload pipeline: validate → process → store.
//!
//! The storage client is injected by the caller. Uploads never overwrite: on a
//! name clash the object is stored once more under a timestamp-prefixed key.

use chrono::Utc;
use folio_core::{
    ErrorMetadata, LogLevel, ProcessedImage, ProcessingError, SourceImage, UploadConfig,
};
use folio_storage::keys::{object_key, timestamped_key};
use folio_storage::{ListOptions, ObjectInfo, PutOptions, Storage, StorageError, StoredObject};
use std::sync::Arc;

use super::traits::ProgressObserver;
use super::types::{UploadOutcome, UploadStage};
use crate::image::{ImageCrateDecoder, ImageDecoder, ImageNormalizer};
use crate::validator::{MediaValidator, ValidationError};

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Processing(#[from] ProcessingError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

impl ErrorMetadata for UploadError {
    fn error_code(&self) -> &'static str {
        match self {
            UploadError::Validation(_) => "VALIDATION_ERROR",
            UploadError::Processing(e) => e.error_code(),
            UploadError::Storage(StorageError::AlreadyExists(_)) => "ALREADY_EXISTS",
            UploadError::Storage(_) => "STORAGE_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        match self {
            UploadError::Validation(_) => false,
            UploadError::Processing(e) => e.is_recoverable(),
            UploadError::Storage(_) => true,
        }
    }

    fn log_level(&self) -> LogLevel {
        match self {
            UploadError::Validation(_) => LogLevel::Debug,
            UploadError::Processing(e) => e.log_level(),
            UploadError::Storage(_) => LogLevel::Error,
        }
    }

    fn client_message(&self) -> String {
        match self {
            UploadError::Validation(e) => e.to_string(),
            UploadError::Processing(e) => e.client_message(),
            UploadError::Storage(_) => "The image could not be saved. Please try again.".to_string(),
        }
    }
}

/// Validates, normalizes and stores uploaded photos.
pub struct ImageUploader<D: ImageDecoder = ImageCrateDecoder> {
    normalizer: ImageNormalizer<D>,
    storage: Arc<dyn Storage>,
    config: UploadConfig,
    validator: MediaValidator,
}

impl<D: ImageDecoder> ImageUploader<D> {
    pub fn new(normalizer: ImageNormalizer<D>, storage: Arc<dyn Storage>, config: UploadConfig) -> Self {
        let validator = MediaValidator::from_config(&config);
        Self {
            normalizer,
            storage,
            config,
            validator,
        }
    }

    pub fn normalizer(&self) -> &ImageNormalizer<D> {
        &self.normalizer
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    #[tracing::instrument(skip(self, source, progress), fields(file_name = %source.file_name))]
    pub async fn upload_image(
        &self,
        source: SourceImage,
        progress: Option<&dyn ProgressObserver>,
    ) -> Result<UploadOutcome, UploadError> {
        let report = |stage: UploadStage| {
            if let Some(observer) = progress {
                observer.on_progress(stage.into());
            }
        };

        self.validator
            .validate_upload(&source.file_name, &source.content_type, source.size())?;

        report(UploadStage::Processing);
        let processed = self.normalizer.process(source).await?;

        report(UploadStage::Uploading);
        let stored = self.store(&processed).await?;

        report(UploadStage::Complete);
        tracing::info!(
            path = %stored.path,
            size_bytes = processed.size(),
            "Image uploaded"
        );

        Ok(UploadOutcome {
            success: true,
            url: stored.public_url,
            path: stored.path,
            size: processed.size(),
            file_name: processed.file_name,
            width: processed.width,
            height: processed.height,
        })
    }

    /// Put without overwriting, retrying once under a timestamped key.
    async fn store(&self, processed: &ProcessedImage) -> Result<StoredObject, StorageError> {
        let options = PutOptions {
            cache_control: self.config.cache_control.clone(),
            upsert: false,
        };

        let path = object_key(&self.config.folder, &processed.file_name);
        match self
            .storage
            .put(&path, &processed.content_type, processed.data.clone(), options.clone())
            .await
        {
            Err(StorageError::AlreadyExists(_)) => {
                let retry = timestamped_key(
                    &self.config.folder,
                    Utc::now().timestamp_millis(),
                    &processed.file_name,
                );
                tracing::warn!(path = %path, retry_path = %retry, "Object exists, retrying once");
                self.storage
                    .put(&retry, &processed.content_type, processed.data.clone(), options)
                    .await
            }
            other => other,
        }
    }

    /// Remove a stored image. Returns whether the delete went through.
    pub async fn delete_image(&self, path: &str) -> bool {
        if path.trim().is_empty() {
            return false;
        }

        match self.storage.delete(path).await {
            Ok(()) => {
                tracing::info!(path = %path, "Image deleted");
                true
            }
            Err(e) => {
                tracing::error!(path = %path, error = %e, "Failed to delete image");
                false
            }
        }
    }

    /// Newest images in `folder`, or in the configured folder when `None`.
    pub async fn list_images(&self, folder: Option<&str>) -> Vec<ObjectInfo> {
        let folder = folder.unwrap_or(&self.config.folder);
        match self.storage.list(folder, ListOptions::default()).await {
            Ok(objects) => objects,
            Err(e) => {
                tracing::error!(folder = %folder, error = %e, "Failed to list images");
                Vec::new()
            }
        }
    }
}
