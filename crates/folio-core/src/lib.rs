//! Folio Core Library
//!
//! This crate provides the domain models, error types, configuration and constants
//! shared by the image pipeline, the storage backends and the command-line tool.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod storage_types;

// Re-export commonly used types
pub use config::{Config, ConfigError, ProcessorConfig, StorageConfig, UploadConfig};
pub use error::{ErrorMetadata, LogLevel, ProcessingError};
pub use models::{ProcessedImage, SourceImage};
pub use storage_types::StorageBackend;
