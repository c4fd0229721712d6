//! Upload flow: validate → process → store.

pub mod pipeline;
pub mod traits;
pub mod types;

pub use pipeline::{ImageUploader, UploadError};
pub use traits::ProgressObserver;
pub use types::{UploadOutcome, UploadProgress, UploadStage};
