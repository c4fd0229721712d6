//! Folio Processing Library
//!
//! This crate turns uploaded photos into web-ready JPEGs and hands them to
//! storage: EXIF orientation reading, bounded downscaling, re-encoding,
//! collision-resistant naming, upload validation and the upload pipeline.

pub mod compression;
pub mod image;
pub mod naming;
pub mod upload;
pub mod validator;

#[cfg(test)]
mod test_support;

// Re-export commonly used types
pub use compression::JpegCompressor;
pub use crate::image::{
    read_orientation, Dimensions, HandleTracker, ImageCrateDecoder, ImageDecoder,
    ImageNormalizer, Orientation,
};
pub use naming::{generate_file_name, sanitize_base_name};
pub use upload::{ImageUploader, ProgressObserver, UploadError, UploadOutcome, UploadProgress, UploadStage};
pub use validator::{MediaValidator, ValidationError};
