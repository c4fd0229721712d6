//! Image processing module
//!
//! This module provides the normalization pipeline for uploaded photos:
//! - EXIF orientation reading (orientation)
//! - Decoding behind a swappable seam (decode)
//! - Bounded downscaling (resize) and orientation transforms (transform)
//! - The end-to-end normalizer (processor)

pub mod decode;
pub mod orientation;
pub mod processor;
pub mod resize;
pub mod transform;

pub use processor::ImageNormalizer;

// Re-export commonly used types
pub use decode::{DecodeHandle, HandleTracker, ImageCrateDecoder, ImageDecoder};
pub use orientation::{read_orientation, Orientation};
pub use resize::{Dimensions, ImageResize};
pub use transform::{fit_oriented, render_oriented, surface_dimensions, AffineTransform};
