//! Pipeline-wide constants and defaults.

use std::time::Duration;

/// Default bounding box for processed images.
pub const DEFAULT_MAX_WIDTH: u32 = 1920;
pub const DEFAULT_MAX_HEIGHT: u32 = 1080;

/// Default JPEG quality factor (0-1).
pub const DEFAULT_QUALITY: f32 = 0.85;

/// Upper bound on how long a single decode may take.
pub const DEFAULT_DECODE_TIMEOUT: Duration = Duration::from_secs(30);

/// Only this many leading bytes are scanned for orientation metadata.
pub const ORIENTATION_SCAN_LIMIT: usize = 64 * 1024;

/// Every processed image is re-encoded to this format.
pub const OUTPUT_CONTENT_TYPE: &str = "image/jpeg";
pub const OUTPUT_EXTENSION: &str = "jpg";

/// Sanitized base names are truncated to this many characters.
pub const MAX_BASE_NAME_LEN: usize = 30;
/// Length of the random suffix appended to generated file names.
pub const RANDOM_SUFFIX_LEN: usize = 6;

/// Raw uploads above this size are rejected before processing.
pub const DEFAULT_MAX_UPLOAD_MB: usize = 20;

pub const DEFAULT_UPLOAD_FOLDER: &str = "posts";
pub const DEFAULT_CACHE_CONTROL: &str = "3600";
pub const DEFAULT_LIST_LIMIT: usize = 100;

pub const DEFAULT_STORAGE_PATH: &str = "./data/blog-images";
pub const DEFAULT_PUBLIC_BASE_URL: &str = "http://localhost:3000/blog-images";

pub const DEFAULT_ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "heic", "heif"];
pub const DEFAULT_ALLOWED_CONTENT_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/webp",
    "image/heic",
    "image/heif",
];
