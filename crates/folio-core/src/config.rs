//! Configuration module
//!
//! Processor, upload and storage settings. Every value has a default so the
//! pipeline works with no environment at all; `Config::from_env` overrides them
//! from `FOLIO_*` variables (and a `.env` file when present).

use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::constants::{
    DEFAULT_ALLOWED_CONTENT_TYPES, DEFAULT_ALLOWED_EXTENSIONS, DEFAULT_CACHE_CONTROL,
    DEFAULT_DECODE_TIMEOUT, DEFAULT_MAX_HEIGHT, DEFAULT_MAX_UPLOAD_MB, DEFAULT_MAX_WIDTH,
    DEFAULT_PUBLIC_BASE_URL, DEFAULT_QUALITY, DEFAULT_STORAGE_PATH, DEFAULT_UPLOAD_FOLDER,
};
use crate::storage_types::StorageBackend;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} must be greater than zero")]
    ZeroDimension { name: &'static str },

    #[error("Quality must be in (0, 1], got {0}")]
    InvalidQuality(f32),

    #[error("Decode timeout must be greater than zero")]
    ZeroTimeout,

    #[error("Invalid setting {name}: {reason}")]
    Invalid { name: &'static str, reason: String },
}

/// Settings of one image normalizer instance.
#[derive(Clone, Debug, PartialEq)]
pub struct ProcessorConfig {
    pub max_width: u32,
    pub max_height: u32,
    /// JPEG quality factor in (0, 1].
    pub quality: f32,
    pub decode_timeout: Duration,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        Self {
            max_width: DEFAULT_MAX_WIDTH,
            max_height: DEFAULT_MAX_HEIGHT,
            quality: DEFAULT_QUALITY,
            decode_timeout: DEFAULT_DECODE_TIMEOUT,
        }
    }
}

impl ProcessorConfig {
    pub fn with_max_size(mut self, max_width: u32, max_height: u32) -> Self {
        self.max_width = max_width;
        self.max_height = max_height;
        self
    }

    pub fn with_quality(mut self, quality: f32) -> Self {
        self.quality = quality;
        self
    }

    pub fn with_decode_timeout(mut self, timeout: Duration) -> Self {
        self.decode_timeout = timeout;
        self
    }

    /// Quality mapped onto the 1-100 scale used by JPEG encoders.
    pub fn jpeg_quality(&self) -> u8 {
        (self.quality * 100.0).round().clamp(1.0, 100.0) as u8
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_width == 0 {
            return Err(ConfigError::ZeroDimension { name: "max_width" });
        }
        if self.max_height == 0 {
            return Err(ConfigError::ZeroDimension { name: "max_height" });
        }
        if !(self.quality > 0.0 && self.quality <= 1.0) {
            return Err(ConfigError::InvalidQuality(self.quality));
        }
        if self.decode_timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        Ok(())
    }

    fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_width: env_or("FOLIO_MAX_WIDTH", defaults.max_width),
            max_height: env_or("FOLIO_MAX_HEIGHT", defaults.max_height),
            quality: env_or("FOLIO_QUALITY", defaults.quality),
            decode_timeout: Duration::from_secs(env_or(
                "FOLIO_DECODE_TIMEOUT_SECS",
                defaults.decode_timeout.as_secs(),
            )),
        }
    }
}

/// Upload validation and placement settings.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadConfig {
    pub max_upload_bytes: usize,
    pub allowed_extensions: Vec<String>,
    pub allowed_content_types: Vec<String>,
    /// Folder (key prefix) processed images are stored under.
    pub folder: String,
    pub cache_control: String,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_MB * 1024 * 1024,
            allowed_extensions: DEFAULT_ALLOWED_EXTENSIONS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            allowed_content_types: DEFAULT_ALLOWED_CONTENT_TYPES
                .iter()
                .map(|s| s.to_string())
                .collect(),
            folder: DEFAULT_UPLOAD_FOLDER.to_string(),
            cache_control: DEFAULT_CACHE_CONTROL.to_string(),
        }
    }
}

impl UploadConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid {
                name: "max_upload_bytes",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.folder.contains("..") || self.folder.starts_with('/') {
            return Err(ConfigError::Invalid {
                name: "folder",
                reason: format!("'{}' must be a relative path", self.folder),
            });
        }
        Ok(())
    }

    fn from_env() -> Self {
        let defaults = Self::default();
        let max_upload_mb = env_or("FOLIO_MAX_UPLOAD_MB", DEFAULT_MAX_UPLOAD_MB);
        Self {
            max_upload_bytes: megabytes_to_bytes(max_upload_mb)
                .unwrap_or(defaults.max_upload_bytes),
            folder: env::var("FOLIO_UPLOAD_FOLDER").unwrap_or(defaults.folder.clone()),
            cache_control: env::var("FOLIO_CACHE_CONTROL").unwrap_or(defaults.cache_control.clone()),
            ..defaults
        }
    }
}

/// `None` when the byte count does not fit in `usize`.
fn megabytes_to_bytes(mb: usize) -> Option<usize> {
    mb.checked_mul(1024 * 1024)
}

/// Object storage settings.
#[derive(Clone, Debug, PartialEq)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub local_path: String,
    pub public_base_url: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Local,
            local_path: DEFAULT_STORAGE_PATH.to_string(),
            public_base_url: DEFAULT_PUBLIC_BASE_URL.to_string(),
        }
    }
}

impl StorageConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let backend = match env::var("FOLIO_STORAGE_BACKEND") {
            Ok(value) => StorageBackend::from_str(&value).map_err(|e| ConfigError::Invalid {
                name: "FOLIO_STORAGE_BACKEND",
                reason: e.to_string(),
            })?,
            Err(_) => defaults.backend,
        };
        Ok(Self {
            backend,
            local_path: env::var("FOLIO_STORAGE_PATH").unwrap_or(defaults.local_path),
            public_base_url: env::var("FOLIO_PUBLIC_BASE_URL").unwrap_or(defaults.public_base_url),
        })
    }
}

/// Application configuration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Config {
    pub processor: ProcessorConfig,
    pub upload: UploadConfig,
    pub storage: StorageConfig,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            processor: ProcessorConfig::from_env(),
            upload: UploadConfig::from_env(),
            storage: StorageConfig::from_env()?,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.processor.validate()?;
        self.upload.validate()
    }
}

/// Parse an environment variable, falling back to `default` when it is unset
/// or unparseable.
fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}
