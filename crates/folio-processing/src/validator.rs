use folio_core::UploadConfig;
use std::path::Path;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

/// Reasons an upload is refused before any processing happens.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("Empty file")]
    EmptyFile,

    #[error("File too large ({size_mb:.1}MB). Maximum: {max_mb:.0}MB")]
    FileTooLarge { size_mb: f64, max_mb: f64 },

    #[error("Unsupported format: {content_type} ({file_name}). Use: {allowed}")]
    UnsupportedFormat {
        file_name: String,
        content_type: String,
        allowed: String,
    },
}

/// Upload validator
///
/// A file passes when it is non-empty, within the size limit and either its
/// declared content type or its extension is on the allow list.
#[derive(Debug, Clone)]
pub struct MediaValidator {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
}

impl MediaValidator {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions: allowed_extensions
                .into_iter()
                .map(|e| e.to_lowercase())
                .collect(),
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|c| c.to_lowercase())
                .collect(),
        }
    }

    pub fn from_config(config: &UploadConfig) -> Self {
        Self::new(
            config.max_upload_bytes,
            config.allowed_extensions.clone(),
            config.allowed_content_types.clone(),
        )
    }

    /// Validate file size
    pub fn validate_file_size(&self, size: usize) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }

        if size > self.max_file_size {
            return Err(ValidationError::FileTooLarge {
                size_mb: size as f64 / BYTES_PER_MB,
                max_mb: self.max_file_size as f64 / BYTES_PER_MB,
            });
        }

        Ok(())
    }

    /// Accept when either the content type or the extension is allowed.
    pub fn validate_format(&self, file_name: &str, content_type: &str) -> Result<(), ValidationError> {
        let type_ok = self
            .allowed_content_types
            .iter()
            .any(|ct| ct.eq_ignore_ascii_case(content_type.trim()));

        let extension_ok = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
            .is_some_and(|e| self.allowed_extensions.contains(&e));

        if type_ok || extension_ok {
            return Ok(());
        }

        Err(ValidationError::UnsupportedFormat {
            file_name: file_name.to_string(),
            content_type: content_type.to_string(),
            allowed: self
                .allowed_extensions
                .iter()
                .map(|e| e.to_uppercase())
                .collect::<Vec<_>>()
                .join(", "),
        })
    }

    /// Full upload check: emptiness, then format, then size.
    pub fn validate_upload(
        &self,
        file_name: &str,
        content_type: &str,
        size: usize,
    ) -> Result<(), ValidationError> {
        if size == 0 {
            return Err(ValidationError::EmptyFile);
        }
        self.validate_format(file_name, content_type)?;
        self.validate_file_size(size)
    }
}
