//! Error types module
//!
//! `ProcessingError` is the failure taxonomy of the image pipeline. Orientation
//! metadata problems never show up here: the reader degrades to the default
//! orientation instead of failing.

/// Log level for error reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Debug level - for expected errors like rejected input
    Debug,
    /// Warning level - for failures caused by the file itself
    Warn,
    /// Error level - for unexpected failures
    Error,
}

/// Metadata describing how an error should be reported to a caller.
pub trait ErrorMetadata {
    /// Machine-readable error code (e.g., "DECODE_ERROR")
    fn error_code(&self) -> &'static str;

    /// Whether retrying with different input can succeed
    fn is_recoverable(&self) -> bool;

    /// Log level for this error
    fn log_level(&self) -> LogLevel;

    /// Message safe to show to the person who uploaded the file
    fn client_message(&self) -> String;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProcessingError {
    /// Declared media type is not an image.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Decode failed or did not finish within the bounded wait.
    #[error("Decode error: {0}")]
    Decode(String),

    /// Re-compression produced no output.
    #[error("Encode error: {0}")]
    Encode(String),
}

impl ErrorMetadata for ProcessingError {
    fn error_code(&self) -> &'static str {
        match self {
            ProcessingError::InvalidInput(_) => "INVALID_INPUT",
            ProcessingError::Decode(_) => "DECODE_ERROR",
            ProcessingError::Encode(_) => "ENCODE_ERROR",
        }
    }

    fn is_recoverable(&self) -> bool {
        // A different file may decode; the pipeline itself never retries.
        matches!(self, ProcessingError::Decode(_))
    }

    fn log_level(&self) -> LogLevel {
        match self {
            ProcessingError::InvalidInput(_) => LogLevel::Debug,
            ProcessingError::Decode(_) => LogLevel::Warn,
            ProcessingError::Encode(_) => LogLevel::Error,
        }
    }

    fn client_message(&self) -> String {
        match self {
            ProcessingError::InvalidInput(_) => "The selected file is not an image".to_string(),
            ProcessingError::Decode(_) => {
                "The image could not be loaded. Try another photo.".to_string()
            }
            ProcessingError::Encode(_) => "The image could not be converted".to_string(),
        }
    }
}
