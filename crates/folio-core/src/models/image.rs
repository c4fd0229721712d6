use bytes::Bytes;
use std::path::Path;

use crate::constants::OUTPUT_CONTENT_TYPE;

/// A raw upload as received from the caller: bytes, declared media type and
/// original file name. Owned by the call that processes it.
#[derive(Clone, Debug)]
pub struct SourceImage {
    pub data: Bytes,
    pub content_type: String,
    pub file_name: String,
}

impl SourceImage {
    pub fn new(
        data: impl Into<Bytes>,
        content_type: impl Into<String>,
        file_name: impl Into<String>,
    ) -> Self {
        Self {
            data: data.into(),
            content_type: content_type.into(),
            file_name: file_name.into(),
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Lowercased extension of the original file name, if any.
    pub fn extension(&self) -> Option<String> {
        Path::new(&self.file_name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_lowercase())
    }

    /// Whether the declared media type claims an image. The `image/` prefix
    /// is matched case-sensitively.
    pub fn declares_image(&self) -> bool {
        self.content_type.starts_with("image/")
    }

    /// HEIC/HEIF containers, detected by declared type or extension.
    pub fn is_heic(&self) -> bool {
        let content_type = self.content_type.to_lowercase();
        matches!(content_type.as_str(), "image/heic" | "image/heif")
            || matches!(self.extension().as_deref(), Some("heic") | Some("heif"))
    }
}

/// A re-encoded image ready to be handed to storage.
#[derive(Clone, Debug)]
pub struct ProcessedImage {
    pub data: Bytes,
    pub file_name: String,
    pub content_type: String,
    pub width: u32,
    pub height: u32,
}

impl ProcessedImage {
    pub fn new(data: Bytes, file_name: String, width: u32, height: u32) -> Self {
        Self {
            data,
            file_name,
            content_type: OUTPUT_CONTENT_TYPE.to_string(),
            width,
            height,
        }
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }
}
