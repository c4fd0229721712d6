//! Types for the upload pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Step an upload has reached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadStage {
    Processing,
    Uploading,
    Complete,
}

impl UploadStage {
    /// Fixed completion percentage reported when the stage starts.
    pub fn percent(self) -> u8 {
        match self {
            UploadStage::Processing => 10,
            UploadStage::Uploading => 50,
            UploadStage::Complete => 100,
        }
    }
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadStage::Processing => write!(f, "processing"),
            UploadStage::Uploading => write!(f, "uploading"),
            UploadStage::Complete => write!(f, "complete"),
        }
    }
}

/// Progress notification passed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadProgress {
    pub stage: UploadStage,
    pub percent: u8,
}

impl From<UploadStage> for UploadProgress {
    fn from(stage: UploadStage) -> Self {
        Self {
            stage,
            percent: stage.percent(),
        }
    }
}

/// Result of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadOutcome {
    pub success: bool,
    pub url: String,
    pub path: String,
    /// Size of the stored JPEG in bytes.
    pub size: usize,
    pub file_name: String,
    pub width: u32,
    pub height: u32,
}
