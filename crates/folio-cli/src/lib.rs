//! Shared helpers for the `folio` binary.

use anyhow::Context;
use folio_core::{ProcessedImage, SourceImage};
use folio_processing::Orientation;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Initialize tracing for CLI binaries.
///
/// Logs go to stderr so stdout stays valid JSON. Set `FOLIO_LOG_FORMAT=json`
/// for structured log lines.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if std::env::var("FOLIO_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json")) {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Media type for a local file, guessed from its extension.
pub fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("heic") => "image/heic",
        Some("heif") => "image/heif",
        _ => "application/octet-stream",
    }
}

/// Read a local file into a [`SourceImage`].
pub async fn read_source(path: &Path) -> anyhow::Result<SourceImage> {
    let data = tokio::fs::read(path)
        .await
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    Ok(SourceImage::new(data, content_type_for(path), file_name))
}

/// Summary printed by `folio process`.
#[derive(Debug, Serialize)]
pub struct ProcessReport {
    pub file_name: String,
    pub path: PathBuf,
    pub content_type: String,
    pub width: u32,
    pub height: u32,
    pub size: usize,
}

/// Write a processed image into `out_dir` under its generated name.
pub async fn write_processed(
    processed: &ProcessedImage,
    out_dir: &Path,
) -> anyhow::Result<ProcessReport> {
    tokio::fs::create_dir_all(out_dir)
        .await
        .with_context(|| format!("Failed to create {}", out_dir.display()))?;

    let path = out_dir.join(&processed.file_name);
    tokio::fs::write(&path, &processed.data)
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;

    Ok(ProcessReport {
        file_name: processed.file_name.clone(),
        path,
        content_type: processed.content_type.clone(),
        width: processed.width,
        height: processed.height,
        size: processed.size(),
    })
}

/// Summary printed by `folio orientation`.
#[derive(Debug, Serialize)]
pub struct OrientationReport {
    pub file: PathBuf,
    pub orientation: Orientation,
    pub known: bool,
    pub swaps_axes: bool,
}

impl OrientationReport {
    pub fn new(file: PathBuf, orientation: Orientation) -> Self {
        Self {
            file,
            orientation,
            known: orientation.is_known(),
            swaps_axes: orientation.swaps_axes(),
        }
    }
}
