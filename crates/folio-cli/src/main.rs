//! Folio CLI: normalize blog photos and manage stored images.
//!
//! Settings come from FOLIO_* environment variables (a `.env` file is read if
//! present). Command output is JSON on stdout.

use anyhow::Context;
use clap::{Parser, Subcommand};
use folio_cli::{init_tracing, read_source, write_processed, OrientationReport};
use folio_core::Config;
use folio_processing::{read_orientation, ImageNormalizer, ImageUploader, UploadProgress};
use folio_storage::create_storage;
use serde::Serialize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "folio", about = "Blog image normalization and storage")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize an image and write the JPEG to a directory
    Process {
        /// Path to the source image
        file: PathBuf,
        /// Output directory
        #[arg(long, default_value = ".")]
        out_dir: PathBuf,
        /// Maximum output width in pixels
        #[arg(long)]
        max_width: Option<u32>,
        /// Maximum output height in pixels
        #[arg(long)]
        max_height: Option<u32>,
        /// JPEG quality between 0 and 1
        #[arg(long)]
        quality: Option<f32>,
    },
    /// Print the EXIF orientation code of a file
    Orientation {
        /// Path to the image
        file: PathBuf,
    },
    /// Validate, normalize and store an image
    Upload {
        /// Path to the source image
        file: PathBuf,
        /// Storage folder (defaults to FOLIO_UPLOAD_FOLDER)
        #[arg(long)]
        folder: Option<String>,
    },
    /// List stored images, newest first
    List {
        /// Storage folder (defaults to FOLIO_UPLOAD_FOLDER)
        #[arg(long)]
        folder: Option<String>,
    },
    /// Delete a stored image by path
    Delete {
        /// Object path, e.g. posts/cover-1700000000000-abc123.jpg
        path: String,
    },
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize response")?;
    println!("{}", out);
    Ok(())
}

async fn uploader(config: &Config) -> anyhow::Result<ImageUploader> {
    let storage = create_storage(&config.storage)
        .await
        .context("Failed to initialize storage")?;
    Ok(ImageUploader::new(
        ImageNormalizer::new(config.processor.clone()),
        storage,
        config.upload.clone(),
    ))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let cli = Cli::parse();
    let mut config = Config::from_env().context("Failed to load configuration")?;

    match cli.command {
        Commands::Process {
            file,
            out_dir,
            max_width,
            max_height,
            quality,
        } => {
            if let Some(width) = max_width {
                config.processor.max_width = width;
            }
            if let Some(height) = max_height {
                config.processor.max_height = height;
            }
            if let Some(quality) = quality {
                config.processor.quality = quality;
            }
            config.validate().context("Invalid configuration")?;

            let source = read_source(&file).await?;
            let processed = ImageNormalizer::new(config.processor)
                .process(source)
                .await
                .with_context(|| format!("Failed to process {}", file.display()))?;
            let report = write_processed(&processed, &out_dir).await?;
            print_json(&report)?;
        }
        Commands::Orientation { file } => {
            let data = tokio::fs::read(&file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let orientation = read_orientation(&data);
            print_json(&OrientationReport::new(file, orientation))?;
        }
        Commands::Upload { file, folder } => {
            if let Some(folder) = folder {
                config.upload.folder = folder;
            }
            config.validate().context("Invalid configuration")?;

            let uploader = uploader(&config).await?;
            let source = read_source(&file).await?;
            let observer = |p: UploadProgress| {
                tracing::info!(stage = %p.stage, percent = p.percent, "Upload progress");
            };
            let outcome = uploader
                .upload_image(source, Some(&observer))
                .await
                .with_context(|| format!("Failed to upload {}", file.display()))?;
            print_json(&outcome)?;
        }
        Commands::List { folder } => {
            config.validate().context("Invalid configuration")?;
            let uploader = uploader(&config).await?;
            let images = uploader.list_images(folder.as_deref()).await;
            print_json(&images)?;
        }
        Commands::Delete { path } => {
            config.validate().context("Invalid configuration")?;
            let uploader = uploader(&config).await?;
            let deleted = uploader.delete_image(&path).await;
            print_json(&serde_json::json!({ "success": deleted, "path": path }))?;
        }
    }

    Ok(())
}
