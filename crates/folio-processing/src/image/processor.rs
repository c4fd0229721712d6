//! Image normalizer - decode, orient, downscale, re-encode, rename

use super::decode::{HandleTracker, ImageCrateDecoder, ImageDecoder};
use super::orientation::{read_orientation, Orientation};
use super::resize::{Dimensions, ImageResize};
use super::transform::{fit_oriented, render_oriented};
use crate::compression::JpegCompressor;
use crate::naming::generate_file_name;
use folio_core::{ProcessedImage, ProcessingError, ProcessorConfig, SourceImage};
use image::{DynamicImage, GenericImageView};

/// Turns an uploaded photo into an upright, bounded-size JPEG.
///
/// Each call works on its own input; the only state shared between calls is
/// the decode handle counter.
pub struct ImageNormalizer<D: ImageDecoder = ImageCrateDecoder> {
    config: ProcessorConfig,
    decoder: D,
    handles: HandleTracker,
}

impl ImageNormalizer<ImageCrateDecoder> {
    pub fn new(config: ProcessorConfig) -> Self {
        Self::with_decoder(config, ImageCrateDecoder)
    }
}

impl<D: ImageDecoder> ImageNormalizer<D> {
    pub fn with_decoder(config: ProcessorConfig, decoder: D) -> Self {
        Self {
            config,
            decoder,
            handles: HandleTracker::new(),
        }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Tracker for decode handles; `open_count()` is zero whenever no call is
    /// in flight.
    pub fn handles(&self) -> &HandleTracker {
        &self.handles
    }

    #[tracing::instrument(
        skip(self, source),
        fields(
            file_name = %source.file_name,
            content_type = %source.content_type,
            size_bytes = source.size()
        )
    )]
    pub async fn process(&self, source: SourceImage) -> Result<ProcessedImage, ProcessingError> {
        if !source.declares_image() {
            tracing::debug!("Rejected non-image input");
            return Err(ProcessingError::InvalidInput(format!(
                "{} is not an image type",
                source.content_type
            )));
        }

        if source.is_heic() {
            tracing::info!("HEIC/HEIF input passed through to decoder");
        }

        let (decoded, orientation) = tokio::join!(
            self.decode(&source),
            async { read_orientation(&source.data) }
        );
        let decoded = decoded?;

        let original = Dimensions::new(decoded.width(), decoded.height());
        let (target, surface) = fit_oriented(
            orientation,
            original,
            self.config.max_width,
            self.config.max_height,
        );
        tracing::debug!(
            orientation = %orientation,
            original_width = original.width,
            original_height = original.height,
            width = surface.width,
            height = surface.height,
            "Computed output dimensions"
        );

        let compressor = JpegCompressor::new(self.config.jpeg_quality());
        let data = tokio::task::spawn_blocking(move || {
            let pixels = render(decoded, target, orientation);
            compressor.encode(&pixels)
        })
        .await
        .map_err(|e| ProcessingError::Encode(format!("render task failed: {}", e)))?
        .map_err(|e| ProcessingError::Encode(e.to_string()))?;

        let file_name = generate_file_name(&source.file_name);
        tracing::info!(
            output_name = %file_name,
            output_bytes = data.len(),
            width = surface.width,
            height = surface.height,
            "Image normalized"
        );

        Ok(ProcessedImage::new(
            data,
            file_name,
            surface.width,
            surface.height,
        ))
    }

    /// Decode under the configured time bound. The handle is dropped before
    /// this returns, whichever way it returns.
    async fn decode(&self, source: &SourceImage) -> Result<DynamicImage, ProcessingError> {
        let handle = self.handles.acquire(source.data.clone());
        let outcome =
            tokio::time::timeout(self.config.decode_timeout, self.decoder.decode(handle.data()))
                .await;
        drop(handle);

        match outcome {
            Ok(Ok(img)) => Ok(img),
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Image decode failed");
                Err(ProcessingError::Decode(e.to_string()))
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = self.config.decode_timeout.as_secs_f64(),
                    "Image decode timed out"
                );
                Err(ProcessingError::Decode(format!(
                    "decode did not finish within {:?}",
                    self.config.decode_timeout
                )))
            }
        }
    }
}

/// Scale to the draw size, then draw through the orientation transform.
fn render(img: DynamicImage, target: Dimensions, orientation: Orientation) -> image::RgbImage {
    let scaled = ImageResize::scale_to(img.to_rgb8(), target);
    render_oriented(scaled, orientation)
}
