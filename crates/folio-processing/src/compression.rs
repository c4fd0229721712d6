use anyhow::{anyhow, Result};
use bytes::Bytes;
use image::codecs::jpeg::JpegEncoder;
use image::{ExtendedColorType, RgbImage};

/// Baseline JPEG encoder for normalized output.
#[derive(Debug, Clone, Copy)]
pub struct JpegCompressor {
    quality: u8,
}

impl JpegCompressor {
    /// `quality` is the JPEG scale 1-100; out-of-range values are clamped.
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    pub fn quality(&self) -> u8 {
        self.quality
    }

    /// Encode an RGB surface. Fails when the encoder errors or writes nothing.
    pub fn encode(&self, img: &RgbImage) -> Result<Bytes> {
        let (width, height) = img.dimensions();
        let mut buffer = Vec::new();

        JpegEncoder::new_with_quality(&mut buffer, self.quality).encode(
            img.as_raw(),
            width,
            height,
            ExtendedColorType::Rgb8,
        )?;

        if buffer.is_empty() {
            return Err(anyhow!("JPEG encoder produced no output"));
        }

        tracing::debug!(
            width,
            height,
            quality = self.quality,
            size_bytes = buffer.len(),
            "Encoded JPEG"
        );
        Ok(Bytes::from(buffer))
    }
}
