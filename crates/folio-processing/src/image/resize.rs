use image::imageops::{self, FilterType};
use image::RgbImage;
use serde::Serialize;

/// Pixel dimensions of an image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

impl Dimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Largest size within `max_width` x `max_height` keeping the aspect ratio.
    ///
    /// Images already inside the box are returned unchanged; there is no upscaling.
    pub fn fit_within(self, max_width: u32, max_height: u32) -> Self {
        if self.width <= max_width && self.height <= max_height {
            return self;
        }

        let ratio = (max_width as f64 / self.width as f64)
            .min(max_height as f64 / self.height as f64);

        Self {
            width: ((self.width as f64 * ratio).round() as u32).max(1),
            height: ((self.height as f64 * ratio).round() as u32).max(1),
        }
    }

    /// Same dimensions with the axes exchanged.
    pub fn transposed(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }
}

/// Image resize operations
pub struct ImageResize;

impl ImageResize {
    /// Select appropriate filter type based on resize ratio
    pub fn select_filter(
        orig_width: u32,
        orig_height: u32,
        new_width: u32,
        new_height: u32,
    ) -> FilterType {
        let width_ratio = orig_width as f32 / new_width as f32;
        let height_ratio = orig_height as f32 / new_height as f32;
        let max_ratio = width_ratio.max(height_ratio);

        if max_ratio > 2.0 {
            FilterType::Triangle
        } else if max_ratio > 1.5 {
            FilterType::CatmullRom
        } else {
            FilterType::Lanczos3
        }
    }

    /// Scale pixels to exactly `target`. Returns the input untouched when the
    /// size already matches.
    pub fn scale_to(img: RgbImage, target: Dimensions) -> RgbImage {
        let (orig_width, orig_height) = img.dimensions();
        if (orig_width, orig_height) == (target.width, target.height) {
            return img;
        }

        let filter = Self::select_filter(orig_width, orig_height, target.width, target.height);
        tracing::debug!(
            from_width = orig_width,
            from_height = orig_height,
            to_width = target.width,
            to_height = target.height,
            filter = ?filter,
            "Scaling image"
        );
        imageops::resize(&img, target.width, target.height, filter)
    }
}
