//! Image decoding
//!
//! [`ImageDecoder`] is the seam between the normalizer and the codec. Every
//! decode attempt holds a [`DecodeHandle`] from a [`HandleTracker`]; the handle
//! is released when it is dropped, so success, failure and timeout all free it.
//!
//! The count tracks handles the normalizer holds for in-flight decodes. It does
//! not track the `Bytes` clones handed to a decoder: after a timeout a blocking
//! decode may still own its clone until it finishes, with the count already
//! back at zero.

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, ImageReader};
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Turns encoded bytes into a pixel buffer.
#[async_trait]
pub trait ImageDecoder: Send + Sync {
    async fn decode(&self, data: Bytes) -> anyhow::Result<DynamicImage>;
}

/// Decoder backed by the `image` crate. Format is sniffed from the bytes, not
/// from the declared media type.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateDecoder;

#[async_trait]
impl ImageDecoder for ImageCrateDecoder {
    async fn decode(&self, data: Bytes) -> anyhow::Result<DynamicImage> {
        // CPU-bound; keep it off the async workers.
        tokio::task::spawn_blocking(move || -> anyhow::Result<DynamicImage> {
            let reader = ImageReader::new(Cursor::new(data.as_ref())).with_guessed_format()?;
            Ok(reader.decode()?)
        })
        .await?
    }
}

/// Counts decode handles that are currently open. Buffers obtained through
/// [`DecodeHandle::data`] are not counted.
#[derive(Debug, Clone, Default)]
pub struct HandleTracker {
    open: Arc<AtomicUsize>,
}

impl HandleTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a handle over `data` for one decode attempt.
    pub fn acquire(&self, data: Bytes) -> DecodeHandle {
        self.open.fetch_add(1, Ordering::SeqCst);
        DecodeHandle {
            data,
            open: Arc::clone(&self.open),
        }
    }

    pub fn open_count(&self) -> usize {
        self.open.load(Ordering::SeqCst)
    }
}

/// Shared view of the input bytes held for the duration of one decode.
#[derive(Debug)]
pub struct DecodeHandle {
    data: Bytes,
    open: Arc<AtomicUsize>,
}

impl DecodeHandle {
    /// A cheap clone of the input. It may outlive the handle.
    pub fn data(&self) -> Bytes {
        self.data.clone()
    }
}

impl Drop for DecodeHandle {
    fn drop(&mut self) {
        self.open.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::encoded_image;
    use image::{GenericImageView, ImageFormat};

    #[test]
    fn test_handles_are_released_on_drop() {
        let tracker = HandleTracker::new();
        let first = tracker.acquire(Bytes::from_static(b"a"));
        let second = tracker.acquire(Bytes::from_static(b"b"));
        assert_eq!(&first.data()[..], b"a");
        assert_eq!(tracker.open_count(), 2);

        drop(first);
        assert_eq!(tracker.open_count(), 1);
        drop(second);
        assert_eq!(tracker.open_count(), 0);
    }

    #[test]
    fn test_buffer_outliving_handle_is_not_counted() {
        let tracker = HandleTracker::new();
        let handle = tracker.acquire(Bytes::from_static(b"jpeg bytes"));
        let retained = handle.data();

        drop(handle);
        assert_eq!(tracker.open_count(), 0);
        assert_eq!(&retained[..], b"jpeg bytes");
    }

    #[test]
    fn test_cloned_tracker_shares_count() {
        let tracker = HandleTracker::new();
        let clone = tracker.clone();
        let _handle = clone.acquire(Bytes::new());
        assert_eq!(tracker.open_count(), 1);
    }

    #[tokio::test]
    async fn test_decodes_png_and_jpeg() {
        let decoder = ImageCrateDecoder;

        let png = decoder
            .decode(Bytes::from(encoded_image(12, 7, ImageFormat::Png)))
            .await
            .unwrap();
        assert_eq!(png.dimensions(), (12, 7));

        let jpeg = decoder
            .decode(Bytes::from(encoded_image(16, 9, ImageFormat::Jpeg)))
            .await
            .unwrap();
        assert_eq!(jpeg.dimensions(), (16, 9));
    }

    #[tokio::test]
    async fn test_garbage_fails_to_decode() {
        let result = ImageCrateDecoder
            .decode(Bytes::from_static(b"definitely not an image"))
            .await;
        assert!(result.is_err());
    }
}
