use async_trait::async_trait;
use bytes::Bytes;
use folio_processing::{ImageCrateDecoder, ImageDecoder};
use image::DynamicImage;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Delegates to the real decoder and counts calls.
#[derive(Clone, Default)]
pub struct CountingDecoder {
    calls: Arc<AtomicUsize>,
}

impl CountingDecoder {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageDecoder for CountingDecoder {
    async fn decode(&self, data: Bytes) -> anyhow::Result<DynamicImage> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        ImageCrateDecoder.decode(data).await
    }
}

/// Never finishes.
pub struct StalledDecoder;

#[async_trait]
impl ImageDecoder for StalledDecoder {
    async fn decode(&self, _data: Bytes) -> anyhow::Result<DynamicImage> {
        std::future::pending::<anyhow::Result<DynamicImage>>().await
    }
}

/// Always fails.
pub struct FailingDecoder;

#[async_trait]
impl ImageDecoder for FailingDecoder {
    async fn decode(&self, _data: Bytes) -> anyhow::Result<DynamicImage> {
        anyhow::bail!("unsupported codec")
    }
}
