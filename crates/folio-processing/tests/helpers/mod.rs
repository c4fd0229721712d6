#![allow(dead_code)]

pub mod decoders;
pub mod fixtures;
pub mod storage;

use folio_core::{ProcessorConfig, SourceImage};

pub fn jpeg_source(data: Vec<u8>, name: &str) -> SourceImage {
    SourceImage::new(data, "image/jpeg", name)
}

pub fn png_source(data: Vec<u8>, name: &str) -> SourceImage {
    SourceImage::new(data, "image/png", name)
}

pub fn test_config() -> ProcessorConfig {
    ProcessorConfig::default()
}
