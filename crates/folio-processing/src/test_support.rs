//! Builders for synthetic JPEG/PNG inputs used across unit tests.

use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

pub const SOI_BYTES: [u8; 2] = [0xFF, 0xD8];

/// SOI followed by the given raw segments, then a minimal scan and EOI.
pub fn jpeg_with_segments(segments: &[Vec<u8>]) -> Vec<u8> {
    let mut data = SOI_BYTES.to_vec();
    for segment in segments {
        data.extend_from_slice(segment);
    }
    data.extend_from_slice(&[0xFF, 0xDA, 0x00, 0x02, 0x00, 0x00, 0xFF, 0xD9]);
    data
}

/// JFIF APP0 segment.
pub fn app0_segment() -> Vec<u8> {
    let mut segment = vec![0xFF, 0xE0, 0x00, 0x10];
    segment.extend_from_slice(b"JFIF\0");
    segment.extend_from_slice(&[0x01, 0x01, 0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00]);
    segment
}

/// APP1/Exif segment whose IFD0 holds a Make entry and, optionally, an
/// Orientation entry.
pub fn exif_app1(orientation: Option<u16>, little_endian: bool) -> Vec<u8> {
    let u16b = |v: u16| {
        if little_endian {
            v.to_le_bytes()
        } else {
            v.to_be_bytes()
        }
    };
    let u32b = |v: u32| {
        if little_endian {
            v.to_le_bytes()
        } else {
            v.to_be_bytes()
        }
    };

    let mut tiff = Vec::new();
    tiff.extend_from_slice(if little_endian { b"II" } else { b"MM" });
    tiff.extend_from_slice(&u16b(42));
    tiff.extend_from_slice(&u32b(8));

    let count = if orientation.is_some() { 2 } else { 1 };
    tiff.extend_from_slice(&u16b(count));

    // Make, ASCII, 4 bytes inline
    tiff.extend_from_slice(&u16b(0x010F));
    tiff.extend_from_slice(&u16b(2));
    tiff.extend_from_slice(&u32b(4));
    tiff.extend_from_slice(b"Cam\0");

    if let Some(code) = orientation {
        tiff.extend_from_slice(&u16b(0x0112));
        tiff.extend_from_slice(&u16b(3));
        tiff.extend_from_slice(&u32b(1));
        tiff.extend_from_slice(&u16b(code));
        tiff.extend_from_slice(&[0, 0]);
    }
    tiff.extend_from_slice(&u32b(0));

    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(&tiff);
    segment
}

/// Solid-colour image encoded in the given format.
pub fn encoded_image(width: u32, height: u32, format: ImageFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([200, 30, 30]));
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format).unwrap();
    buffer
}

/// Real JPEG with an Exif orientation block spliced in after SOI.
pub fn jpeg_with_orientation(width: u32, height: u32, orientation: u16) -> Vec<u8> {
    let plain = encoded_image(width, height, ImageFormat::Jpeg);
    let mut data = SOI_BYTES.to_vec();
    data.extend_from_slice(&exif_app1(Some(orientation), false));
    data.extend_from_slice(&plain[2..]);
    data
}
