use image::{ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

/// Image whose left half is red and right half is blue.
pub fn split_image(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, _| {
        if x < width / 2 {
            Rgb([230, 20, 20])
        } else {
            Rgb([20, 20, 230])
        }
    })
}

pub fn encode(img: &RgbImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Vec::new();
    img.write_to(&mut Cursor::new(&mut buffer), format)
        .expect("encode fixture");
    buffer
}

pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(&split_image(width, height), ImageFormat::Png)
}

pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    encode(&split_image(width, height), ImageFormat::Jpeg)
}

/// Big-endian APP1/Exif segment carrying only an orientation entry.
pub fn orientation_segment(code: u16) -> Vec<u8> {
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"MM");
    tiff.extend_from_slice(&42u16.to_be_bytes());
    tiff.extend_from_slice(&8u32.to_be_bytes());
    tiff.extend_from_slice(&1u16.to_be_bytes());
    tiff.extend_from_slice(&0x0112u16.to_be_bytes());
    tiff.extend_from_slice(&3u16.to_be_bytes());
    tiff.extend_from_slice(&1u32.to_be_bytes());
    tiff.extend_from_slice(&code.to_be_bytes());
    tiff.extend_from_slice(&[0, 0]);
    tiff.extend_from_slice(&0u32.to_be_bytes());

    let mut segment = vec![0xFF, 0xE1];
    segment.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    segment.extend_from_slice(b"Exif\0\0");
    segment.extend_from_slice(&tiff);
    segment
}

/// Real JPEG tagged with the given orientation.
pub fn oriented_jpeg(width: u32, height: u32, code: u16) -> Vec<u8> {
    let plain = jpeg_bytes(width, height);
    let mut data = plain[..2].to_vec();
    data.extend_from_slice(&orientation_segment(code));
    data.extend_from_slice(&plain[2..]);
    data
}
