//! EXIF orientation reader
//!
//! Walks the JPEG marker segments at the start of a file looking for the
//! APP1/Exif block and returns the value of the Orientation tag (0x0112).
//! Parsing never fails: anything missing, truncated or malformed resolves to
//! [`Orientation::NORMAL`].

use folio_core::constants::ORIENTATION_SCAN_LIMIT;
use serde::{Deserialize, Serialize};
use std::fmt;

const SOI: u16 = 0xFFD8;
const EOI: u16 = 0xFFD9;
const SOS: u16 = 0xFFDA;
const APP1: u16 = 0xFFE1;
const EXIF_HEADER: &[u8; 6] = b"Exif\0\0";
const TIFF_MAGIC: u16 = 42;
const ORIENTATION_TAG: u16 = 0x0112;
const IFD_ENTRY_LEN: usize = 12;

/// EXIF orientation code.
///
/// 1 = normal, 2 = flip horizontal, 3 = rotate 180, 4 = flip vertical,
/// 5 = transpose, 6 = rotate 90 CW, 7 = transverse, 8 = rotate 90 CCW.
/// Values outside 1-8 read from a file are kept as-is; they map to the
/// identity transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Orientation(pub u16);

impl Orientation {
    pub const NORMAL: Orientation = Orientation(1);

    pub fn code(self) -> u16 {
        self.0
    }

    /// Whether the code is one of the eight defined by EXIF.
    pub fn is_known(self) -> bool {
        (1..=8).contains(&self.0)
    }

    /// Codes 5-8 exchange the image axes.
    pub fn swaps_axes(self) -> bool {
        (5..=8).contains(&self.0)
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Read the orientation code from the leading bytes of an image.
pub fn read_orientation(data: &[u8]) -> Orientation {
    let prefix = &data[..data.len().min(ORIENTATION_SCAN_LIMIT)];
    match scan_segments(prefix) {
        Some(code) => Orientation(code),
        None => Orientation::NORMAL,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ByteOrder {
    Little,
    Big,
}

impl ByteOrder {
    fn u16_at(self, buf: &[u8], offset: usize) -> Option<u16> {
        let bytes: [u8; 2] = buf.get(offset..offset.checked_add(2)?)?.try_into().ok()?;
        Some(match self {
            ByteOrder::Little => u16::from_le_bytes(bytes),
            ByteOrder::Big => u16::from_be_bytes(bytes),
        })
    }

    fn u32_at(self, buf: &[u8], offset: usize) -> Option<u32> {
        let bytes: [u8; 4] = buf.get(offset..offset.checked_add(4)?)?.try_into().ok()?;
        Some(match self {
            ByteOrder::Little => u32::from_le_bytes(bytes),
            ByteOrder::Big => u32::from_be_bytes(bytes),
        })
    }
}

/// Outcome of inspecting one APP1 segment.
enum App1 {
    Found(u16),
    /// Not an Exif block (e.g. XMP) or no orientation tag in IFD0.
    Skip,
    /// Offsets point outside the buffer.
    Abort,
}

fn scan_segments(buf: &[u8]) -> Option<u16> {
    if ByteOrder::Big.u16_at(buf, 0)? != SOI {
        return None;
    }

    let mut offset = 2usize;
    while offset < buf.len() {
        let marker = ByteOrder::Big.u16_at(buf, offset)?;
        if marker & 0xFF00 != 0xFF00 {
            // Entropy-coded data or garbage: no more marker segments.
            return None;
        }
        if marker == SOS || marker == EOI {
            return None;
        }

        let length = ByteOrder::Big.u16_at(buf, offset + 2)? as usize;
        if length < 2 {
            return None;
        }

        if marker == APP1 {
            let start = offset + 4;
            let end = (offset + 2 + length).min(buf.len());
            let payload = buf.get(start..end)?;
            match parse_exif(payload) {
                App1::Found(code) => return Some(code),
                App1::Skip => {}
                App1::Abort => return None,
            }
        }

        offset += 2 + length;
    }

    None
}

fn parse_exif(payload: &[u8]) -> App1 {
    if !payload.starts_with(EXIF_HEADER) {
        return App1::Skip;
    }
    let tiff = &payload[EXIF_HEADER.len()..];

    let order = match tiff.get(..2) {
        Some(b"II") => ByteOrder::Little,
        Some(b"MM") => ByteOrder::Big,
        Some(_) => return App1::Skip,
        None => return App1::Abort,
    };

    match find_orientation(tiff, order) {
        Some(Some(code)) => App1::Found(code),
        Some(None) => App1::Skip,
        None => App1::Abort,
    }
}

/// `None` when a read falls outside the TIFF block, `Some(None)` when IFD0 has
/// no orientation entry.
fn find_orientation(tiff: &[u8], order: ByteOrder) -> Option<Option<u16>> {
    if order.u16_at(tiff, 2)? != TIFF_MAGIC {
        return Some(None);
    }

    let ifd = order.u32_at(tiff, 4)? as usize;
    let count = order.u16_at(tiff, ifd)? as usize;

    for i in 0..count {
        let entry = ifd + 2 + i * IFD_ENTRY_LEN;
        if order.u16_at(tiff, entry)? == ORIENTATION_TAG {
            // SHORT values are left-justified in the 4-byte value field.
            return Some(Some(order.u16_at(tiff, entry + 8)?));
        }
    }

    Some(None)
}
