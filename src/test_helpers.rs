//! Shared test utilities for the storeicons test suite.
//!
//! Provides synthetic sources, PNG fixtures on disk and a minimal ICO
//! directory reader for asserting on container output.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let source = test_source(512, 512, Some(b"icc".to_vec()));
//! let artifact = render(&source, &target("Logo.png", 44, 44)).unwrap();
//!
//! let entries = read_ico_directory(&std::fs::read(out.join("icon.ico")).unwrap());
//! assert_eq!(entries[0].png_width, 512);
//! ```

use crate::catalog::TargetSpec;
use crate::imaging::SourceImage;
use crate::imaging::rust_backend::encode_png;
use image::{ImageDecoder, ImageReader, Rgba, RgbaImage};
use std::path::Path;

// =========================================================================
// Synthetic sources
// =========================================================================

/// Checkerboard over a diagonal gradient, with a soft alpha ramp at the top.
///
/// Hard block edges make sharpening observable at small sizes.
pub fn test_pixels(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let block = ((x / 32) + (y / 32)) % 2 == 0;
        let base = ((x + y) % 256) as u8;
        let alpha = if y < 4 { 128 } else { 255 };
        if block {
            Rgba([base / 4, 40, 220 - base / 4, alpha])
        } else {
            Rgba([230, 200 - base / 2, base / 2, alpha])
        }
    })
}

pub fn test_source(width: u32, height: u32, icc_profile: Option<Vec<u8>>) -> SourceImage {
    SourceImage::new(test_pixels(width, height), icc_profile)
}

/// Ad-hoc target for tests that don't care about the catalog.
pub fn target(name: &'static str, width: u32, height: u32) -> TargetSpec {
    TargetSpec {
        name,
        width,
        height,
    }
}

// =========================================================================
// On-disk fixtures
// =========================================================================

/// Write a synthetic PNG source, optionally with an embedded ICC profile.
pub fn write_test_png(path: &Path, width: u32, height: u32, icc_profile: Option<Vec<u8>>) {
    let file = std::fs::File::create(path).unwrap();
    encode_png(&test_pixels(width, height), icc_profile.as_deref(), file).unwrap();
}

/// Read the ICC profile embedded in a PNG file, if any.
pub fn read_png_icc(path: &Path) -> Option<Vec<u8>> {
    let mut decoder = ImageReader::open(path)
        .unwrap()
        .with_guessed_format()
        .unwrap()
        .into_decoder()
        .unwrap();
    decoder.icc_profile().unwrap()
}

// =========================================================================
// ICO inspection
// =========================================================================

/// One ICONDIRENTRY plus the dimensions of the PNG payload it points to.
#[derive(Debug, Clone, PartialEq)]
pub struct IcoEntry {
    pub width_byte: u8,
    pub height_byte: u8,
    pub byte_len: u32,
    pub offset: u32,
    pub png_width: u32,
    pub png_height: u32,
}

/// Parse an ICO file's directory and decode each PNG payload's size.
///
/// Panics on anything malformed.
pub fn read_ico_directory(bytes: &[u8]) -> Vec<IcoEntry> {
    let u16_at = |i: usize| u16::from_le_bytes([bytes[i], bytes[i + 1]]);
    let u32_at = |i: usize| u32::from_le_bytes([bytes[i], bytes[i + 1], bytes[i + 2], bytes[i + 3]]);

    assert_eq!(u16_at(0), 0, "reserved field");
    assert_eq!(u16_at(2), 1, "resource type must be icon");
    let count = u16_at(4) as usize;

    (0..count)
        .map(|i| {
            let base = 6 + i * 16;
            let byte_len = u32_at(base + 8);
            let offset = u32_at(base + 12);
            let payload = &bytes[offset as usize..(offset + byte_len) as usize];
            let png = image::load_from_memory_with_format(payload, image::ImageFormat::Png)
                .unwrap_or_else(|e| panic!("ICO entry {i} is not a PNG: {e}"));
            IcoEntry {
                width_byte: bytes[base],
                height_byte: bytes[base + 1],
                byte_len,
                offset,
                png_width: png.width(),
                png_height: png.height(),
            }
        })
        .collect()
}
