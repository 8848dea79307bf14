//! Multi-size ICO container writer.
//!
//! Layout (all integers little-endian):
//!
//! ```text
//! ICONDIR        reserved u16 = 0 | type u16 = 1 | count u16
//! ICONDIRENTRY×n width u8 | height u8 | colors u8 = 0 | reserved u8 = 0
//!                planes u16 = 1 | bit_count u16 = 32 | bytes u32 | offset u32
//! payload×n      PNG stream per frame
//! ```
//!
//! Width/height bytes hold `0` for sides of 256 px and up; readers take the real
//! size from the PNG header. That is the only way a 512 px frame fits.
//!
//! Directory order is exactly the order of the frames passed in. Callers
//! sort frames largest first so the first entry is the default frame.

use super::backend::BackendError;
use super::render::RenderedArtifact;
use super::rust_backend::encode_png;
use std::io::Write;

const HEADER_LEN: usize = 6;
const ENTRY_LEN: usize = 16;

/// Size byte for an ICONDIRENTRY: `0` means "256 or more".
fn size_byte(side: u32) -> u8 {
    if side >= 256 { 0 } else { side as u8 }
}

/// Encode frames into ICO bytes, one PNG payload each, preserving order.
pub fn encode_ico(frames: &[RenderedArtifact]) -> Result<Vec<u8>, BackendError> {
    if frames.is_empty() {
        return Err(BackendError::Encode(
            "No frames provided for ICO generation".to_string(),
        ));
    }
    let count = u16::try_from(frames.len())
        .map_err(|_| BackendError::Encode(format!("Too many ICO frames: {}", frames.len())))?;

    let mut payloads = Vec::with_capacity(frames.len());
    for frame in frames {
        let mut png = Vec::new();
        encode_png(&frame.pixels, None, &mut png)?;
        payloads.push(png);
    }

    let data_start = HEADER_LEN + ENTRY_LEN * frames.len();
    let total = data_start + payloads.iter().map(Vec::len).sum::<usize>();
    let mut out = Vec::with_capacity(total);

    out.write_all(&0u16.to_le_bytes())?;
    out.write_all(&1u16.to_le_bytes())?;
    out.write_all(&count.to_le_bytes())?;

    let mut offset = data_start;
    for (frame, png) in frames.iter().zip(&payloads) {
        let len = u32::try_from(png.len())
            .map_err(|_| BackendError::Encode("ICO frame exceeds 4 GiB".to_string()))?;
        let at = u32::try_from(offset)
            .map_err(|_| BackendError::Encode("ICO file exceeds 4 GiB".to_string()))?;

        out.write_all(&[
            size_byte(frame.pixels.width()),
            size_byte(frame.pixels.height()),
            0,
            0,
        ])?;
        out.write_all(&1u16.to_le_bytes())?;
        out.write_all(&32u16.to_le_bytes())?;
        out.write_all(&len.to_le_bytes())?;
        out.write_all(&at.to_le_bytes())?;
        offset += png.len();
    }

    for png in &payloads {
        out.write_all(png)?;
    }

    Ok(out)
}
