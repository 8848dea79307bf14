//! Unsharp mask with radius, amount and threshold.
//!
//! `image::imageops::unsharpen` always adds back 100% of the difference, which
//! is far too strong for 16 px icons. This variant scales the difference by
//! `amount` percent and leaves the alpha channel untouched.

use super::params::Sharpening;
use image::RgbaImage;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SharpenError {
    #[error("invalid sharpening radius {0}")]
    InvalidRadius(f32),
    #[error("cannot sharpen an empty image")]
    EmptyImage,
    #[error("blurred copy is {got:?}, expected {expected:?}")]
    DimensionMismatch {
        expected: (u32, u32),
        got: (u32, u32),
    },
}

/// Sharpen `image` into a new buffer.
///
/// For every color channel: `diff = original - blurred`; channels with
/// `|diff| >= threshold` become `original + diff * amount / 100`, clamped to
/// `0..=255`.
pub fn unsharp_mask(image: &RgbaImage, params: Sharpening) -> Result<RgbaImage, SharpenError> {
    if !params.radius.is_finite() || params.radius <= 0.0 {
        return Err(SharpenError::InvalidRadius(params.radius));
    }
    if image.width() == 0 || image.height() == 0 {
        return Err(SharpenError::EmptyImage);
    }

    let blurred = image::imageops::blur(image, params.radius);
    if blurred.dimensions() != image.dimensions() {
        return Err(SharpenError::DimensionMismatch {
            expected: image.dimensions(),
            got: blurred.dimensions(),
        });
    }

    let amount = params.amount as f32 / 100.0;
    let threshold = i32::from(params.threshold);
    let mut sharpened = image.clone();

    for (pixel, soft) in sharpened.pixels_mut().zip(blurred.pixels()) {
        for c in 0..3 {
            let diff = i32::from(pixel[c]) - i32::from(soft[c]);
            if diff.abs() >= threshold {
                let value = f32::from(pixel[c]) + diff as f32 * amount;
                pixel[c] = value.round().clamp(0.0, 255.0) as u8;
            }
        }
    }

    Ok(sharpened)
}
