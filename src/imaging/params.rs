//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. The render engine
//! picks them from the tables below; [`sharpen`](super::sharpen) applies them.
//!
//! ## Types
//!
//! - [`Sharpening`] — Unsharp-mask parameters (radius, amount %, threshold).
//! - [`SharpenBand`] — One inclusive size range of the banded sharpening table.
//!
//! ## Sharpening bands
//!
//! Lanczos downsampling softens small icons. The smaller the output, the
//! stronger the compensating unsharp mask:
//!
//! ```text
//! max(w, h)    radius  amount  threshold
//! 1..=32       0.6     70%     3
//! 33..=64      0.5     50%     3
//! 65..=127     0.4     35%     3
//! >= 128       (none)
//! ```

/// Targets whose larger side reaches this size are never sharpened.
pub const SHARPEN_LIMIT: u32 = 128;

/// Unsharp-mask parameters.
///
/// - `radius`: Gaussian blur standard deviation in pixels
/// - `amount`: Strength in percent of the (original − blurred) difference added back
/// - `threshold`: Minimum per-channel difference before a pixel is touched
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
pub struct Sharpening {
    pub radius: f32,
    pub amount: u32,
    pub threshold: u8,
}

impl Sharpening {
    pub const fn new(radius: f32, amount: u32, threshold: u8) -> Self {
        Self {
            radius,
            amount,
            threshold,
        }
    }
}

/// An inclusive `min..=max` range of target sizes sharing one [`Sharpening`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SharpenBand {
    pub min: u32,
    pub max: u32,
    pub params: Sharpening,
}

impl SharpenBand {
    pub fn contains(&self, size: u32) -> bool {
        (self.min..=self.max).contains(&size)
    }
}

/// Size-banded sharpening rules. The first band containing the size wins.
pub const SHARPEN_BANDS: &[SharpenBand] = &[
    SharpenBand {
        min: 1,
        max: 32,
        params: Sharpening::new(0.6, 70, 3),
    },
    SharpenBand {
        min: 33,
        max: 64,
        params: Sharpening::new(0.5, 50, 3),
    },
    SharpenBand {
        min: 65,
        max: SHARPEN_LIMIT - 1,
        params: Sharpening::new(0.4, 35, 3),
    },
];
