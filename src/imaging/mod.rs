//! Image processing — pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::image_dimensions` |
//! | **Decode + ICC** | `image::ImageReader` → `ImageDecoder::icc_profile` |
//! | **Resample** | `image::imageops::resize` with `Lanczos3` |
//! | **Sharpen** | Gaussian blur (`image::imageops::blur`) + banded unsharp mask |
//! | **Encode → PNG** | `PngEncoder`, best compression, ICC attached |
//! | **Encode → ICO** | PNG-compressed frames in an ICONDIR container |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for ratio maths and band lookup (unit testable)
//! - **Parameters**: Sharpening parameters and the banded rule table
//! - **Render**: The render engine — resample, sharpen, carry the ICC profile
//! - **Backend**: [`IconBackend`] trait + [`RustBackend`] for all file I/O

pub mod backend;
mod calculations;
pub mod ico;
mod params;
pub mod render;
pub mod rust_backend;
mod sharpen;

pub use backend::{BackendError, Dimensions, IconBackend};
pub use calculations::{aspect_ratio, sharpening_for};
pub use params::{SHARPEN_BANDS, SHARPEN_LIMIT, SharpenBand, Sharpening};
pub use render::{
    RenderError, RenderedArtifact, SharpenOutcome, SourceImage, order_frames_descending, render,
    resample,
};
pub use rust_backend::RustBackend;
pub use sharpen::{SharpenError, unsharp_mask};
