//! Render engine: one source image + one target → one finished pixel buffer.
//!
//! ```text
//! SourceImage ──resample (Lanczos3)──▶ exact target size
//!             ──unsharp mask (if max side < 128)──▶ sharpened, or the
//!                                                   unsharpened buffer on failure
//!             ──attach source ICC profile──▶ RenderedArtifact
//! ```
//!
//! Rendering is a pure function of its inputs. The source is never mutated;
//! every call allocates its own buffers, so renders are byte-identical across
//! runs and safe to perform on a worker thread.

use super::calculations::sharpening_for;
use super::params::Sharpening;
use super::sharpen::unsharp_mask;
use crate::catalog::TargetSpec;
use image::RgbaImage;
use image::imageops::FilterType;
use serde::Serialize;
use std::cmp::Reverse;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("source image is empty ({width}x{height})")]
    EmptySource { width: u32, height: u32 },
    #[error("target size {width}x{height} has a zero dimension")]
    ZeroTarget { width: u32, height: u32 },
}

/// A decoded source image: RGBA8 pixels plus its embedded ICC profile, if any.
///
/// The profile travels with the image it came from. Nothing about it is
/// remembered between loads.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pixels: RgbaImage,
    icc_profile: Option<Arc<[u8]>>,
}

impl SourceImage {
    pub fn new(pixels: RgbaImage, icc_profile: Option<Vec<u8>>) -> Self {
        Self {
            pixels,
            icc_profile: icc_profile.map(Arc::from),
        }
    }

    pub fn pixels(&self) -> &RgbaImage {
        &self.pixels
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.pixels.dimensions()
    }

    pub fn icc_profile(&self) -> Option<&[u8]> {
        self.icc_profile.as_deref()
    }
}

/// What happened in the sharpening step.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SharpenOutcome {
    /// Target is large enough that no sharpening applies.
    Skipped,
    Applied { params: Sharpening },
    /// Sharpening failed; the artifact holds the unsharpened resample.
    Failed { params: Sharpening, reason: String },
}

/// The output of one render pass, tagged with the target it was made for.
#[derive(Debug, Clone)]
pub struct RenderedArtifact {
    pub target: TargetSpec,
    pub pixels: RgbaImage,
    pub icc_profile: Option<Arc<[u8]>>,
    pub sharpening: SharpenOutcome,
}

impl RenderedArtifact {
    pub fn icc_profile(&self) -> Option<&[u8]> {
        self.icc_profile.as_deref()
    }
}

/// Resample `source` to exactly `width` x `height` with a Lanczos3 filter.
pub fn resample(source: &SourceImage, width: u32, height: u32) -> Result<RgbaImage, RenderError> {
    let (src_w, src_h) = source.dimensions();
    if src_w == 0 || src_h == 0 {
        return Err(RenderError::EmptySource {
            width: src_w,
            height: src_h,
        });
    }
    if width == 0 || height == 0 {
        return Err(RenderError::ZeroTarget { width, height });
    }
    Ok(image::imageops::resize(
        source.pixels(),
        width,
        height,
        FilterType::Lanczos3,
    ))
}

/// Apply the size-banded sharpening rule to a freshly resampled buffer.
///
/// Never fails: a sharpening error yields the input buffer unchanged.
pub fn sharpen_for_size(resized: RgbaImage) -> (RgbaImage, SharpenOutcome) {
    let max_dimension = resized.width().max(resized.height());
    let Some(params) = sharpening_for(max_dimension) else {
        return (resized, SharpenOutcome::Skipped);
    };
    match unsharp_mask(&resized, params) {
        Ok(sharpened) => (sharpened, SharpenOutcome::Applied { params }),
        Err(e) => (
            resized,
            SharpenOutcome::Failed {
                params,
                reason: e.to_string(),
            },
        ),
    }
}

/// Render one target from one source.
pub fn render(source: &SourceImage, target: &TargetSpec) -> Result<RenderedArtifact, RenderError> {
    let resized = resample(source, target.width, target.height)?;
    let (pixels, sharpening) = sharpen_for_size(resized);
    Ok(RenderedArtifact {
        target: *target,
        pixels,
        icc_profile: source.icc_profile.clone(),
        sharpening,
    })
}

/// Arrange container frames largest first. Equal sizes keep their order.
pub fn order_frames_descending(mut frames: Vec<RenderedArtifact>) -> Vec<RenderedArtifact> {
    frames.sort_by_key(|frame| Reverse(frame.target.max_dimension()));
    frames
}
