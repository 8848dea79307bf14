//! Pure Rust I/O backend built on the `image` crate.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::image_dimensions` |
//! | Decode (PNG, JPEG, BMP, GIF, TIFF, WebP, ICO) | `ImageReader::into_decoder` → `DynamicImage::from_decoder` |
//! | ICC profile | `ImageDecoder::icc_profile` / `ImageEncoder::set_icc_profile` |
//! | Encode → PNG | `PngEncoder` with `CompressionType::Best` + adaptive filtering |
//! | Encode → ICO | [`encode_ico`](super::ico::encode_ico) (PNG frames) |

use super::backend::{BackendError, Dimensions, IconBackend};
use super::ico::encode_ico;
use super::render::{RenderedArtifact, SourceImage};
use image::codecs::png::{CompressionType, FilterType as PngFilter, PngEncoder};
use image::{DynamicImage, ExtendedColorType, ImageDecoder, ImageEncoder, ImageReader, RgbaImage};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Extensions offered when picking a source image.
pub const SOURCE_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "bmp", "gif", "tif", "tiff", "webp", "ico",
];

/// Pure Rust backend using the `image` crate.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, reason: impl ToString) -> BackendError {
    BackendError::Decode {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

/// Encode RGBA8 pixels as PNG at maximum compression, attaching `icc_profile`.
pub(crate) fn encode_png<W: Write>(
    pixels: &RgbaImage,
    icc_profile: Option<&[u8]>,
    writer: W,
) -> Result<(), BackendError> {
    let mut encoder =
        PngEncoder::new_with_quality(writer, CompressionType::Best, PngFilter::Adaptive);
    if let Some(profile) = icc_profile {
        encoder
            .set_icc_profile(profile.to_vec())
            .map_err(|e| BackendError::Encode(format!("ICC profile rejected: {e}")))?;
    }
    encoder
        .write_image(
            pixels.as_raw(),
            pixels.width(),
            pixels.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| BackendError::Encode(format!("PNG encode failed: {e}")))
}

impl IconBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) =
            image::image_dimensions(path).map_err(|e| decode_error(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn load(&self, path: &Path) -> Result<SourceImage, BackendError> {
        let reader = ImageReader::open(path)
            .and_then(|r| r.with_guessed_format())
            .map_err(|e| decode_error(path, e))?;
        let mut decoder = reader.into_decoder().map_err(|e| decode_error(path, e))?;
        // A malformed profile chunk is not worth failing the load over.
        let icc_profile = decoder.icc_profile().ok().flatten();
        let image = DynamicImage::from_decoder(decoder).map_err(|e| decode_error(path, e))?;
        Ok(SourceImage::new(image.to_rgba8(), icc_profile))
    }

    fn write_png(&self, artifact: &RenderedArtifact, path: &Path) -> Result<(), BackendError> {
        let mut writer = BufWriter::new(File::create(path)?);
        encode_png(&artifact.pixels, artifact.icc_profile(), &mut writer)?;
        writer.flush()?;
        Ok(())
    }

    fn write_container(
        &self,
        frames: &[RenderedArtifact],
        path: &Path,
    ) -> Result<(), BackendError> {
        let bytes = encode_ico(frames)?;
        std::fs::write(path, bytes)?;
        Ok(())
    }
}
