//! Image I/O backend trait and shared types.
//!
//! The [`IconBackend`] trait covers everything that touches the filesystem:
//! decoding the source, writing PNG artifacts and writing the multi-size
//! container. Rendering itself is pure and lives in
//! [`render`](super::render), so the orchestration can be tested against a
//! mock backend without encoding a single file.
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend).

use super::render::{RenderedArtifact, SourceImage};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("Encoding failed: {0}")]
    Encode(String),
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image I/O backends.
pub trait IconBackend: Sync {
    /// Read image dimensions without a full decode.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode a source image to RGBA8, keeping its embedded ICC profile.
    fn load(&self, path: &Path) -> Result<SourceImage, BackendError>;

    /// Write one artifact as a maximally compressed PNG.
    fn write_png(&self, artifact: &RenderedArtifact, path: &Path) -> Result<(), BackendError>;

    /// Write all frames into one multi-size container, in the given order.
    fn write_container(&self, frames: &[RenderedArtifact], path: &Path)
    -> Result<(), BackendError>;
}
