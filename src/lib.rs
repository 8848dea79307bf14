//! # Store Icons
//!
//! Turns one source image into the icon set a Microsoft Store app package
//! needs: square logos at every scale, wide logos, or a single multi-size
//! `.ico`.
//!
//! # Architecture: One Sequential Run
//!
//! ```text
//! source image ─▶ aspect check ─▶ for each catalog target:
//!                                    resample (Lanczos3)
//!                                    sharpen (max side < 128)
//!                                    write PNG  ──or──  collect ICO frame
//!                                 ─▶ write icon.ico (largest frame first)
//! ```
//!
//! Targets are rendered one at a time on a single worker thread. The caller's
//! thread only consumes progress events, so it stays responsive without
//! any shared mutable state.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`catalog`] | Fixed target lists per variant class: names and exact sizes |
//! | [`validation`] | Aspect-ratio policy: pass, warn, or block a source |
//! | [`imaging`] | Render engine, sharpening bands, PNG/ICO writers behind a backend trait |
//! | [`generate`] | One generation run, progress events, failure policy, worker thread |
//! | [`config`] | `preferences.toml`: last directories and variant |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Fixed Catalog
//!
//! Output names and sizes are constants, not configuration. The Store
//! manifest references these exact file names, so there is nothing useful to
//! tune.
//!
//! ## Sharpen Only Small Outputs
//!
//! Lanczos downscaling softens edges most at the smallest sizes. An unsharp
//! mask is applied below 128 px with strength rising as size falls (see
//! [`imaging::SHARPEN_BANDS`]). Larger outputs are left as resampled.
//!
//! ## Colour Profile Passthrough
//!
//! The source's embedded ICC profile is attached to every PNG unchanged.
//! Pixels are never colour-converted.
//!
//! ## PNG Frames in the ICO
//!
//! Every `.ico` frame is stored as a PNG stream. That keeps the 256 and
//! 512 px frames small and makes 512 px representable at all.

pub mod catalog;
pub mod config;
pub mod generate;
pub mod imaging;
pub mod output;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_helpers;
