//! Pure calculation functions for icon generation.
//!
//! All functions here are pure and testable without any I/O or images.

use super::params::{SHARPEN_BANDS, Sharpening};

/// Width-to-height ratio, or `None` when the height is zero.
///
/// # Examples
/// ```
/// # use storeicons::imaging::aspect_ratio;
/// assert_eq!(aspect_ratio(300, 150), Some(2.0));
/// assert_eq!(aspect_ratio(300, 0), None);
/// ```
pub fn aspect_ratio(width: u32, height: u32) -> Option<f64> {
    if height == 0 {
        None
    } else {
        Some(width as f64 / height as f64)
    }
}

/// Pick unsharp-mask parameters for a target whose larger side is `max_dimension`.
///
/// Returns `None` for sizes outside every band, which includes everything
/// at or above [`SHARPEN_LIMIT`](super::params::SHARPEN_LIMIT).
pub fn sharpening_for(max_dimension: u32) -> Option<Sharpening> {
    SHARPEN_BANDS
        .iter()
        .find(|band| band.contains(max_dimension))
        .map(|band| band.params)
}
