//! Aspect-ratio policy for source images.
//!
//! [`check_aspect`] is a pure function of `(width, height, class)` so the
//! caller can re-run it whenever the selected [`VariantClass`] changes,
//! without decoding the image again.
//!
//! | Class | Expected ratio | Tolerance | Outside tolerance |
//! |---|---|---|---|
//! | Square | 1.0 | 0.05 | [`Verdict::Block`] |
//! | MultiSizeContainer | 1.0 | 0.05 | [`Verdict::Block`] |
//! | Wide | 310/150 ≈ 2.0667 | 0.1 | [`Verdict::Warn`] |
//!
//! A zero height always blocks, whatever the class.

use crate::catalog::VariantClass;
use crate::imaging::aspect_ratio;
use serde::Serialize;
use std::fmt;

pub const SQUARE_RATIO: f64 = 1.0;
pub const SQUARE_TOLERANCE: f64 = 0.05;
pub const WIDE_RATIO: f64 = 310.0 / 150.0;
pub const WIDE_TOLERANCE: f64 = 0.1;

/// Outcome of the aspect-ratio policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// Within tolerance.
    Pass,
    /// Outside tolerance, but the caller may proceed after confirmation.
    Warn,
    /// Generation must not start.
    Block,
}

/// Full result of an aspect-ratio check, with everything needed for a message.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AspectCheck {
    pub class: VariantClass,
    pub width: u32,
    pub height: u32,
    /// `None` when the height is zero.
    pub ratio: Option<f64>,
    pub expected: f64,
    pub tolerance: f64,
    pub within_tolerance: bool,
    pub verdict: Verdict,
}

impl AspectCheck {
    pub fn is_blocking(&self) -> bool {
        self.verdict == Verdict::Block
    }

    pub fn is_warning(&self) -> bool {
        self.verdict == Verdict::Warn
    }
}

impl fmt::Display for AspectCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.ratio {
            None => write!(
                f,
                "image size {}x{} has zero height; {} need a ratio of {:.2}",
                self.width,
                self.height,
                self.class.label(),
                self.expected
            ),
            Some(ratio) => write!(
                f,
                "image size {}x{} has aspect ratio {:.2}; {} expect {:.2} (tolerance {})",
                self.width,
                self.height,
                ratio,
                self.class.label(),
                self.expected,
                self.tolerance
            ),
        }
    }
}

/// Apply the aspect-ratio policy for `class` to a `width` x `height` source.
pub fn check_aspect(width: u32, height: u32, class: VariantClass) -> AspectCheck {
    let (expected, tolerance, on_violation) = match class {
        VariantClass::Square | VariantClass::MultiSizeContainer => {
            (SQUARE_RATIO, SQUARE_TOLERANCE, Verdict::Block)
        }
        VariantClass::Wide => (WIDE_RATIO, WIDE_TOLERANCE, Verdict::Warn),
    };

    let ratio = aspect_ratio(width, height);
    let within_tolerance = ratio.is_some_and(|r| (r - expected).abs() <= tolerance);
    let verdict = match ratio {
        None => Verdict::Block,
        Some(_) if within_tolerance => Verdict::Pass,
        Some(_) => on_violation,
    };

    AspectCheck {
        class,
        width,
        height,
        ratio,
        expected,
        tolerance,
        within_tolerance,
        verdict,
    }
}
