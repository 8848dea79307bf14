//! Static catalog of icon targets per variant class.
//!
//! Each [`VariantClass`] maps to a fixed, ordered list of [`TargetSpec`]s.
//! Nothing here is derived from the source image: the dimensions are the
//! packaging requirements of the Microsoft Store.
//!
//! ## Square (20 targets)
//!
//! ```text
//! Square44x44Logo     scale-100..400   44, 55, 66, 88, 176
//!                     unplated         16, 24, 32, 48, 256
//! Square150x150Logo   scale-100..400   150, 188, 225, 300, 600
//! StoreLogo           scale-100..400   50, 63, 75, 100, 200
//! ```
//!
//! ## Wide (5 targets)
//!
//! `Wide310x150Logo` at the same 100/125/150/200/400% ladder.
//!
//! ## Multi-size container (7 frames)
//!
//! One `icon.ico` holding 512, 256, 128, 64, 48, 32 and 16 px frames, listed
//! largest first because the container's first frame is its default.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// File name of the multi-size container written for [`VariantClass::MultiSizeContainer`].
pub const CONTAINER_FILE_NAME: &str = "icon.ico";

/// Which family of outputs a generation run produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VariantClass {
    /// 20 square PNG logos.
    #[default]
    Square,
    /// 5 wide 310x150 PNG logos.
    Wide,
    /// A single `.ico` holding 7 square frames.
    #[serde(rename = "ico")]
    MultiSizeContainer,
}

impl VariantClass {
    pub const ALL: [VariantClass; 3] = [
        VariantClass::Square,
        VariantClass::Wide,
        VariantClass::MultiSizeContainer,
    ];

    /// Short lowercase key used in preferences and on the command line.
    pub fn key(self) -> &'static str {
        match self {
            VariantClass::Square => "square",
            VariantClass::Wide => "wide",
            VariantClass::MultiSizeContainer => "ico",
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            VariantClass::Square => "Square icons",
            VariantClass::Wide => "Wide icons",
            VariantClass::MultiSizeContainer => "ICO multisize",
        }
    }
}

impl fmt::Display for VariantClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown variant class '{0}' (expected square, wide or ico)")]
pub struct UnknownVariant(String);

impl FromStr for VariantClass {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(VariantClass::Square),
            "wide" => Ok(VariantClass::Wide),
            "ico" | "container" | "multisize" => Ok(VariantClass::MultiSizeContainer),
            other => Err(UnknownVariant(other.to_string())),
        }
    }
}

/// One output target: artifact name plus exact pixel dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct TargetSpec {
    pub name: &'static str,
    pub width: u32,
    pub height: u32,
}

impl TargetSpec {
    const fn new(name: &'static str, width: u32, height: u32) -> Self {
        Self {
            name,
            width,
            height,
        }
    }

    const fn square(name: &'static str, size: u32) -> Self {
        Self::new(name, size, size)
    }

    /// The larger of the two dimensions.
    pub fn max_dimension(&self) -> u32 {
        self.width.max(self.height)
    }
}

impl fmt::Display for TargetSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}x{})", self.name, self.width, self.height)
    }
}

const SQUARE_TARGETS: [TargetSpec; 20] = [
    TargetSpec::square("Square44x44Logo.scale-100.png", 44),
    TargetSpec::square("Square44x44Logo.scale-125.png", 55),
    TargetSpec::square("Square44x44Logo.scale-150.png", 66),
    TargetSpec::square("Square44x44Logo.scale-200.png", 88),
    TargetSpec::square("Square44x44Logo.scale-400.png", 176),
    TargetSpec::square("Square44x44Logo.targetsize-16_altform-unplated.png", 16),
    TargetSpec::square("Square44x44Logo.targetsize-24_altform-unplated.png", 24),
    TargetSpec::square("Square44x44Logo.targetsize-32_altform-unplated.png", 32),
    TargetSpec::square("Square44x44Logo.targetsize-48_altform-unplated.png", 48),
    TargetSpec::square("Square44x44Logo.targetsize-256_altform-unplated.png", 256),
    TargetSpec::square("Square150x150Logo.scale-100.png", 150),
    TargetSpec::square("Square150x150Logo.scale-125.png", 188),
    TargetSpec::square("Square150x150Logo.scale-150.png", 225),
    TargetSpec::square("Square150x150Logo.scale-200.png", 300),
    TargetSpec::square("Square150x150Logo.scale-400.png", 600),
    TargetSpec::square("StoreLogo.scale-100.png", 50),
    TargetSpec::square("StoreLogo.scale-125.png", 63),
    TargetSpec::square("StoreLogo.scale-150.png", 75),
    TargetSpec::square("StoreLogo.scale-200.png", 100),
    TargetSpec::square("StoreLogo.scale-400.png", 200),
];

const WIDE_TARGETS: [TargetSpec; 5] = [
    TargetSpec::new("Wide310x150Logo.scale-100.png", 310, 150),
    TargetSpec::new("Wide310x150Logo.scale-125.png", 388, 188),
    TargetSpec::new("Wide310x150Logo.scale-150.png", 465, 225),
    TargetSpec::new("Wide310x150Logo.scale-200.png", 620, 300),
    TargetSpec::new("Wide310x150Logo.scale-400.png", 1240, 600),
];

// Descending: the container's first frame is its default.
const CONTAINER_TARGETS: [TargetSpec; 7] = [
    TargetSpec::square("512x512", 512),
    TargetSpec::square("256x256", 256),
    TargetSpec::square("128x128", 128),
    TargetSpec::square("64x64", 64),
    TargetSpec::square("48x48", 48),
    TargetSpec::square("32x32", 32),
    TargetSpec::square("16x16", 16),
];

/// The ordered target list for a variant class.
pub fn targets_for(class: VariantClass) -> &'static [TargetSpec] {
    match class {
        VariantClass::Square => &SQUARE_TARGETS,
        VariantClass::Wide => &WIDE_TARGETS,
        VariantClass::MultiSizeContainer => &CONTAINER_TARGETS,
    }
}

/// Square frame sizes of the multi-size container, largest first.
pub fn container_sizes() -> Vec<u32> {
    CONTAINER_TARGETS.iter().map(|t| t.width).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn target_counts_per_class() {
        assert_eq!(targets_for(VariantClass::Square).len(), 20);
        assert_eq!(targets_for(VariantClass::Wide).len(), 5);
        assert_eq!(targets_for(VariantClass::MultiSizeContainer).len(), 7);
    }

    #[test]
    fn target_order_is_stable() {
        for class in VariantClass::ALL {
            assert_eq!(targets_for(class), targets_for(class));
        }
        assert_eq!(
            targets_for(VariantClass::Square)[0].name,
            "Square44x44Logo.scale-100.png"
        );
        assert_eq!(
            targets_for(VariantClass::Wide)[4],
            TargetSpec::new("Wide310x150Logo.scale-400.png", 1240, 600)
        );
    }

    #[test]
    fn square_targets_are_square() {
        for t in targets_for(VariantClass::Square) {
            assert_eq!(t.width, t.height, "{t}");
        }
    }

    #[test]
    fn square_unplated_sizes() {
        let unplated: Vec<u32> = targets_for(VariantClass::Square)
            .iter()
            .filter(|t| t.name.contains("altform-unplated"))
            .map(|t| t.width)
            .collect();
        assert_eq!(unplated, vec![16, 24, 32, 48, 256]);
    }

    #[test]
    fn names_are_unique_within_class() {
        for class in VariantClass::ALL {
            let names: HashSet<_> = targets_for(class).iter().map(|t| t.name).collect();
            assert_eq!(names.len(), targets_for(class).len(), "{class}");
        }
    }

    #[test]
    fn container_sizes_strictly_descending() {
        let sizes = container_sizes();
        assert_eq!(sizes, vec![512, 256, 128, 64, 48, 32, 16]);
        assert!(sizes.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn variant_class_parses_keys() {
        assert_eq!("square".parse::<VariantClass>().unwrap(), VariantClass::Square);
        assert_eq!("Wide".parse::<VariantClass>().unwrap(), VariantClass::Wide);
        assert_eq!(
            "ico".parse::<VariantClass>().unwrap(),
            VariantClass::MultiSizeContainer
        );
        assert!("banner".parse::<VariantClass>().is_err());
    }

    #[test]
    fn variant_class_key_roundtrips_through_from_str() {
        for class in VariantClass::ALL {
            assert_eq!(class.key().parse::<VariantClass>().unwrap(), class);
        }
    }

    #[test]
    fn target_display() {
        let t = targets_for(VariantClass::Wide)[0];
        assert_eq!(t.to_string(), "Wide310x150Logo.scale-100.png (310x150)");
        assert_eq!(t.max_dimension(), 310);
    }
}
