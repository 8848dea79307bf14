//! CLI output formatting.
//!
//! Each target is shown by catalog position and artifact name, with the
//! written path and sharpening result as indented context lines.
//!
//! # Output Format
//!
//! ## Generate
//!
//! ```text
//! Square icons: 20 targets from logo.png (512x512)
//!     001 Square44x44Logo.scale-100.png (44x44)
//!         Output: Assets/Square44x44Logo.scale-100.png
//!         Sharpen: radius 0.5, amount 50%, threshold 3
//!     ...
//! Generated 20 files in Assets
//! ```
//!
//! ## Container
//!
//! ```text
//! ICO multisize: 7 targets from logo.png (512x512)
//!     001 512x512 (512x512)
//!     ...
//!     icon.ico: 512, 256, 128, 64, 48, 32, 16
//! Generated icon.ico (7 sizes) in Assets
//! ```
//!
//! # Architecture
//!
//! Each output has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.

use crate::catalog::{VariantClass, targets_for};
use crate::config::Preferences;
use crate::generate::{GenerateEvent, GenerateReport};
use crate::imaging::SharpenOutcome;
use crate::validation::{AspectCheck, Verdict};
use std::path::Path;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|f| f.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn join_sizes(sizes: &[u32]) -> String {
    sizes
        .iter()
        .map(u32::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// One-line description of a sharpening step, `None` when nothing ran.
fn sharpening_line(outcome: &SharpenOutcome) -> Option<String> {
    match outcome {
        SharpenOutcome::Skipped => None,
        SharpenOutcome::Applied { params } => Some(format!(
            "Sharpen: radius {}, amount {}%, threshold {}",
            params.radius, params.amount, params.threshold
        )),
        SharpenOutcome::Failed { reason, .. } => {
            Some(format!("Sharpen: failed ({reason}), kept unsharpened"))
        }
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format a single progress event as display lines.
pub fn format_generate_event(event: &GenerateEvent) -> Vec<String> {
    match event {
        GenerateEvent::Started {
            class,
            source,
            dimensions,
            total,
        } => vec![format!(
            "{}: {} targets from {} ({}x{})",
            class.label(),
            total,
            file_name(source),
            dimensions.0,
            dimensions.1
        )],
        GenerateEvent::AspectAccepted(check) => vec![format!("Warning: {check}")],
        GenerateEvent::TargetRendered {
            index,
            target,
            sharpening,
            written,
            ..
        } => {
            let mut lines = vec![format!("    {} {}", format_index(*index), target)];
            if let Some(path) = written {
                lines.push(format!("        Output: {}", path.display()));
            }
            if let Some(line) = sharpening_line(sharpening) {
                lines.push(format!("        {line}"));
            }
            lines
        }
        GenerateEvent::ContainerWritten { path, sizes } => {
            vec![format!("    {}: {}", file_name(path), join_sizes(sizes))]
        }
    }
}

/// Format the closing summary of a successful run.
pub fn format_report(report: &GenerateReport) -> Vec<String> {
    let dir = report.output_dir.display();
    let mut lines = Vec::new();
    match report.class {
        VariantClass::MultiSizeContainer => {
            let name = report
                .written
                .first()
                .map(|p| file_name(p))
                .unwrap_or_default();
            lines.push(format!(
                "Generated {} ({} sizes) in {}",
                name,
                report.artifacts.len(),
                dir
            ));
        }
        VariantClass::Square | VariantClass::Wide => {
            lines.push(format!("Generated {} files in {}", report.written.len(), dir));
        }
    }
    if report.icc_profile {
        lines.push("    ICC profile carried over from source".to_string());
    }
    lines
}

pub fn print_generate_event(event: &GenerateEvent) {
    for line in format_generate_event(event) {
        println!("{}", line);
    }
}

pub fn print_report(report: &GenerateReport) {
    for line in format_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Check
// ============================================================================

/// Format an aspect-ratio check for the `check` command.
pub fn format_check(source: &Path, check: &AspectCheck) -> Vec<String> {
    let ratio = match check.ratio {
        Some(r) => format!("{:.4}", r),
        None => "undefined".to_string(),
    };
    let verdict = match check.verdict {
        Verdict::Pass => "pass",
        Verdict::Warn => "warn (generation needs --allow-aspect-mismatch)",
        Verdict::Block => "block",
    };
    vec![
        format!("{} for {}", check.class.label(), file_name(source)),
        format!("    Size: {}x{}", check.width, check.height),
        format!(
            "    Ratio: {} (expected {:.4} ± {})",
            ratio, check.expected, check.tolerance
        ),
        format!("    Verdict: {}", verdict),
    ]
}

pub fn print_check(source: &Path, check: &AspectCheck) {
    for line in format_check(source, check) {
        println!("{}", line);
    }
}

// ============================================================================
// List / config
// ============================================================================

/// Format the catalog for one variant class.
pub fn format_catalog(class: VariantClass) -> Vec<String> {
    let targets = targets_for(class);
    let mut lines = vec![format!("{} ({} targets)", class.label(), targets.len())];
    lines.extend(
        targets
            .iter()
            .enumerate()
            .map(|(i, t)| format!("    {} {}", format_index(i + 1), t)),
    );
    lines
}

pub fn print_catalog(class: VariantClass) {
    for line in format_catalog(class) {
        println!("{}", line);
    }
}

/// Format stored preferences, one `key: value` per line.
pub fn format_preferences(path: &Path, prefs: &Preferences) -> Vec<String> {
    let show = |p: &Option<std::path::PathBuf>| match p {
        Some(p) => p.display().to_string(),
        None => "(not set)".to_string(),
    };
    vec![
        format!("Preferences ({})", path.display()),
        format!("    Last source directory: {}", show(&prefs.last_source_directory)),
        format!("    Last output directory: {}", show(&prefs.last_output_directory)),
        format!("    Last variant: {}", prefs.last_variant),
        format!("    Window geometry: {}", prefs.window_geometry),
    ]
}

pub fn print_preferences(path: &Path, prefs: &Preferences) {
    for line in format_preferences(path, prefs) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================
