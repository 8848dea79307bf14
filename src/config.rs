//! User preferences.
//!
//! Remembers where the last source came from, where the last run wrote to
//! and which variant class was picked, so the next `generate` needs fewer
//! arguments. Nothing here affects what a run produces.
//!
//! ## File Location
//!
//! `preferences.toml` in the platform config directory
//! (`directories::ProjectDirs`), e.g. `~/.config/storeicons/preferences.toml`
//! on Linux. The CLI's `--config <path>` points somewhere else.
//!
//! ## Format
//!
//! ```toml
//! # All keys are optional - missing ones fall back to defaults
//! last_source_directory = "/home/me/art"
//! last_output_directory = "/home/me/app/Assets"
//! last_variant = "square"       # square | wide | ico
//! window_geometry = "480x680"
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::catalog::VariantClass;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const PREFERENCES_FILE: &str = "preferences.toml";
pub const DEFAULT_WINDOW_GEOMETRY: &str = "480x680";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    TomlSer(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
    #[error("No config directory available on this platform")]
    NoConfigDir,
}

/// Persisted preferences. Every field has a default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Preferences {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_source_directory: Option<PathBuf>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_output_directory: Option<PathBuf>,
    pub last_variant: VariantClass,
    /// `WIDTHxHEIGHT` of the main window.
    pub window_geometry: String,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            last_source_directory: None,
            last_output_directory: None,
            last_variant: VariantClass::default(),
            window_geometry: DEFAULT_WINDOW_GEOMETRY.to_string(),
        }
    }
}

impl Preferences {
    /// Load from `path`. A missing file yields defaults.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let prefs: Preferences = toml::from_str(&content)?;
        prefs.validate()?;
        Ok(prefs)
    }

    /// Write to `path`, creating parent directories as needed.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml::to_string_pretty(self)?)?;
        Ok(())
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        parse_geometry(&self.window_geometry).map(|_| ())
    }

    /// Record the inputs of a successful run.
    pub fn remember_run(&mut self, source: &Path, output_dir: &Path, class: VariantClass) {
        if let Some(dir) = source.parent().filter(|p| !p.as_os_str().is_empty()) {
            self.last_source_directory = Some(dir.to_path_buf());
        }
        self.last_output_directory = Some(output_dir.to_path_buf());
        self.last_variant = class;
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }
}

/// Parse `WIDTHxHEIGHT` into non-zero dimensions.
pub fn parse_geometry(s: &str) -> Result<(u32, u32), ConfigError> {
    let invalid = || ConfigError::Validation(format!("window_geometry '{s}' must be WIDTHxHEIGHT"));
    let (w, h) = s.split_once('x').ok_or_else(invalid)?;
    let w: u32 = w.trim().parse().map_err(|_| invalid())?;
    let h: u32 = h.trim().parse().map_err(|_| invalid())?;
    if w == 0 || h == 0 {
        return Err(invalid());
    }
    Ok((w, h))
}

/// Platform location of the preferences file.
pub fn default_path() -> Result<PathBuf, ConfigError> {
    directories::ProjectDirs::from("", "", "storeicons")
        .map(|dirs| dirs.config_dir().join(PREFERENCES_FILE))
        .ok_or(ConfigError::NoConfigDir)
}
