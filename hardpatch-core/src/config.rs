//! Configuration management for `hardpatch-core`.
//!
//! This module defines the engine-wide settings: the diagnostic switch, the
//! stack scan window, and the ordered list of rule modules to load. The
//! settings are read from `config.json` in the patcher's config directory and
//! are read-only once an engine has been built from them.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name of the engine configuration inside a config directory.
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Sentinel for "no bound" on either side of the stack window.
pub const UNBOUNDED: i32 = -1;

/// Diagnostic settings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DebugConfig {
    /// When true, patched text carries the replace/similar markers.
    pub test_mode: bool,
}

/// The window of stack frames the windowed target check looks at.
///
/// Both bounds are frame indices; `-1` leaves that side of the window open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct OptimizeConfig {
    pub stack_min: i32,
    pub stack_max: i32,
}

impl Default for OptimizeConfig {
    fn default() -> Self {
        Self {
            stack_min: UNBOUNDED,
            stack_max: UNBOUNDED,
        }
    }
}

impl OptimizeConfig {
    /// Resolves the configured bounds against a snapshot of `len` frames.
    ///
    /// Bounds are clamped to `len`; an inverted window collapses to empty.
    pub fn window(&self, len: usize) -> std::ops::Range<usize> {
        let start = clamp_bound(self.stack_min, 0, len);
        let end = clamp_bound(self.stack_max, len, len);
        if start >= end {
            return start..start;
        }
        start..end
    }
}

fn clamp_bound(bound: i32, unbounded: usize, len: usize) -> usize {
    if bound < 0 {
        // Any negative value is treated like the documented -1.
        unbounded
    } else {
        (bound as usize).min(len)
    }
}

/// Represents the top-level `config.json` structure.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PatcherConfig {
    pub debug_mode: DebugConfig,
    pub optimize: OptimizeConfig,
    /// Rule module file names, relative to the config directory, in load order.
    pub mods: Vec<String>,
}

impl PatcherConfig {
    /// Loads the configuration from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading patcher config from: {}", path.display());
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config = Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;

        info!(
            "Config loaded: test_mode={}, stack window=[{}, {}), {} module(s).",
            config.debug_mode.test_mode,
            config.optimize.stack_min,
            config.optimize.stack_max,
            config.mods.len()
        );
        Ok(config)
    }

    /// Loads `config.json` from a patcher config directory.
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Result<Self> {
        Self::load_from_file(dir.as_ref().join(CONFIG_FILE_NAME))
    }

    /// Parses a configuration document. Unknown keys are ignored.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: PatcherConfig = serde_json::from_str(text)?;
        debug!("Parsed config with modules: {:?}", config.mods);
        Ok(config)
    }
}
