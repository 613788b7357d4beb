// hardpatch/src/commands/mod.rs
//! Command implementations for the hardpatch CLI.

pub mod check;
pub mod patch;

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

/// The config directory used when `--config-dir` is not given.
pub fn default_config_dir() -> Result<PathBuf> {
    dirs::config_dir()
        .map(|dir| dir.join("hardpatch"))
        .ok_or_else(|| anyhow!("No platform config directory available; pass --config-dir"))
}

pub(crate) fn resolve_config_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    match explicit {
        Some(dir) => Ok(dir.to_path_buf()),
        None => default_config_dir(),
    }
}
