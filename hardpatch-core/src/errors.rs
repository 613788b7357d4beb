//! errors.rs - Custom error types for the hardpatch-core library.
//!
//! Load-phase failures (unreadable or malformed config and rule files) are
//! represented here. Ordinary non-matches at patch time are never errors;
//! the engine reports them as `None`.
//!
//! License: MIT OR APACHE 2.0

use std::path::PathBuf;
use thiserror::Error;

/// This enum represents all possible error types in the `hardpatch-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum PatcherError {
    #[error("Malformed rule file '{0}': {1}")]
    MalformedRuleFile(String, String),

    #[error("Rule module '{name}' not found at {path}")]
    ModuleNotFound { name: String, path: PathBuf },

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("An unexpected I/O error occurred: {0}")]
    Io(#[from] std::io::Error),
}
