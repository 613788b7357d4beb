//! Localization seam for rule values.
//!
//! The engine never resolves translations itself; it hands each rule's
//! reference to a `Localizer` and uses whatever comes back. Hosts usually
//! plug in their own lookup, either by implementing the trait or by passing
//! a closure.
//!
//! License: MIT OR Apache-2.0

use anyhow::{Context, Result};
use log::info;
use std::collections::HashMap;
use std::path::Path;

/// Resolves a localization key to display text.
pub trait Localizer: Send + Sync {
    fn translate(&self, key: &str) -> String;
}

impl<F> Localizer for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

/// Returns every key unchanged.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityLocalizer;

impl Localizer for IdentityLocalizer {
    fn translate(&self, key: &str) -> String {
        key.to_string()
    }
}

/// A flat `key -> text` language table, as found in JSON language files.
///
/// Keys missing from the table translate to themselves.
#[derive(Debug, Default, Clone)]
pub struct JsonLocalizer {
    entries: HashMap<String, String>,
}

impl JsonLocalizer {
    pub fn new(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        let entries: HashMap<String, String> =
            serde_json::from_str(text).context("Language file must be a flat JSON object of strings")?;
        Ok(Self::new(entries))
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read language file {}", path.display()))?;
        let localizer = Self::from_json_str(&text)
            .with_context(|| format!("Failed to parse language file {}", path.display()))?;
        info!("Loaded {} translation(s) from {}.", localizer.len(), path.display());
        Ok(localizer)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Localizer for JsonLocalizer {
    fn translate(&self, key: &str) -> String {
        self.entries.get(key).cloned().unwrap_or_else(|| key.to_string())
    }
}
