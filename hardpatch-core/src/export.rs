// hardpatch-core/src/export.rs
//! Tracks every distinct string the engine has observed, in first-seen order,
//! so the host can later dump them for manual review.
//!
//! License: MIT OR APACHE 2.0

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard};

use log::trace;

#[derive(Debug, Default)]
struct Registry {
    seen: HashSet<String>,
    ordered: Vec<String>,
}

/// A deduplicating, append-only registry of observed strings.
///
/// Appends are serialized behind a mutex so a single tracker can be shared by
/// a host that renders text from more than one thread.
#[derive(Debug, Default)]
pub struct ExportTracker {
    inner: Mutex<Registry>,
}

impl ExportTracker {
    pub fn new() -> Self {
        Self::default()
    }

    // Nothing in the registry can be left half-updated, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, Registry> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Records `text` if it has not been seen before.
    ///
    /// Returns `true` when the text was newly added.
    pub fn record(&self, text: &str) -> bool {
        let mut registry = self.lock();
        if registry.seen.contains(text) {
            return false;
        }
        registry.seen.insert(text.to_string());
        registry.ordered.push(text.to_string());
        trace!("Recorded new export entry #{}", registry.ordered.len());
        true
    }

    pub fn is_recorded(&self, text: &str) -> bool {
        self.lock().seen.contains(text)
    }

    /// Returns a copy of all recorded strings in first-seen order.
    pub fn entries(&self) -> Vec<String> {
        self.lock().ordered.clone()
    }

    pub fn len(&self) -> usize {
        self.lock().ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
