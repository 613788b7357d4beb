// hardpatch-core/src/render.rs
//! Produces the final text for a rule that has been accepted.
//!
//! Marker strings use the host's `§` formatting codes: green for a
//! replacement, aqua for a replacement whose key was close to the whole text.

use crate::localize::Localizer;
use crate::rules::model::{Rule, ValueKind};

/// Prepended to every replacement while test mode is on.
pub const REPLACE_MARKER: &str = "§a[REPLACE MARKED]§f";
/// Prepended, in front of the replace marker, when the text resembles the key.
pub const SIMILAR_MARKER: &str = "§b[SIMILAR MARKED]§f";
/// Similarity ratio at or above which the similar marker is added.
pub const SIMILARITY_THRESHOLD: f64 = 0.5;

/// Diagnostic inputs for a single render.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RenderOptions {
    pub debug: bool,
    /// Similarity between the whole text and the rule key. Only read in debug mode.
    pub similarity: f64,
}

/// Renders `rule` against `text`.
///
/// Semi-match rules replace every occurrence of the key inside `text` with the
/// localized reference; all other rules replace the whole text.
pub fn render(rule: &Rule, text: &str, localizer: &dyn Localizer, options: RenderOptions) -> String {
    let localized = decorate(localizer.translate(rule.kind.reference()), options);
    match &rule.kind {
        ValueKind::SemiMatch(_) => text.replace(rule.key.as_str(), &localized),
        ValueKind::Literal(_) | ValueKind::FullLocalized(_) => localized,
    }
}

fn decorate(localized: String, options: RenderOptions) -> String {
    if !options.debug {
        return localized;
    }
    let marked = format!("{}{}", REPLACE_MARKER, localized);
    if options.similarity >= SIMILARITY_THRESHOLD {
        format!("{}{}", SIMILAR_MARKER, marked)
    } else {
        marked
    }
}
