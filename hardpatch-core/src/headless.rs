// hardpatch-core/src/headless.rs

//! `headless.rs`
//! Convenience wrappers for using the patch engine outside a host
//! application: build an engine from a config directory in one call, and
//! patch a whole multi-line document line by line.

use anyhow::{Context, Result};
use log::debug;
use std::path::Path;

use crate::config::PatcherConfig;
use crate::engine::PatchEngine;
use crate::localize::Localizer;
use crate::rules::store::RuleStore;
use crate::stack::StackFrame;

/// Loads `config.json` and every module it lists from `dir`, then builds an engine.
pub fn load_engine_from_dir<P: AsRef<Path>>(dir: P, localizer: Box<dyn Localizer>) -> Result<PatchEngine> {
    let dir = dir.as_ref();
    let config = PatcherConfig::load_from_dir(dir)?;
    let store = RuleStore::load_modules(dir, &config.mods)
        .with_context(|| format!("Failed to load rule modules from {}", dir.display()))?;
    Ok(PatchEngine::new(store, &config, localizer))
}

/// Patches each line of `content` independently, keeping line endings intact.
///
/// Lines no rule applies to are copied through unchanged.
pub fn patch_lines(engine: &PatchEngine, content: &str, stack: Option<&[StackFrame]>) -> String {
    let mut output = String::with_capacity(content.len());
    let mut line_count = 0usize;

    for raw_line in content.split_inclusive('\n') {
        let (line, ending) = split_line_ending(raw_line);
        output.push_str(&engine.patch_or_original(line, stack));
        output.push_str(ending);
        line_count += 1;
    }

    debug!("Headless run processed {} line(s).", line_count);
    output
}

/// One-shot: builds an engine from `config` and `store`, then patches `content`.
pub fn headless_patch_string(
    config: &PatcherConfig,
    store: RuleStore,
    localizer: Box<dyn Localizer>,
    content: &str,
) -> String {
    let engine = PatchEngine::new(store, config, localizer);
    patch_lines(&engine, content, None)
}

fn split_line_ending(raw_line: &str) -> (&str, &str) {
    if let Some(line) = raw_line.strip_suffix("\r\n") {
        (line, "\r\n")
    } else if let Some(line) = raw_line.strip_suffix('\n') {
        (line, "\n")
    } else {
        (raw_line, "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DebugConfig, OptimizeConfig};
    use crate::localize::IdentityLocalizer;
    use crate::rules::model::{Rule, TargetSpec};

    fn store() -> RuleStore {
        let mut store = RuleStore::new();
        store.insert(Rule::new("Start", "Begin", TargetSpec::unconstrained()));
        store.insert(Rule::new("Quit", "@Exit", TargetSpec::unconstrained()));
        store
    }

    #[test]
    fn test_headless_patch_string() {
        let out = headless_patch_string(
            &PatcherConfig::default(),
            store(),
            Box::new(IdentityLocalizer),
            "Start\nPress Quit now\nOther\n",
        );
        assert_eq!(out, "Begin\nPress Exit now\nOther\n");
    }

    #[test]
    fn test_keeps_crlf_and_missing_final_newline() {
        let out = headless_patch_string(
            &PatcherConfig::default(),
            store(),
            Box::new(IdentityLocalizer),
            "Start\r\nStart",
        );
        assert_eq!(out, "Begin\r\nBegin");
    }

    #[test]
    fn test_empty_input() {
        let out = headless_patch_string(&PatcherConfig::default(), store(), Box::new(IdentityLocalizer), "");
        assert_eq!(out, "");
    }

    #[test]
    fn test_patch_lines_copies_unmatched_lines_and_records_each() {
        let engine = PatchEngine::with_settings(
            store(),
            OptimizeConfig::default(),
            DebugConfig::default(),
            Box::new(IdentityLocalizer),
        );
        let out = patch_lines(&engine, "Other\nStart\n", None);
        assert_eq!(out, "Other\nBegin\n");
        assert!(engine.is_recorded("Other"));
        assert!(engine.is_recorded("Start"));
    }
}
