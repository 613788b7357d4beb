// hardpatch-core/src/engine.rs
//! The patch engine: given a host string and an optional call-stack snapshot,
//! decides what should be displayed instead, if anything.
//!
//! An engine owns all of its state (rules, settings, export registry, skip
//! counters), so independent engines never interfere with each other.
//!
//! License: MIT OR APACHE 2.0

use log::{debug, trace};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::config::{DebugConfig, OptimizeConfig, PatcherConfig};
use crate::export::ExportTracker;
use crate::localize::Localizer;
use crate::render::{render, RenderOptions};
use crate::rules::model::Rule;
use crate::rules::store::RuleStore;
use crate::similarity::similarity;
use crate::stack::{StackFrame, StackMatcher};

/// Why a candidate rule was passed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// An exact-match rule whose key differs from the text.
    ExactMismatch,
    /// The rule has an empty key or value.
    Inert,
    /// Neither the stack window nor the depth check accepted the caller.
    StackMismatch,
}

/// Counters of skipped candidates, by reason.
#[derive(Debug, Default)]
pub struct SkipStats {
    exact_mismatch: AtomicU64,
    inert: AtomicU64,
    stack_mismatch: AtomicU64,
}

impl SkipStats {
    fn bump(&self, reason: SkipReason) {
        let counter = match reason {
            SkipReason::ExactMismatch => &self.exact_mismatch,
            SkipReason::Inert => &self.inert,
            SkipReason::StackMismatch => &self.stack_mismatch,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    pub fn get(&self, reason: SkipReason) -> u64 {
        match reason {
            SkipReason::ExactMismatch => self.exact_mismatch.load(Ordering::Relaxed),
            SkipReason::Inert => self.inert.load(Ordering::Relaxed),
            SkipReason::StackMismatch => self.stack_mismatch.load(Ordering::Relaxed),
        }
    }

    pub fn total(&self) -> u64 {
        self.get(SkipReason::ExactMismatch) + self.get(SkipReason::Inert) + self.get(SkipReason::StackMismatch)
    }
}

/// Rewrites host strings according to a `RuleStore`.
pub struct PatchEngine {
    store: RuleStore,
    matcher: StackMatcher,
    debug: DebugConfig,
    localizer: Box<dyn Localizer>,
    exports: ExportTracker,
    skips: SkipStats,
}

impl fmt::Debug for PatchEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PatchEngine")
            .field("anchors", &self.store.len())
            .field("rules", &self.store.rule_count())
            .field("optimize", self.matcher.optimize())
            .field("debug", &self.debug)
            .field("exports", &self.exports.len())
            .finish()
    }
}

impl PatchEngine {
    pub fn new(store: RuleStore, config: &PatcherConfig, localizer: Box<dyn Localizer>) -> Self {
        Self::with_settings(store, config.optimize, config.debug_mode, localizer)
    }

    pub fn with_settings(
        store: RuleStore,
        optimize: OptimizeConfig,
        debug: DebugConfig,
        localizer: Box<dyn Localizer>,
    ) -> Self {
        debug!(
            "Building patch engine: {} anchor(s), {} rule(s), test_mode={}.",
            store.len(),
            store.rule_count(),
            debug.test_mode
        );
        Self {
            store,
            matcher: StackMatcher::new(optimize),
            debug,
            localizer,
            exports: ExportTracker::new(),
            skips: SkipStats::default(),
        }
    }

    /// Returns the replacement for `text`, or `None` to leave it unchanged.
    ///
    /// Every call records `text` in the export registry. Without a stack
    /// snapshot, target constraints are not checked.
    pub fn patch(&self, text: &str, stack: Option<&[StackFrame]>) -> Option<String> {
        self.exports.record(text);

        let candidates = self.store.lookup(text)?;
        for rule in candidates {
            if let Some(reason) = self.reject(rule, text, stack) {
                trace!("Skipping rule '{}' -> '{}': {:?}", rule.key, rule.value, reason);
                self.skips.bump(reason);
                continue;
            }
            let patched = self.render_rule(rule, text);
            debug!("Patched text via rule '{}'.", rule.key);
            return Some(patched);
        }
        None
    }

    fn reject(&self, rule: &Rule, text: &str, stack: Option<&[StackFrame]>) -> Option<SkipReason> {
        if !rule.kind.selects_by_containment() && text != rule.key {
            return Some(SkipReason::ExactMismatch);
        }
        if rule.is_inert() {
            return Some(SkipReason::Inert);
        }
        match stack {
            Some(frames) if rule.target.is_constrained() && !self.matcher.matches(&rule.target, frames) => {
                Some(SkipReason::StackMismatch)
            }
            _ => None,
        }
    }

    fn render_rule(&self, rule: &Rule, text: &str) -> String {
        let options = if self.debug.test_mode {
            RenderOptions {
                debug: true,
                similarity: similarity(text, &rule.key),
            }
        } else {
            RenderOptions::default()
        };
        render(rule, text, self.localizer.as_ref(), options)
    }

    /// Like [`patch`](Self::patch), but returns the original text when nothing applies.
    pub fn patch_or_original(&self, text: &str, stack: Option<&[StackFrame]>) -> String {
        self.patch(text, stack).unwrap_or_else(|| text.to_string())
    }

    pub fn record(&self, text: &str) -> bool {
        self.exports.record(text)
    }

    pub fn is_recorded(&self, text: &str) -> bool {
        self.exports.is_recorded(text)
    }

    pub fn exports(&self) -> &ExportTracker {
        &self.exports
    }

    pub fn skip_stats(&self) -> &SkipStats {
        &self.skips
    }

    pub fn store(&self) -> &RuleStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::UNBOUNDED;
    use crate::localize::IdentityLocalizer;
    use crate::render::{REPLACE_MARKER, SIMILAR_MARKER};
    use crate::rules::model::TargetSpec;
    use std::sync::{Arc, Mutex};

    fn localized(key: &str) -> String {
        format!("<{}>", key)
    }

    fn engine(rules: Vec<Rule>) -> PatchEngine {
        engine_with(rules, OptimizeConfig::default(), DebugConfig::default())
    }

    fn engine_with(rules: Vec<Rule>, optimize: OptimizeConfig, debug: DebugConfig) -> PatchEngine {
        let mut store = RuleStore::new();
        for rule in rules {
            store.insert(rule);
        }
        PatchEngine::with_settings(store, optimize, debug, Box::new(localized))
    }

    fn frames(classes: &[&str]) -> Vec<StackFrame> {
        classes.iter().copied().map(StackFrame::from).collect()
    }

    #[test]
    fn test_exact_rule_ignores_stack() {
        let engine = engine(vec![Rule::new("Hello", "world.greeting", TargetSpec::new("", 0))]);
        let stack = frames(&["any.Caller"]);
        assert_eq!(engine.patch("Hello", None).as_deref(), Some("<world.greeting>"));
        assert_eq!(engine.patch("Hello", Some(&stack)).as_deref(), Some("<world.greeting>"));
    }

    #[test]
    fn test_exact_rule_requires_equality() {
        let engine = engine(vec![Rule::new("Hello", "world.greeting", TargetSpec::unconstrained())]);
        assert_eq!(engine.patch("Hello there", None), None);
        assert_eq!(engine.skip_stats().get(SkipReason::ExactMismatch), 1);
    }

    #[test]
    fn test_semi_match_rule() {
        let engine = engine(vec![Rule::new("X", "@greet.key", TargetSpec::unconstrained())]);
        assert_eq!(engine.patch("prefix X suffix", None).as_deref(), Some("prefix <greet.key> suffix"));
    }

    #[test]
    fn test_escaped_value_replaces_whole_text_with_raw_lookup() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let recorder = Arc::clone(&seen);
        let localizer = move |key: &str| {
            recorder.lock().unwrap().push(key.to_string());
            format!("<{}>", key)
        };
        let mut store = RuleStore::new();
        store.insert(Rule::new("mail", "@@support", TargetSpec::unconstrained()));
        let engine = PatchEngine::with_settings(
            store,
            OptimizeConfig::default(),
            DebugConfig::default(),
            Box::new(localizer),
        );

        assert_eq!(engine.patch("send mail now", None).as_deref(), Some("<@@support>"));
        assert_eq!(*seen.lock().unwrap(), vec!["@@support".to_string()]);
    }

    #[test]
    fn test_no_anchor_returns_none() {
        let engine = engine(vec![Rule::new("Hello", "greeting", TargetSpec::unconstrained())]);
        assert_eq!(engine.patch("Goodbye", None), None);
        assert_eq!(engine.skip_stats().total(), 0);
    }

    #[test]
    fn test_inert_rules_fall_through() {
        let engine = engine(vec![
            Rule::new("Hello", "", TargetSpec::unconstrained()),
            Rule::new("Hello", "greeting", TargetSpec::unconstrained()),
        ]);
        assert_eq!(engine.patch("Hello", None).as_deref(), Some("<greeting>"));
        assert_eq!(engine.skip_stats().get(SkipReason::Inert), 1);
    }

    #[test]
    fn test_stack_mismatch_returns_none() {
        let engine = engine(vec![Rule::new("Start", "menu.start", TargetSpec::new("#Foo", 3))]);
        let stack = frames(&["a.Bar", "b.Bar", "c.Bar", "d.FooBar"]);
        assert_eq!(engine.patch("Start", Some(&stack)), None);
        assert_eq!(engine.skip_stats().get(SkipReason::StackMismatch), 1);
    }

    #[test]
    fn test_constrained_rule_applies_without_stack() {
        let engine = engine(vec![Rule::new("Start", "menu.start", TargetSpec::new("#Foo", 3))]);
        assert_eq!(engine.patch("Start", None).as_deref(), Some("<menu.start>"));
    }

    #[test]
    fn test_first_satisfied_rule_wins() {
        let engine = engine(vec![
            Rule::new("Start", "title.start", TargetSpec::new("#TitleScreen", 2)),
            Rule::new("Start", "pause.start", TargetSpec::new("#PauseScreen", 2)),
            Rule::new("Start", "generic.start", TargetSpec::unconstrained()),
        ]);
        let pause = frames(&["gui.PauseScreen"]);
        let other = frames(&["gui.Hud"]);
        assert_eq!(engine.patch("Start", Some(&pause)).as_deref(), Some("<pause.start>"));
        assert_eq!(engine.patch("Start", Some(&other)).as_deref(), Some("<generic.start>"));
    }

    #[test]
    fn test_depth_fallback_accepts_caller() {
        let optimize = OptimizeConfig { stack_min: 0, stack_max: 1 };
        let engine = engine_with(
            vec![Rule::new("Start", "menu.start", TargetSpec::new("TitleScreen", 2))],
            optimize,
            DebugConfig::default(),
        );
        let stack = frames(&["java.lang.Thread", "gui.Widget", "gui.TitleScreen$1"]);
        assert_eq!(engine.patch("Start", Some(&stack)).as_deref(), Some("<menu.start>"));
    }

    #[test]
    fn test_window_start_selects_checked_frame() {
        let optimize = OptimizeConfig { stack_min: 1, stack_max: UNBOUNDED };
        let engine = engine_with(
            vec![Rule::new("Start", "menu.start", TargetSpec::new("@gui.", 5))],
            optimize,
            DebugConfig::default(),
        );
        assert!(engine.patch("Start", Some(&frames(&["java.lang.Thread", "gui.Menu"]))).is_some());
        assert!(engine.patch("Start", Some(&frames(&["gui.Menu", "java.lang.Thread"]))).is_none());
    }

    #[test]
    fn test_debug_markers() {
        let debug = DebugConfig { test_mode: true };
        let engine = engine_with(
            vec![
                Rule::new("Hello", "greeting", TargetSpec::unconstrained()),
                Rule::new("X", "@x.key", TargetSpec::unconstrained()),
            ],
            OptimizeConfig::default(),
            debug,
        );
        assert_eq!(
            engine.patch("Hello", None),
            Some(format!("{}{}<greeting>", SIMILAR_MARKER, REPLACE_MARKER))
        );
        assert_eq!(
            engine.patch("a long line with X in it", None),
            Some(format!("a long line with {}<x.key> in it", REPLACE_MARKER))
        );
    }

    #[test]
    fn test_every_call_is_recorded_once() {
        let engine = engine(vec![Rule::new("Hello", "greeting", TargetSpec::unconstrained())]);
        engine.patch("Hello", None);
        engine.patch("Unmatched", None);
        engine.patch("Hello", None);
        assert_eq!(engine.exports().entries(), vec!["Hello", "Unmatched"]);
        assert!(engine.is_recorded("Unmatched"));
        assert!(!engine.record("Hello"));
    }

    #[test]
    fn test_engines_do_not_share_exports() {
        let first = engine(Vec::new());
        let second = engine(Vec::new());
        first.patch("only in first", None);
        assert!(first.is_recorded("only in first"));
        assert!(!second.is_recorded("only in first"));
    }

    #[test]
    fn test_patch_or_original() {
        let engine = PatchEngine::with_settings(
            RuleStore::new(),
            OptimizeConfig::default(),
            DebugConfig::default(),
            Box::new(IdentityLocalizer),
        );
        assert_eq!(engine.patch_or_original("unchanged", None), "unchanged");
    }

    #[test]
    fn test_engine_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PatchEngine>();
    }
}
