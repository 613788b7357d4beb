// hardpatch-core/src/rules/store.rs
//! The anchor index that selects candidate rules for a piece of text.
//!
//! Rules are grouped by their key, which doubles as the anchor: a group is a
//! candidate when its anchor occurs anywhere in the text. When several anchors
//! occur, the longest one wins, and anchors of equal length are tried in the
//! order they were first inserted. The lookup order is fixed at insert time,
//! so the result never depends on hash iteration order.
//!
//! License: MIT OR APACHE 2.0

use anyhow::Result;
use log::{debug, info};
use std::collections::HashMap;
use std::path::Path;

use crate::errors::PatcherError;
use crate::rules::loader::{load_module_file, ModuleInfo, RuleModule};
use crate::rules::model::Rule;

#[derive(Debug, Clone)]
struct AnchorGroup {
    anchor: String,
    anchor_len: usize,
    rules: Vec<Rule>,
}

/// Rules grouped by anchor, with a longest-anchor-first lookup order.
#[derive(Debug, Clone, Default)]
pub struct RuleStore {
    /// Groups in first-inserted order.
    groups: Vec<AnchorGroup>,
    /// Positions in `groups`, by anchor.
    positions: HashMap<String, usize>,
    /// Indices into `groups`, sorted by descending anchor length; stable for ties.
    lookup_order: Vec<usize>,
    modules: Vec<ModuleInfo>,
}

impl RuleStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from modules, merging them in the given order.
    pub fn from_modules(modules: impl IntoIterator<Item = RuleModule>) -> Self {
        let mut store = Self::new();
        for module in modules {
            store.extend(module);
        }
        store
    }

    /// Loads every listed module file relative to `dir`, in list order.
    ///
    /// A missing or malformed module is a hard error.
    pub fn load_modules<P: AsRef<Path>>(dir: P, mods: &[String]) -> Result<Self> {
        let dir = dir.as_ref();
        let mut store = Self::new();
        for name in mods {
            let path = dir.join(name);
            if !path.is_file() {
                return Err(PatcherError::ModuleNotFound { name: name.clone(), path }.into());
            }
            store.extend(load_module_file(&path)?);
        }
        info!(
            "Rule store ready: {} module(s), {} anchor(s), {} rule(s).",
            store.modules.len(),
            store.len(),
            store.rule_count()
        );
        debug!("Anchor lookup order: {:?}", store.anchors().collect::<Vec<_>>());
        Ok(store)
    }

    /// Appends a module's rules after any rules already stored for the same anchors.
    pub fn extend(&mut self, module: RuleModule) {
        debug!("Merging {} rule(s) from '{}'.", module.rules.len(), module.display_name());
        for rule in module.rules {
            self.insert(rule);
        }
        self.modules.push(module.info);
    }

    pub fn insert(&mut self, rule: Rule) {
        if let Some(&index) = self.positions.get(&rule.key) {
            self.groups[index].rules.push(rule);
            return;
        }

        let anchor = rule.key.clone();
        let anchor_len = anchor.chars().count();
        let index = self.groups.len();
        self.groups.push(AnchorGroup {
            anchor: anchor.clone(),
            anchor_len,
            rules: vec![rule],
        });
        self.positions.insert(anchor, index);

        let groups = &self.groups;
        let slot = self
            .lookup_order
            .partition_point(|&existing| groups[existing].anchor_len >= anchor_len);
        self.lookup_order.insert(slot, index);
    }

    /// Returns the rules of the longest anchor contained in `text`.
    pub fn lookup(&self, text: &str) -> Option<&[Rule]> {
        self.lookup_order
            .iter()
            .map(|&index| &self.groups[index])
            .find(|group| text.contains(group.anchor.as_str()))
            .map(|group| group.rules.as_slice())
    }

    /// Anchors in lookup order.
    pub fn anchors(&self) -> impl Iterator<Item = &str> {
        self.lookup_order.iter().map(|&index| self.groups[index].anchor.as_str())
    }

    /// Headers of the merged modules, in load order.
    pub fn modules(&self) -> &[ModuleInfo] {
        &self.modules
    }

    /// Number of distinct anchors.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn rule_count(&self) -> usize {
        self.groups.iter().map(|group| group.rules.len()).sum()
    }
}
