//! loader.rs - Parses module rule files into compiled rules.
//!
//! A rule file is a JSON array. Its first element is the module header
//! (`ModuleInfo`); every following element is a rule record. Records are
//! compiled into `Rule`s here so sentinel decoding happens once per load.
//!
//! License: MIT OR APACHE 2.0

use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;

use crate::errors::PatcherError;
use crate::rules::model::{Rule, RuleRecord, SENTINEL, SUFFIX_MARKER};

/// The metadata header of a rule module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ModuleInfo {
    pub name: Option<String>,
    #[serde(alias = "desc")]
    pub description: Option<String>,
    pub version: Option<String>,
    pub authors: Option<String>,
}

/// One loaded rule file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleModule {
    /// The identifier the module was loaded under, usually its file name.
    pub source: String,
    pub info: ModuleInfo,
    /// Rules in file order.
    pub rules: Vec<Rule>,
}

impl RuleModule {
    /// The header name if present, else the source identifier.
    pub fn display_name(&self) -> &str {
        self.info.name.as_deref().unwrap_or(&self.source)
    }
}

/// Parses the text of a rule file.
pub fn parse_module(text: &str, source: &str) -> Result<RuleModule, PatcherError> {
    let document: Value = serde_json::from_str(text)?;
    let Value::Array(elements) = document else {
        return Err(PatcherError::MalformedRuleFile(
            source.to_string(),
            "expected a JSON array".to_string(),
        ));
    };

    let mut elements = elements.into_iter();
    let header = elements.next().ok_or_else(|| {
        PatcherError::MalformedRuleFile(source.to_string(), "missing module header".to_string())
    })?;
    let info: ModuleInfo = serde_json::from_value(header).map_err(|e| {
        PatcherError::MalformedRuleFile(source.to_string(), format!("invalid module header: {}", e))
    })?;

    let mut rules = Vec::new();
    for (index, element) in elements.enumerate() {
        let record: RuleRecord = serde_json::from_value(element).map_err(|e| {
            PatcherError::MalformedRuleFile(
                source.to_string(),
                format!("invalid rule at position {}: {}", index + 1, e),
            )
        })?;
        warn_on_bare_marker(source, &record);
        rules.push(Rule::from(record));
    }

    debug!("Parsed {} rule(s) from '{}'.", rules.len(), source);
    Ok(RuleModule {
        source: source.to_string(),
        info,
        rules,
    })
}

// A lone marker compiles to an empty needle that every frame satisfies.
fn warn_on_bare_marker(source: &str, record: &RuleRecord) {
    let class_name = record.target.class_name.as_str();
    if class_name.len() == 1 && (class_name.starts_with(SENTINEL) || class_name.starts_with(SUFFIX_MARKER)) {
        warn!(
            "Rule '{}' in '{}' targets the bare marker '{}'; it will match any caller class.",
            record.key, source, class_name
        );
    }
}

/// Reads and parses a rule file from disk.
pub fn load_module_file<P: AsRef<Path>>(path: P) -> Result<RuleModule> {
    let path = path.as_ref();
    info!("Loading rule module {}", path.display());
    let text = std::fs::read_to_string(path)
        .map_err(PatcherError::Io)
        .with_context(|| format!("Failed to read rule file {}", path.display()))?;
    let source = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let module = parse_module(&text, &source)
        .with_context(|| format!("Failed to parse rule file {}", path.display()))?;
    info!("Loaded module '{}' with {} rule(s).", module.display_name(), module.rules.len());
    Ok(module)
}
