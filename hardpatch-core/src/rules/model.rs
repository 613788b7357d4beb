// hardpatch-core/src/rules/model.rs
//! Defines the rule data model.
//!
//! Rule files encode modes with sentinel characters: a leading `@` on a value
//! marks a semi-match, `@@` escapes a literal `@`, and a leading `#` or `@` on
//! a target class name selects suffix or prefix matching. Those encodings are
//! decoded exactly once, when a `RuleRecord` becomes a `Rule`.
//!
//! License: MIT OR APACHE 2.0

use serde::{Deserialize, Serialize};

/// Leading character of a semi-match value and of a prefix target.
pub const SENTINEL: char = '@';
/// A doubled sentinel, standing for one literal `@`.
pub const ESCAPED_SENTINEL: &str = "@@";
/// Leading character of a suffix target.
pub const SUFFIX_MARKER: char = '#';

/// The target object of a rule as it appears in a rule file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TargetRecord {
    pub class_name: String,
    pub stack_depth: i32,
}

/// A rule entry as it appears in a rule file.
///
/// Every field defaults, so structurally incomplete entries still load and
/// are then ignored at match time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct RuleRecord {
    pub key: String,
    pub value: String,
    #[serde(alias = "targetClass", alias = "target_class")]
    pub target: TargetRecord,
}

/// How the class name of a stack frame is compared against a target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TargetMode {
    /// `#suffix`: frame class must end with the (lowercased) suffix, ignoring case.
    Suffix(String),
    /// `@prefix`: frame class must start with the (lowercased) prefix, ignoring case.
    Prefix(String),
    /// Frame class must equal the name exactly.
    Exact(String),
}

impl TargetMode {
    pub fn parse(class_name: &str) -> Self {
        if let Some(suffix) = class_name.strip_prefix(SUFFIX_MARKER) {
            TargetMode::Suffix(suffix.to_lowercase())
        } else if let Some(prefix) = class_name.strip_prefix(SENTINEL) {
            TargetMode::Prefix(prefix.to_lowercase())
        } else {
            TargetMode::Exact(class_name.to_string())
        }
    }

    /// Tests a single frame's class name against this mode.
    pub fn matches(&self, frame_class: &str) -> bool {
        match self {
            TargetMode::Suffix(suffix) => frame_class.to_lowercase().ends_with(suffix.as_str()),
            TargetMode::Prefix(prefix) => frame_class.to_lowercase().starts_with(prefix.as_str()),
            TargetMode::Exact(name) => frame_class == name,
        }
    }
}

/// The call-context constraint of a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetSpec {
    /// The class name exactly as written in the rule file, markers included.
    pub class_name: String,
    pub stack_depth: i32,
    pub mode: TargetMode,
}

impl TargetSpec {
    pub fn new(class_name: impl Into<String>, stack_depth: i32) -> Self {
        let class_name = class_name.into();
        let mode = TargetMode::parse(&class_name);
        Self { class_name, stack_depth, mode }
    }

    /// A target that never restricts its rule.
    pub fn unconstrained() -> Self {
        Self::new("", 0)
    }

    /// False when the class name is empty or the depth is not positive, in
    /// which case the rule applies regardless of the call stack.
    pub fn is_constrained(&self) -> bool {
        !self.class_name.is_empty() && self.stack_depth > 0
    }
}

impl Default for TargetSpec {
    fn default() -> Self {
        Self::unconstrained()
    }
}

/// What a rule's value asks the renderer to do, with the sentinels decoded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValueKind {
    /// `@@...`: the whole text is replaced by the localized value, which is
    /// looked up exactly as written, escape included.
    Literal(String),
    /// `@...`: only the key inside the text is replaced by the localized reference.
    SemiMatch(String),
    /// Anything else: the whole text is replaced by the localized value.
    FullLocalized(String),
}

impl ValueKind {
    pub fn parse(value: &str) -> Self {
        if value.starts_with(ESCAPED_SENTINEL) {
            ValueKind::Literal(value.to_string())
        } else if value.starts_with(SENTINEL) {
            let unescaped = value.replace(ESCAPED_SENTINEL, "@");
            ValueKind::SemiMatch(unescaped[SENTINEL.len_utf8()..].to_string())
        } else {
            ValueKind::FullLocalized(value.to_string())
        }
    }

    /// The localization reference handed to the localizer.
    pub fn reference(&self) -> &str {
        match self {
            ValueKind::Literal(r) | ValueKind::SemiMatch(r) | ValueKind::FullLocalized(r) => r,
        }
    }

    /// Rules whose value starts with the sentinel are accepted when their key
    /// is merely contained in the text; all others need full equality.
    pub fn selects_by_containment(&self) -> bool {
        matches!(self, ValueKind::Literal(_) | ValueKind::SemiMatch(_))
    }
}

/// A compiled replacement rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rule {
    pub key: String,
    /// The raw value from the rule file.
    pub value: String,
    pub kind: ValueKind,
    pub target: TargetSpec,
}

impl Rule {
    pub fn new(key: impl Into<String>, value: impl Into<String>, target: TargetSpec) -> Self {
        let value = value.into();
        let kind = ValueKind::parse(&value);
        Self { key: key.into(), value, kind, target }
    }

    /// A rule without a key or value can never apply.
    pub fn is_inert(&self) -> bool {
        self.key.is_empty() || self.value.is_empty()
    }
}

impl From<RuleRecord> for Rule {
    fn from(record: RuleRecord) -> Self {
        let target = TargetSpec::new(record.target.class_name, record.target.stack_depth);
        Rule::new(record.key, record.value, target)
    }
}
