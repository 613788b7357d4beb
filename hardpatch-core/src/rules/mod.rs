//! Rule records, their load-time compilation, and the anchor index used to
//! select candidate rules for a piece of text.
//!
//! * `model`: the typed `Rule`, `TargetSpec` and `ValueKind` representations.
//! * `loader`: parses module rule files into compiled rules.
//! * `store`: the longest-anchor-first `RuleStore`.

pub mod loader;
pub mod model;
pub mod store;
