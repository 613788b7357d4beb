// hardpatch-core/src/lib.rs
//! # hardpatch Core Library
//!
//! `hardpatch-core` rewrites strings that a host application hardcodes into
//! its rendering or logging paths. Rules are indexed by an anchor substring,
//! optionally scoped to the calling class via a call-stack snapshot, and
//! rendered through a pluggable localizer.
//!
//! ## Modules
//!
//! * `config`: `PatcherConfig`, the debug switch, and the stack scan window.
//! * `rules`: rule records, the rule-file loader, and the `RuleStore` index.
//! * `stack`: `StackFrame` and the `StackMatcher` target checks.
//! * `similarity`: Levenshtein distance and the similarity ratio.
//! * `render`: produces replacement text and diagnostic markers.
//! * `localize`: the `Localizer` trait and its stock implementations.
//! * `export`: the deduplicating `ExportTracker`.
//! * `engine`: `PatchEngine`, which ties everything together.
//! * `headless`: one-shot helpers for non-host use.
//!
//! ## Usage Example
//!
//! ```rust
//! use hardpatch_core::{PatchEngine, PatcherConfig, Rule, RuleStore, StackFrame, TargetSpec};
//!
//! let mut store = RuleStore::new();
//! store.insert(Rule::new("Start Game", "menu.start", TargetSpec::new("#TitleScreen", 2)));
//! store.insert(Rule::new("Coins", "@hud.coins", TargetSpec::unconstrained()));
//!
//! let translate = |key: &str| match key {
//!     "menu.start" => "Spiel starten".to_string(),
//!     "hud.coins" => "Münzen".to_string(),
//!     other => other.to_string(),
//! };
//! let engine = PatchEngine::new(store, &PatcherConfig::default(), Box::new(translate));
//!
//! let stack = vec![StackFrame::new("client.gui.TitleScreen")];
//! assert_eq!(engine.patch("Start Game", Some(&stack)).as_deref(), Some("Spiel starten"));
//! assert_eq!(engine.patch("Coins: 12", None).as_deref(), Some("Münzen: 12"));
//! assert_eq!(engine.patch("Unrelated", None), None);
//! assert!(engine.is_recorded("Unrelated"));
//! ```
//!
//! ## Error Handling
//!
//! Loading uses `anyhow::Result` with file context, backed by the structured
//! `PatcherError`. Patching itself never fails: `None` means "leave the text alone".
//!
//! License: MIT OR Apache-2.0

pub mod config;
pub mod engine;
pub mod errors;
pub mod export;
pub mod headless;
pub mod localize;
pub mod render;
pub mod rules;
pub mod similarity;
pub mod stack;

pub use config::{DebugConfig, OptimizeConfig, PatcherConfig, CONFIG_FILE_NAME, UNBOUNDED};
pub use engine::{PatchEngine, SkipReason, SkipStats};
pub use errors::PatcherError;
pub use export::ExportTracker;
pub use headless::{headless_patch_string, load_engine_from_dir, patch_lines};
pub use localize::{IdentityLocalizer, JsonLocalizer, Localizer};
pub use render::{render, RenderOptions, REPLACE_MARKER, SIMILAR_MARKER, SIMILARITY_THRESHOLD};
pub use rules::loader::{load_module_file, parse_module, ModuleInfo, RuleModule};
pub use rules::model::{Rule, RuleRecord, TargetMode, TargetRecord, TargetSpec, ValueKind};
pub use rules::store::RuleStore;
pub use similarity::{distance, similarity};
pub use stack::{StackFrame, StackMatcher};
