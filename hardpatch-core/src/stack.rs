// hardpatch-core/src/stack.rs
//! Call-stack scoping for rules with a target constraint.
//!
//! Two independent checks exist. The windowed scan narrows the snapshot to
//! the configured `[stack_min, stack_max)` window and compares only the first
//! frame of that window against the target's mode. The depth check ignores
//! the window and tests whether the frame at exactly `stack_depth` contains
//! the target's class name as written in the rule file.
//!
//! License: MIT OR APACHE 2.0

use log::trace;
use serde::{Deserialize, Serialize};

use crate::config::OptimizeConfig;
use crate::rules::model::TargetSpec;

/// One frame of a host call-stack snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StackFrame {
    pub class_name: String,
}

impl StackFrame {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self { class_name: class_name.into() }
    }
}

impl From<&str> for StackFrame {
    fn from(class_name: &str) -> Self {
        Self::new(class_name)
    }
}

/// Evaluates target constraints against stack snapshots.
#[derive(Debug, Clone, Copy, Default)]
pub struct StackMatcher {
    optimize: OptimizeConfig,
}

impl StackMatcher {
    pub fn new(optimize: OptimizeConfig) -> Self {
        Self { optimize }
    }

    pub fn optimize(&self) -> &OptimizeConfig {
        &self.optimize
    }

    /// Tests the first frame of the configured window against the target mode.
    ///
    /// An empty window never matches.
    pub fn window_matches(&self, target: &TargetSpec, stack: &[StackFrame]) -> bool {
        let window = self.optimize.window(stack.len());
        match stack[window].first() {
            Some(frame) => target.mode.matches(&frame.class_name),
            None => false,
        }
    }

    /// Tests whether the frame at `target.stack_depth` contains the target class name.
    ///
    /// Negative or out-of-range depths never match.
    pub fn depth_matches(&self, target: &TargetSpec, stack: &[StackFrame]) -> bool {
        usize::try_from(target.stack_depth)
            .ok()
            .and_then(|depth| stack.get(depth))
            .is_some_and(|frame| frame.class_name.contains(target.class_name.as_str()))
    }

    /// The windowed scan, falling back to the depth check for constrained targets.
    pub fn matches(&self, target: &TargetSpec, stack: &[StackFrame]) -> bool {
        if self.window_matches(target, stack) {
            trace!("Target '{}' satisfied by the stack window.", target.class_name);
            return true;
        }
        if target.is_constrained() && self.depth_matches(target, stack) {
            trace!("Target '{}' satisfied at depth {}.", target.class_name, target.stack_depth);
            return true;
        }
        false
    }
}
