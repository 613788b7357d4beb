// hardpatch/src/lib.rs
//! # hardpatch CLI
//!
//! Command-line front-end for `hardpatch-core`: loads a patcher config
//! directory and rewrites text read from a file or stdin.

pub mod cli;
pub mod commands;
pub mod logger;
pub mod output;
