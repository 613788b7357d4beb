// hardpatch/src/output.rs
//! Status messages on stderr, colored when stderr is a terminal.

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;
use std::io::{self, Write};

fn write_prefixed(prefix: &str, msg: &str, color: fn(&str) -> String) {
    let mut stderr = io::stderr();
    let tag = if stderr.is_terminal() { color(prefix) } else { prefix.to_string() };
    let _ = writeln!(stderr, "{} {}", tag, msg);
}

/// Prints an informational message to stderr.
pub fn info_msg(msg: impl AsRef<str>) {
    write_prefixed("[info]", msg.as_ref(), |s| s.cyan().to_string());
}

/// Prints a warning message to stderr.
pub fn warn_msg(msg: impl AsRef<str>) {
    write_prefixed("[warn]", msg.as_ref(), |s| s.yellow().to_string());
}
