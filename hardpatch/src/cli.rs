// hardpatch/src/cli.rs
//! This file defines the command-line interface (CLI) for hardpatch,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "hardpatch",
    version = env!("CARGO_PKG_VERSION"),
    about = "Rewrite hardcoded strings through rule modules and a language file",
    arg_required_else_help = true,
)]
pub struct Cli {
    /// Disable all log output.
    #[arg(long, short = 'q', global = true, help = "Suppress all log output.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG).
    #[arg(long, short = 'd', global = true, help = "Enable debug logging.")]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `hardpatch` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Patches each line of an input file or stdin.
    #[command(about = "Patch each line of an input file or stdin.")]
    Patch(PatchCommand),

    /// Loads the config directory and lists its rule modules.
    #[command(about = "Validate a config directory and list its rule modules.")]
    Check(CheckCommand),
}

/// Arguments for the `patch` command.
#[derive(Parser, Debug)]
pub struct PatchCommand {
    /// Directory holding config.json and the rule modules.
    #[arg(long = "config-dir", value_name = "DIR", env = "HARDPATCH_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,

    /// Flat JSON language file used to resolve rule values.
    #[arg(long = "lang", value_name = "FILE")]
    pub lang: Option<PathBuf>,

    /// Path to an input file (reads from stdin if not provided).
    #[arg(long, short = 'i', value_name = "FILE")]
    pub input_file: Option<PathBuf>,

    /// Caller class names, innermost first, used as the stack snapshot for every line.
    #[arg(long, short = 's', value_delimiter = ',', value_name = "CLASS")]
    pub stack: Vec<String>,

    /// Force diagnostic markers on, regardless of config.json.
    #[arg(long = "test-mode")]
    pub test_mode: bool,

    /// Print every distinct input line to stderr after patching.
    #[arg(long)]
    pub export: bool,
}

/// Arguments for the `check` command.
#[derive(Parser, Debug)]
pub struct CheckCommand {
    /// Directory holding config.json and the rule modules.
    #[arg(long = "config-dir", value_name = "DIR", env = "HARDPATCH_CONFIG_DIR")]
    pub config_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_stack_is_comma_separated() {
        let cli = Cli::parse_from(["hardpatch", "patch", "--stack", "a.Inner,b.Outer", "--export"]);
        let Commands::Patch(cmd) = cli.command else {
            panic!("expected patch command");
        };
        assert_eq!(cmd.stack, vec!["a.Inner", "b.Outer"]);
        assert!(cmd.export);
        assert!(!cmd.test_mode);
    }
}
