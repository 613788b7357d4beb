// hardpatch/src/main.rs
//! hardpatch entry point.

use anyhow::Result;
use clap::Parser;
use std::io;

use hardpatch::cli::{Cli, Commands};
use hardpatch::commands::{check::run_check, patch::run_patch};
use hardpatch::logger;

fn main() -> Result<()> {
    let args = Cli::parse();
    logger::init_logger(logger::level_from_flags(args.quiet, args.debug));

    let mut stdout = io::stdout().lock();
    match &args.command {
        Commands::Patch(cmd) => run_patch(cmd, &mut stdout),
        Commands::Check(cmd) => run_check(cmd, &mut stdout),
    }
}
