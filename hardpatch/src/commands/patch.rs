// hardpatch/src/commands/patch.rs
//! `patch` command: rewrites each input line through the configured rules.

use anyhow::{Context, Result};
use log::{debug, info};
use std::fs;
use std::io::{self, Read, Write};

use hardpatch_core::{
    patch_lines, IdentityLocalizer, JsonLocalizer, Localizer, PatchEngine, PatcherConfig, RuleStore, SkipReason,
    StackFrame,
};

use crate::cli::PatchCommand;
use crate::commands::resolve_config_dir;
use crate::output::info_msg;

/// Runs the `patch` command, writing patched text to `out`.
pub fn run_patch<W: Write>(cmd: &PatchCommand, out: &mut W) -> Result<()> {
    let dir = resolve_config_dir(cmd.config_dir.as_deref())?;
    let mut config = PatcherConfig::load_from_dir(&dir)?;
    if cmd.test_mode {
        debug!("Test mode forced on from the command line.");
        config.debug_mode.test_mode = true;
    }

    let store = RuleStore::load_modules(&dir, &config.mods)
        .with_context(|| format!("Failed to load rule modules from {}", dir.display()))?;
    let localizer: Box<dyn Localizer> = match &cmd.lang {
        Some(path) => Box::new(JsonLocalizer::load_from_file(path)?),
        None => Box::new(IdentityLocalizer),
    };
    let engine = PatchEngine::new(store, &config, localizer);

    let input = read_input(cmd)?;
    let frames: Vec<StackFrame> = cmd.stack.iter().map(|class| StackFrame::new(class.as_str())).collect();
    let stack = if frames.is_empty() { None } else { Some(frames.as_slice()) };

    let patched = patch_lines(&engine, &input, stack);
    out.write_all(patched.as_bytes()).context("Failed to write output")?;
    out.flush()?;

    let skips = engine.skip_stats();
    info!(
        "Skipped candidates: {} exact mismatch, {} inert, {} stack mismatch.",
        skips.get(SkipReason::ExactMismatch),
        skips.get(SkipReason::Inert),
        skips.get(SkipReason::StackMismatch)
    );

    if cmd.export {
        print_exports(&engine);
    }
    Ok(())
}

fn read_input(cmd: &PatchCommand) -> Result<String> {
    match &cmd.input_file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).context("Failed to read stdin")?;
            Ok(buffer)
        }
    }
}

fn print_exports(engine: &PatchEngine) {
    let entries = engine.exports().entries();
    info_msg(format!("{} distinct line(s) observed:", entries.len()));
    let mut stderr = io::stderr();
    for entry in entries {
        let _ = writeln!(stderr, "{}", entry);
    }
}
