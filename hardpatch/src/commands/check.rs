// hardpatch/src/commands/check.rs
//! `check` command: loads a config directory and reports its modules.

use anyhow::Result;
use std::io::Write;

use hardpatch_core::{load_module_file, PatcherConfig, CONFIG_FILE_NAME};

use crate::cli::CheckCommand;
use crate::commands::resolve_config_dir;
use crate::output::warn_msg;

/// Loads every module listed in the config and writes one summary line per module.
///
/// Fails on the first module that cannot be loaded.
pub fn run_check<W: Write>(cmd: &CheckCommand, out: &mut W) -> Result<()> {
    let dir = resolve_config_dir(cmd.config_dir.as_deref())?;
    let config = PatcherConfig::load_from_dir(&dir)?;

    if config.mods.is_empty() {
        warn_msg(format!("No modules listed in {}", dir.join(CONFIG_FILE_NAME).display()));
    }

    let mut total = 0usize;
    for name in &config.mods {
        let module = load_module_file(dir.join(name))?;
        let inert = module.rules.iter().filter(|rule| rule.is_inert()).count();
        let scoped = module.rules.iter().filter(|rule| rule.target.is_constrained()).count();
        writeln!(
            out,
            "{} ({}) version {}: {} rule(s), {} stack-scoped, {} inert",
            module.display_name(),
            name,
            module.info.version.as_deref().unwrap_or("-"),
            module.rules.len(),
            scoped,
            inert
        )?;
        total += module.rules.len();
    }
    writeln!(out, "{} module(s), {} rule(s)", config.mods.len(), total)?;
    Ok(())
}
