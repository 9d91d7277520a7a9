//! Implementation of the `modgen generate` command.
//!
//! Discovers modules under the search path, resolves the requested set
//! (dependencies first, each module at most once), and composes the
//! resulting fragments into executable install scripts.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use tracing::debug;

use modgen_core::{ModuleRegistry, Session, archive};
use modgen_platform::{OsProfile, Target};

use crate::output;

/// Execute the generate command.
///
/// An empty `modules` list selects every discovered module that supports
/// the target. All requested names are validated before any resolution
/// starts, and scripts are only written once every module has resolved.
pub fn cmd_generate(
  target: Target,
  path: &Path,
  modules: &[String],
  output_dir: &Path,
  tar: Option<&str>,
) -> Result<()> {
  let registry = ModuleRegistry::discover(path)
    .with_context(|| format!("failed to load modules from {}", path.display()))?;
  debug!(count = registry.len(), "modules discovered");

  let selected: Vec<String> = if modules.is_empty() {
    registry
      .modules()
      .filter(|m| m.supports(target))
      .map(|m| m.name().to_string())
      .collect()
  } else {
    modules.to_vec()
  };
  if selected.is_empty() {
    bail!("no modules for target '{}' under {}", target, path.display());
  }

  for name in &selected {
    let module = registry
      .get(name)
      .with_context(|| format!("'{}' is not a known module under {}", name, path.display()))?;
    if !module.supports(target) {
      bail!("module '{}' has no configuration for target '{}'", name, target);
    }
  }

  fs::create_dir_all(output_dir)
    .with_context(|| format!("failed to create output directory {}", output_dir.display()))?;

  let mut session = Session::new(&registry, OsProfile::of(target), output_dir);
  for name in &selected {
    session
      .resolve(name)
      .with_context(|| format!("failed to resolve module '{}'", name))?;
  }
  let resolved = session.resolved_count();
  let scripts = session.compose().context("failed to compose scripts")?;

  println!();
  output::print_success(&format!("Generated {} script(s) for {}", scripts.len(), target));
  output::print_stat("Modules resolved", &resolved.to_string());
  for script in &scripts {
    output::print_stat("Script", &script.display().to_string());
  }

  if let Some(name) = tar {
    let tarball = archive::pack(output_dir, name).context("failed to pack tarball")?;
    output::print_stat("Tarball", &tarball.display().to_string());
  }

  Ok(())
}
