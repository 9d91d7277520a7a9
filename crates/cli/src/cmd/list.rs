//! Implementation of the `modgen list` command.

use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;

use modgen_core::ModuleRegistry;
use modgen_platform::Target;

use crate::output::{self, OutputFormat};

#[derive(Serialize)]
struct ModuleRow {
  name: String,
  targets: Vec<String>,
}

/// Execute the list command.
///
/// Shows every discovered module and the targets it supports, optionally
/// filtered to one target.
pub fn cmd_list(path: &Path, target: Option<Target>, format: OutputFormat) -> Result<()> {
  let registry = ModuleRegistry::discover(path)
    .with_context(|| format!("failed to load modules from {}", path.display()))?;

  let rows: Vec<ModuleRow> = registry
    .modules()
    .filter(|m| target.is_none_or(|t| m.supports(t)))
    .map(|m| ModuleRow {
      name: m.name().to_string(),
      targets: Target::ALL
        .iter()
        .filter(|t| m.supports(**t))
        .map(|t| t.to_string())
        .collect(),
    })
    .collect();

  if format.is_json() {
    return output::print_json(&rows);
  }

  if rows.is_empty() {
    output::print_info("No modules found");
    return Ok(());
  }

  println!("Modules under {}:", path.display());
  for row in rows {
    println!("  {} ({})", row.name, row.targets.join(", "));
  }
  Ok(())
}
