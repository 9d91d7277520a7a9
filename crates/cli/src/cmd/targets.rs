//! Implementation of the `modgen targets` command.

use anyhow::Result;

use modgen_platform::{OsProfile, Target};

use crate::output::{self, OutputFormat};

/// Execute the targets command, printing the supported-OS table.
pub fn cmd_targets(format: OutputFormat) -> Result<()> {
  let profiles: Vec<OsProfile> = Target::ALL.iter().copied().map(OsProfile::of).collect();

  if format.is_json() {
    return output::print_json(&profiles);
  }

  for profile in profiles {
    println!("{}", profile.target);
    println!("  install: {}", profile.install_command);
    println!("  update:  {}", profile.update_command);
  }
  Ok(())
}
