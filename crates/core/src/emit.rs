//! Step emission into shared stage buffers
//!
//! One call per module/target/step triple. A step that is not declared
//! touches no buffer at all, so composed scripts never contain empty
//! fragments.

use std::fs;
use std::io;

use serde_yaml::Value;

use modgen_platform::{OsProfile, Target};

use crate::buffer::{StageBuffers, StageKey};
use crate::error::{CoreError, Result};
use crate::module::ModuleDef;
use crate::params;
use crate::stage::expand_user;
use crate::step::Step;

/// Emit a pre-install or post-install step for one module, if declared.
///
/// Appends, in fixed order: a comment naming the module and priority, an
/// optional echo line, an optional inline command (trailing whitespace
/// trimmed), and an optional external script's contents prefixed by a
/// comment naming the script file.
pub fn emit_step(module: &ModuleDef, target: Target, step: Step, buffers: &mut StageBuffers) -> Result<()> {
  let name = target.as_str();
  if params::lookup(module, name, &[step.as_str()])?.is_none() {
    return Ok(());
  }

  let priority = params::priority_of(module, target, step)?;
  let stage = params::stage_of(module, target, step)?;
  let key = StageKey::new(stage, step, priority);

  buffers.append(&key, &format!("\n# {} {} (priority: {})\n", module.name(), step, priority))?;

  if let Some(echo) = params::lookup(module, name, &[step.as_str(), "echo"])?.and_then(Value::as_str) {
    buffers.append(&key, &format!("echo \"{echo}\"\n"))?;
  }

  if let Some(command) = params::lookup(module, name, &[step.as_str(), "command"])?.and_then(Value::as_str) {
    buffers.append(&key, &format!("{}\n", command.trim_end()))?;
  }

  if let Some(script) = params::lookup(module, name, &[step.as_str(), "script"])?.and_then(Value::as_str) {
    let path = expand_user(script);
    let contents = match fs::read_to_string(&path) {
      Ok(contents) => contents,
      Err(e) if e.kind() == io::ErrorKind::NotFound => {
        return Err(CoreError::MissingFile {
          module: module.name().to_string(),
          path,
        });
      }
      Err(e) => return Err(e.into()),
    };
    let base = path
      .file_name()
      .map(|f| f.to_string_lossy().into_owned())
      .unwrap_or_else(|| script.to_string());
    buffers.append(&key, &format!("\n# {base}\n{contents}\n"))?;
  }

  Ok(())
}

/// Emit the package-install step for one module, if declared.
///
/// The first module to reach a given (stage, install, priority) key seeds
/// the buffer with a comment and the OS install command; every contributor
/// then appends its package list to that same line, so modules sharing a
/// key accumulate one combined install command.
pub fn emit_install(
  module: &ModuleDef,
  target: Target,
  profile: &OsProfile,
  buffers: &mut StageBuffers,
) -> Result<()> {
  let name = target.as_str();
  if params::lookup(module, name, &[Step::Install.as_str()])?.is_none() {
    return Ok(());
  }

  let priority = params::priority_of(module, target, Step::Install)?;
  let stage = params::stage_of(module, target, Step::Install)?;
  let key = StageKey::new(stage, Step::Install, priority);

  if !buffers.contains(&key) {
    buffers.append(
      &key,
      &format!("# Package install (priority: {})\n{}", priority, profile.install_command),
    )?;
  }

  if let Some(value) = params::lookup(module, name, &[Step::Install.as_str(), "packages"])? {
    let packages = params::string_list(value);
    if !packages.is_empty() {
      buffers.append(&key, &format!(" {}", packages.join(" ")))?;
    }
  }

  Ok(())
}
