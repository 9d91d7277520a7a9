//! Parameter lookup with cross-target inheritance
//!
//! Parameters are resolved by walking a module document along a key path
//! rooted at a target name. When any segment of the path is missing and the
//! rooted target's block declares `inherit: other`, the same trailing path
//! is retried rooted at `other`, within the same module. Chains of inherit
//! references are followed with an explicit visited set, so a cycle fails
//! with `InheritCycle` instead of recursing forever.
//!
//! `priority` and `stage` get one extra fallback hop, from the step block
//! to the target block, before their hardcoded defaults apply.

use serde_yaml::Value;

use modgen_platform::Target;

use crate::error::{CoreError, Result};
use crate::module::ModuleDef;
use crate::step::Step;

/// Key under which a target block names its fallback target
const INHERIT_KEY: &str = "inherit";

/// Fragment priority for steps that do not declare one
pub const DEFAULT_PRIORITY: i64 = 10;

/// Look up `path` rooted at `target`, following inherit references when a
/// segment is missing. Returns `None` when no target along the inherit
/// chain defines the path.
pub fn lookup<'a>(module: &'a ModuleDef, target: &str, path: &[&str]) -> Result<Option<&'a Value>> {
  let mut visited = vec![target.to_string()];
  lookup_from(module, target, path, &mut visited)
}

fn lookup_from<'a>(
  module: &'a ModuleDef,
  target: &str,
  path: &[&str],
  visited: &mut Vec<String>,
) -> Result<Option<&'a Value>> {
  if let Some(block) = module.target_block(target) {
    let mut value = Some(block);
    for key in path {
      value = value.and_then(|v| v.get(*key));
    }
    if let Some(value) = value {
      return Ok(Some(value));
    }
  }

  let inherit = module
    .target_block(target)
    .and_then(|block| block.get(INHERIT_KEY))
    .and_then(Value::as_str);
  match inherit {
    Some(next) => {
      if visited.iter().any(|seen| seen == next) {
        visited.push(next.to_string());
        return Err(CoreError::InheritCycle {
          module: module.name().to_string(),
          chain: visited.clone(),
        });
      }
      visited.push(next.to_string());
      lookup_from(module, next, path, visited)
    }
    None => Ok(None),
  }
}

/// Fragment priority for `step`: the step block's value, then the target
/// block's, then `DEFAULT_PRIORITY`. Non-integer values are ignored.
pub fn priority_of(module: &ModuleDef, target: Target, step: Step) -> Result<i64> {
  let name = target.as_str();
  for path in [&[step.as_str(), "priority"][..], &["priority"][..]] {
    if let Some(priority) = lookup(module, name, path)?.and_then(Value::as_i64) {
      return Ok(priority);
    }
  }
  Ok(DEFAULT_PRIORITY)
}

/// Output script name for `step`, with the same fallback chain as
/// `priority_of` and a `<target>-install.sh` default.
pub fn stage_of(module: &ModuleDef, target: Target, step: Step) -> Result<String> {
  let name = target.as_str();
  for path in [&[step.as_str(), "stage"][..], &["stage"][..]] {
    if let Some(stage) = lookup(module, name, path)?.and_then(Value::as_str) {
      return Ok(stage.to_string());
    }
  }
  Ok(target.default_stage())
}

/// Flatten a string-or-sequence parameter to a list of strings.
///
/// Non-string sequence elements are dropped; any other value shape yields
/// an empty list.
pub fn string_list(value: &Value) -> Vec<String> {
  match value {
    Value::String(s) => vec![s.clone()],
    Value::Sequence(seq) => seq
      .iter()
      .filter_map(Value::as_str)
      .map(str::to_string)
      .collect(),
    _ => Vec::new(),
  }
}
