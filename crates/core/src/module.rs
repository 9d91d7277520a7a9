//! Module documents and the registry they are loaded into
//!
//! A module is one YAML file mapping target-OS names to that target's
//! configuration block. The document is kept as a generic mapping rather
//! than a typed struct: parameter resolution is path-based and `inherit`
//! fallbacks apply at arbitrary depths, so the tree shape matters more
//! than field names. Schema validation is out of scope.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde_yaml::{Mapping, Value};
use tracing::{debug, warn};
use walkdir::WalkDir;

use modgen_platform::Target;

use crate::error::{CoreError, Result};

/// One module definition, identified by its source file's stem
#[derive(Debug, Clone)]
pub struct ModuleDef {
  name: String,
  doc: Mapping,
}

impl ModuleDef {
  /// Build a module from an already-parsed document
  pub fn new(name: impl Into<String>, doc: Mapping) -> Self {
    Self {
      name: name.into(),
      doc,
    }
  }

  /// Load a module from a YAML file; the module name is the file stem
  pub fn from_path(path: &Path) -> Result<Self> {
    let load_err = |message: String| CoreError::Load {
      path: path.to_path_buf(),
      message,
    };

    let name = path
      .file_stem()
      .and_then(|s| s.to_str())
      .ok_or_else(|| load_err("file name is not valid UTF-8".to_string()))?;
    let text = fs::read_to_string(path).map_err(|e| load_err(e.to_string()))?;
    let doc: Value = serde_yaml::from_str(&text).map_err(|e| load_err(e.to_string()))?;
    let Value::Mapping(doc) = doc else {
      return Err(load_err("module document is not a mapping".to_string()));
    };

    Ok(Self::new(name, doc))
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  /// The configuration block for one target, if declared
  pub fn target_block(&self, target: &str) -> Option<&Value> {
    self.doc.get(target)
  }

  /// Whether this module declares a block for `target`
  pub fn supports(&self, target: Target) -> bool {
    self.target_block(target.as_str()).is_some()
  }
}

/// All modules known to a run, keyed by name
///
/// Loaded once at startup and immutable afterwards; a `BTreeMap` keeps
/// listings deterministic.
#[derive(Debug, Default)]
pub struct ModuleRegistry {
  modules: BTreeMap<String, ModuleDef>,
}

impl ModuleRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Recursively discover and load `*.yml`/`*.yaml` files under `root`.
  ///
  /// The walk order is sorted so discovery is deterministic. Duplicate
  /// module names keep the first file found; later ones are skipped with
  /// a warning.
  ///
  /// # Errors
  ///
  /// Returns `Load` if a candidate file cannot be read or parsed, or `Io`
  /// if the directory walk itself fails.
  pub fn discover(root: &Path) -> Result<Self> {
    let mut registry = Self::new();

    for entry in WalkDir::new(root).sort_by_file_name() {
      let entry = entry.map_err(std::io::Error::from)?;
      if !entry.file_type().is_file() {
        continue;
      }
      let ext = entry.path().extension().and_then(|e| e.to_str());
      if !matches!(ext, Some("yml") | Some("yaml")) {
        continue;
      }

      let module = ModuleDef::from_path(entry.path())?;
      if registry.modules.contains_key(module.name()) {
        warn!(module = module.name(), path = %entry.path().display(), "duplicate module name, skipping");
        continue;
      }
      debug!(module = module.name(), path = %entry.path().display(), "loaded");
      registry.insert(module);
    }

    Ok(registry)
  }

  pub fn insert(&mut self, module: ModuleDef) {
    self.modules.insert(module.name().to_string(), module);
  }

  pub fn get(&self, name: &str) -> Option<&ModuleDef> {
    self.modules.get(name)
  }

  /// All modules in name order
  pub fn modules(&self) -> impl Iterator<Item = &ModuleDef> {
    self.modules.values()
  }

  pub fn len(&self) -> usize {
    self.modules.len()
  }

  pub fn is_empty(&self) -> bool {
    self.modules.is_empty()
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;

  fn write_module(dir: &Path, name: &str, content: &str) {
    fs::write(dir.join(name), content).unwrap();
  }

  #[test]
  fn from_path_uses_file_stem_as_name() {
    let temp = TempDir::new().unwrap();
    write_module(temp.path(), "git.yml", "debian:\n  install:\n    packages: git\n");

    let module = ModuleDef::from_path(&temp.path().join("git.yml")).unwrap();
    assert_eq!(module.name(), "git");
    assert!(module.supports(Target::Debian));
    assert!(!module.supports(Target::Arch));
  }

  #[test]
  fn from_path_rejects_non_mapping_documents() {
    let temp = TempDir::new().unwrap();
    write_module(temp.path(), "bad.yml", "- just\n- a\n- list\n");

    let err = ModuleDef::from_path(&temp.path().join("bad.yml")).unwrap_err();
    assert!(matches!(err, CoreError::Load { .. }));
  }

  #[test]
  fn from_path_rejects_invalid_yaml() {
    let temp = TempDir::new().unwrap();
    write_module(temp.path(), "bad.yml", "debian: [unclosed\n");

    let err = ModuleDef::from_path(&temp.path().join("bad.yml")).unwrap_err();
    assert!(matches!(err, CoreError::Load { .. }));
  }

  #[test]
  fn discover_walks_subdirectories() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("shell")).unwrap();
    write_module(temp.path(), "git.yml", "debian: {}\n");
    write_module(&temp.path().join("shell"), "zsh.yaml", "debian: {}\n");

    let registry = ModuleRegistry::discover(temp.path()).unwrap();
    assert_eq!(registry.len(), 2);
    assert!(registry.get("git").is_some());
    assert!(registry.get("zsh").is_some());
  }

  #[test]
  fn discover_ignores_other_extensions() {
    let temp = TempDir::new().unwrap();
    write_module(temp.path(), "git.yml", "debian: {}\n");
    write_module(temp.path(), "notes.txt", "not yaml\n");

    let registry = ModuleRegistry::discover(temp.path()).unwrap();
    assert_eq!(registry.len(), 1);
  }

  #[test]
  fn discover_keeps_first_of_duplicate_names() {
    let temp = TempDir::new().unwrap();
    fs::create_dir(temp.path().join("vendor")).unwrap();
    write_module(temp.path(), "git.yml", "debian: {}\n");
    write_module(&temp.path().join("vendor"), "git.yml", "arch: {}\n");

    let registry = ModuleRegistry::discover(temp.path()).unwrap();
    assert_eq!(registry.len(), 1);
    // Sorted walk visits the root file before the vendor subdirectory
    assert!(registry.get("git").unwrap().supports(Target::Debian));
  }
}
