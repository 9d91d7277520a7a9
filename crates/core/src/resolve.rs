//! Recursive module resolution
//!
//! A `Session` owns all mutable state for one run: the stage buffers, the
//! processed-set, and the in-progress stack used for cycle detection.
//! Resolution is depth-first and deterministic: a module's dependencies
//! are fully resolved, and their fragments emitted, before the module's
//! own steps, and a module is processed at most once per run no matter
//! how many dependents it has.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use modgen_platform::{OsProfile, Target};

use crate::buffer::StageBuffers;
use crate::compose;
use crate::emit;
use crate::error::{CoreError, Result};
use crate::module::{ModuleDef, ModuleRegistry};
use crate::params;
use crate::stage;
use crate::step::Step;

/// One resolution run over a module registry
pub struct Session<'a> {
  registry: &'a ModuleRegistry,
  profile: OsProfile,
  output_dir: PathBuf,
  buffers: StageBuffers,
  /// Modules fully resolved this run
  processed: HashSet<String>,
  /// Modules currently being resolved, outermost first
  in_progress: Vec<String>,
}

impl<'a> Session<'a> {
  pub fn new(registry: &'a ModuleRegistry, profile: OsProfile, output_dir: impl Into<PathBuf>) -> Self {
    Self {
      registry,
      profile,
      output_dir: output_dir.into(),
      buffers: StageBuffers::new(),
      processed: HashSet::new(),
      in_progress: Vec::new(),
    }
  }

  pub fn target(&self) -> Target {
    self.profile.target
  }

  /// Number of modules fully resolved so far
  pub fn resolved_count(&self) -> usize {
    self.processed.len()
  }

  /// Resolve one requested module and everything it depends on.
  ///
  /// Already-resolved modules are skipped, so requesting a module twice,
  /// or requesting two modules that share a dependency, emits each
  /// module's fragments exactly once, in first-visited order.
  pub fn resolve(&mut self, name: &str) -> Result<()> {
    let registry = self.registry;
    let module = registry
      .get(name)
      .ok_or_else(|| CoreError::UnknownModule(name.to_string()))?;
    self.resolve_module(module)
  }

  fn resolve_module(&mut self, module: &ModuleDef) -> Result<()> {
    let name = module.name();
    if self.processed.contains(name) {
      return Ok(());
    }
    if self.in_progress.iter().any(|n| n == name) {
      let mut chain = self.in_progress.clone();
      chain.push(name.to_string());
      return Err(CoreError::DependencyCycle { chain });
    }

    let target = self.target();
    if !module.supports(target) {
      return Err(CoreError::UnsupportedTarget {
        module: name.to_string(),
        target,
      });
    }

    self.in_progress.push(name.to_string());
    self.resolve_dependencies(module)?;

    debug!(module = name, target = %target, "emitting");
    stage::stage_files(module, target, &self.output_dir)?;
    emit::emit_step(module, target, Step::PreInstall, &mut self.buffers)?;
    emit::emit_install(module, target, &self.profile, &mut self.buffers)?;
    emit::emit_step(module, target, Step::PostInstall, &mut self.buffers)?;

    self.in_progress.pop();
    self.processed.insert(name.to_string());
    Ok(())
  }

  fn resolve_dependencies(&mut self, module: &ModuleDef) -> Result<()> {
    let Some(value) = params::lookup(module, self.target().as_str(), &["dependencies"])? else {
      return Ok(());
    };

    let registry = self.registry;
    for dependency in params::string_list(value) {
      let dep = registry
        .get(&dependency)
        .filter(|dep| dep.supports(self.target()))
        .ok_or_else(|| CoreError::MissingDependency {
          module: module.name().to_string(),
          dependency: dependency.clone(),
        })?;
      self.resolve_module(dep)?;
    }
    Ok(())
  }

  /// Drain the buffers into executable scripts under the output directory.
  ///
  /// Consumes the session: composition happens once, only after every
  /// requested module has resolved.
  pub fn compose(self) -> Result<Vec<PathBuf>> {
    compose::write_scripts(self.buffers, &self.output_dir, &self.profile)
  }

  pub fn output_dir(&self) -> &Path {
    &self.output_dir
  }
}
