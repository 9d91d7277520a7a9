//! Error types for modgen-core

use std::path::PathBuf;

use thiserror::Error;

use modgen_platform::Target;

/// Result type for core operations
pub type Result<T> = std::result::Result<T, CoreError>;

/// Errors that can occur while resolving modules and composing scripts
///
/// All of these are fatal to a run: the first one encountered aborts
/// resolution, and no scripts are written.
#[derive(Debug, Error)]
pub enum CoreError {
  /// A requested module name is not in the registry.
  #[error("unknown module '{0}'")]
  UnknownModule(String),

  /// A module has no configuration block for the requested target.
  #[error("module '{module}' has no configuration for target '{target}'")]
  UnsupportedTarget { module: String, target: Target },

  /// A declared dependency is not a known module for this target.
  #[error("module '{module}' depends on '{dependency}', which is not a known module for this target")]
  MissingDependency { module: String, dependency: String },

  /// A staged file or external script path does not exist.
  #[error("module '{module}' references '{path}', which does not exist")]
  MissingFile { module: String, path: PathBuf },

  /// A module source file could not be read or parsed.
  #[error("failed to load module file '{path}': {message}")]
  Load { path: PathBuf, message: String },

  /// A module's inherit chain revisits a target.
  #[error("module '{module}' has an inherit cycle: {}", .chain.join(" -> "))]
  InheritCycle { module: String, chain: Vec<String> },

  /// The module dependency graph contains a cycle.
  #[error("dependency cycle detected: {}", .chain.join(" -> "))]
  DependencyCycle { chain: Vec<String> },

  /// I/O error during staging or composition.
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}
