//! modgen-core: module resolution and script composition
//!
//! This crate turns per-module YAML documents into ordered shell scripts:
//! - `module`: module documents and the registry they are loaded into
//! - `params`: dotted-path parameter lookup with cross-target inheritance
//! - `resolve`: recursive dependency resolution with at-most-once processing
//! - `emit`: writing step fragments into shared stage buffers
//! - `compose`: draining buffers into executable scripts
//! - `stage`: copying a module's declared files into the output directory
//! - `archive`: tarball packaging of a finished output directory

pub mod archive;
pub mod buffer;
pub mod compose;
pub mod emit;
pub mod error;
pub mod module;
pub mod params;
pub mod resolve;
pub mod stage;
pub mod step;

pub use error::{CoreError, Result};
pub use module::{ModuleDef, ModuleRegistry};
pub use resolve::Session;
