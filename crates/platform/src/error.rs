//! Error types for modgen-platform

use thiserror::Error;

/// Errors that can occur in platform operations
#[derive(Debug, Error)]
pub enum PlatformError {
  #[error("unknown target '{0}', expected one of: debian, arch, fedora, macos")]
  UnknownTarget(String),
}
