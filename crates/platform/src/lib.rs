//! Target-OS vocabulary for modgen
//!
//! This crate provides the supported-target table:
//! - `Target`: operating systems install scripts can be generated for
//! - `OsProfile`: per-target package install/update command strings

mod error;
mod profile;
mod target;

pub use error::PlatformError;
pub use profile::OsProfile;
pub use target::Target;
