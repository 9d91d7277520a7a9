//! Staging of module files into the output directory
//!
//! Each module may declare a `files` list per target; those paths are
//! copied next to the generated scripts so the output directory is a
//! self-contained install bundle.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use modgen_platform::Target;

use crate::error::{CoreError, Result};
use crate::module::ModuleDef;
use crate::params;

/// Expand a leading `~` to the user's home directory
pub fn expand_user(path: &str) -> PathBuf {
  if path == "~" {
    if let Some(home) = dirs::home_dir() {
      return home;
    }
  }
  if let Some(rest) = path.strip_prefix("~/") {
    if let Some(home) = dirs::home_dir() {
      return home.join(rest);
    }
  }
  PathBuf::from(path)
}

/// Copy a module's declared files and directories into `output_dir`.
///
/// Directories are copied recursively with symlinks preserved as symlinks.
/// A missing source path is fatal for the whole run.
pub fn stage_files(module: &ModuleDef, target: Target, output_dir: &Path) -> Result<()> {
  let Some(value) = params::lookup(module, target.as_str(), &["files"])? else {
    return Ok(());
  };

  for declared in params::string_list(value) {
    let source = expand_user(&declared);
    let missing = || CoreError::MissingFile {
      module: module.name().to_string(),
      path: source.clone(),
    };

    if source.symlink_metadata().is_err() {
      return Err(missing());
    }
    let base = source.file_name().ok_or_else(missing)?;
    let dest = output_dir.join(base);

    if source.is_dir() {
      copy_dir(&source, &dest)?;
    } else {
      fs::copy(&source, &dest)?;
    }
    debug!(module = module.name(), source = %source.display(), "staged");
  }

  Ok(())
}

/// Recursive directory copy, preserving symlinks as symlinks
fn copy_dir(source: &Path, dest: &Path) -> Result<()> {
  for entry in WalkDir::new(source).follow_links(false) {
    let entry = entry.map_err(io::Error::from)?;
    let Ok(rel) = entry.path().strip_prefix(source) else {
      continue;
    };
    let target_path = dest.join(rel);

    let file_type = entry.file_type();
    if file_type.is_symlink() {
      let link = fs::read_link(entry.path())?;
      make_symlink(&link, &target_path)?;
    } else if file_type.is_dir() {
      fs::create_dir_all(&target_path)?;
    } else {
      fs::copy(entry.path(), &target_path)?;
    }
  }
  Ok(())
}

#[cfg(unix)]
fn make_symlink(link: &Path, at: &Path) -> Result<()> {
  std::os::unix::fs::symlink(link, at)?;
  Ok(())
}

#[cfg(windows)]
fn make_symlink(link: &Path, at: &Path) -> Result<()> {
  if link.is_dir() {
    std::os::windows::fs::symlink_dir(link, at)?;
  } else {
    std::os::windows::fs::symlink_file(link, at)?;
  }
  Ok(())
}
