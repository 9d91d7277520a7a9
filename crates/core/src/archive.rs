//! Tarball packaging of a finished output directory

use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};

use flate2::Compression;
use flate2::write::GzEncoder;
use tar::Builder;
use tracing::info;

use crate::error::Result;

/// Pack `output_dir` into `<name>.tar.gz` next to it, archived under the
/// directory's base name. Returns the tarball path.
pub fn pack(output_dir: &Path, name: &str) -> Result<PathBuf> {
  let base = output_dir
    .file_name()
    .ok_or_else(|| io::Error::new(io::ErrorKind::InvalidInput, "output directory has no base name"))?;
  let parent = match output_dir.parent() {
    Some(parent) if parent != Path::new("") => parent,
    _ => Path::new("."),
  };

  let tar_path = parent.join(format!("{name}.tar.gz"));
  let file = File::create(&tar_path)?;
  let encoder = GzEncoder::new(file, Compression::default());
  let mut builder = Builder::new(encoder);
  builder.append_dir_all(base, output_dir)?;
  builder.into_inner()?.finish()?;

  info!(tarball = %tar_path.display(), "packed");
  Ok(tar_path)
}
