//! Script composition
//!
//! Drains the stage buffers into one executable shell script per stage.
//! Fragment order inside a script is governed by a single rule:
//! `3 * priority + step offset`, ascending. Lower priority always runs
//! first; within one priority, pre-install precedes install precedes
//! post-install.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::info;

use modgen_platform::OsProfile;

use crate::buffer::{StageBuffers, StageKey};
use crate::error::Result;

/// Write one executable script per populated stage, returning the paths
/// written.
///
/// Stages appear in first-seen order; fragments within a stage are sorted
/// by precedence (the sort is stable, so equal keys keep insertion order)
/// and separated by one newline. Every script opens with the target's
/// package-update preamble.
pub fn write_scripts(buffers: StageBuffers, output_dir: &Path, profile: &OsProfile) -> Result<Vec<PathBuf>> {
  let mut groups: Vec<(String, Vec<(StageKey, Vec<u8>)>)> = Vec::new();
  for (key, contents) in buffers.drain()? {
    match groups.iter_mut().find(|(stage, _)| *stage == key.stage) {
      Some((_, group)) => group.push((key, contents)),
      None => groups.push((key.stage.clone(), vec![(key, contents)])),
    }
  }

  let mut written = Vec::with_capacity(groups.len());
  for (stage, mut group) in groups {
    group.sort_by_key(|(key, _)| key.precedence());

    let path = output_dir.join(&stage);
    let mut file = fs::File::create(&path)?;
    write!(file, "# Update packages\n{}\n\n", profile.update_command)?;
    for (i, (_, contents)) in group.iter().enumerate() {
      if i > 0 {
        file.write_all(b"\n")?;
      }
      file.write_all(contents)?;
    }

    mark_executable(&path)?;
    info!(script = %path.display(), "wrote");
    written.push(path);
  }

  Ok(written)
}

#[cfg(unix)]
fn mark_executable(path: &Path) -> Result<()> {
  use std::os::unix::fs::PermissionsExt;
  fs::set_permissions(path, fs::Permissions::from_mode(0o775))?;
  Ok(())
}

#[cfg(not(unix))]
fn mark_executable(_path: &Path) -> Result<()> {
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::step::Step;
  use modgen_platform::Target;
  use tempfile::TempDir;

  fn debian() -> OsProfile {
    OsProfile::of(Target::Debian)
  }

  #[test]
  fn script_opens_with_update_preamble() {
    let out = TempDir::new().unwrap();
    let mut buffers = StageBuffers::new();
    buffers
      .append(&StageKey::new("x.sh", Step::Install, 10), "install line")
      .unwrap();

    let written = write_scripts(buffers, out.path(), &debian()).unwrap();
    assert_eq!(written.len(), 1);

    let text = fs::read_to_string(&written[0]).unwrap();
    assert!(text.starts_with("# Update packages\nsudo apt update -y && sudo apt upgrade -y\n\n"));
    assert!(text.ends_with("install line"));
  }

  #[test]
  fn fragments_order_by_priority_then_step() {
    let out = TempDir::new().unwrap();
    let mut buffers = StageBuffers::new();
    buffers.append(&StageKey::new("x.sh", Step::PostInstall, 5), "post5").unwrap();
    buffers.append(&StageKey::new("x.sh", Step::Install, 5), "install5").unwrap();
    buffers.append(&StageKey::new("x.sh", Step::PreInstall, 5), "pre5").unwrap();
    buffers.append(&StageKey::new("x.sh", Step::PreInstall, 3), "pre3").unwrap();

    let written = write_scripts(buffers, out.path(), &debian()).unwrap();
    let text = fs::read_to_string(&written[0]).unwrap();

    let order: Vec<usize> = ["pre3", "pre5", "install5", "post5"]
      .iter()
      .map(|needle| text.find(needle).unwrap())
      .collect();
    assert!(order.windows(2).all(|w| w[0] < w[1]));
  }

  #[test]
  fn fragments_are_separated_by_one_newline() {
    let out = TempDir::new().unwrap();
    let mut buffers = StageBuffers::new();
    buffers.append(&StageKey::new("x.sh", Step::PreInstall, 1), "first").unwrap();
    buffers.append(&StageKey::new("x.sh", Step::PreInstall, 2), "second").unwrap();

    let written = write_scripts(buffers, out.path(), &debian()).unwrap();
    let text = fs::read_to_string(&written[0]).unwrap();
    assert!(text.ends_with("first\nsecond"));
  }

  #[test]
  fn stages_split_into_separate_scripts() {
    let out = TempDir::new().unwrap();
    let mut buffers = StageBuffers::new();
    buffers.append(&StageKey::new("later.sh", Step::Install, 10), "later").unwrap();
    buffers.append(&StageKey::new("debian-install.sh", Step::Install, 10), "main").unwrap();

    let written = write_scripts(buffers, out.path(), &debian()).unwrap();
    // First-seen stage order, not alphabetical
    assert_eq!(written[0].file_name().unwrap(), "later.sh");
    assert_eq!(written[1].file_name().unwrap(), "debian-install.sh");
  }

  #[cfg(unix)]
  #[test]
  fn scripts_are_marked_executable() {
    use std::os::unix::fs::PermissionsExt;

    let out = TempDir::new().unwrap();
    let mut buffers = StageBuffers::new();
    buffers.append(&StageKey::new("x.sh", Step::Install, 10), "line").unwrap();

    let written = write_scripts(buffers, out.path(), &debian()).unwrap();
    let mode = fs::metadata(&written[0]).unwrap().permissions().mode();
    assert_eq!(mode & 0o777, 0o775);
  }

  #[test]
  fn empty_buffers_write_nothing() {
    let out = TempDir::new().unwrap();
    let written = write_scripts(StageBuffers::new(), out.path(), &debian()).unwrap();
    assert!(written.is_empty());
    assert_eq!(fs::read_dir(out.path()).unwrap().count(), 0);
  }
}
