//! Per-target package manager command strings

use serde::Serialize;

use crate::target::Target;

/// Package manager commands for one target OS
///
/// The command strings are substituted verbatim into generated scripts.
#[derive(Debug, Clone, Serialize)]
pub struct OsProfile {
  pub target: Target,
  pub install_command: &'static str,
  pub update_command: &'static str,
}

impl OsProfile {
  /// Look up the fixed profile for a target
  pub const fn of(target: Target) -> Self {
    match target {
      Target::Debian => Self {
        target,
        install_command: "sudo apt install -y",
        update_command: "sudo apt update -y && sudo apt upgrade -y",
      },
      Target::Arch => Self {
        target,
        install_command: "sudo pacman -S",
        update_command: "sudo pacman -Syyu",
      },
      Target::Fedora => Self {
        target,
        install_command: "sudo dnf install -y",
        update_command: "sudo dnf update -y",
      },
      Target::Macos => Self {
        target,
        install_command: "brew install",
        update_command: "brew update",
      },
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn every_target_has_a_profile() {
    for target in Target::ALL {
      let profile = OsProfile::of(target);
      assert_eq!(profile.target, target);
      assert!(!profile.install_command.is_empty());
      assert!(!profile.update_command.is_empty());
    }
  }

  #[test]
  fn debian_uses_apt() {
    let profile = OsProfile::of(Target::Debian);
    assert_eq!(profile.install_command, "sudo apt install -y");
    assert_eq!(profile.update_command, "sudo apt update -y && sudo apt upgrade -y");
  }

  #[test]
  fn macos_uses_brew() {
    let profile = OsProfile::of(Target::Macos);
    assert_eq!(profile.install_command, "brew install");
    assert_eq!(profile.update_command, "brew update");
  }
}
