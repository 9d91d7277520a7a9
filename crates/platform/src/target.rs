//! Supported target operating systems

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PlatformError;

/// Target operating system a script set is generated for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Target {
  Debian,
  Arch,
  Fedora,
  Macos,
}

impl Target {
  /// All supported targets, in display order
  pub const ALL: [Target; 4] = [Target::Debian, Target::Arch, Target::Fedora, Target::Macos];

  /// Returns the target name as used in module documents
  pub const fn as_str(&self) -> &'static str {
    match self {
      Target::Debian => "debian",
      Target::Arch => "arch",
      Target::Fedora => "fedora",
      Target::Macos => "macos",
    }
  }

  /// Output script name for steps that do not declare a stage
  pub fn default_stage(&self) -> String {
    format!("{}-install.sh", self.as_str())
  }
}

impl FromStr for Target {
  type Err = PlatformError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "debian" => Ok(Target::Debian),
      "arch" => Ok(Target::Arch),
      "fedora" => Ok(Target::Fedora),
      "macos" => Ok(Target::Macos),
      other => Err(PlatformError::UnknownTarget(other.to_string())),
    }
  }
}

impl fmt::Display for Target {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn parse_round_trips_every_target() {
    for target in Target::ALL {
      assert_eq!(target.as_str().parse::<Target>().unwrap(), target);
    }
  }

  #[test]
  fn parse_rejects_unknown_names() {
    assert!("windows".parse::<Target>().is_err());
    assert!("Debian".parse::<Target>().is_err());
  }

  #[test]
  fn default_stage_names_the_target() {
    assert_eq!(Target::Debian.default_stage(), "debian-install.sh");
    assert_eq!(Target::Macos.default_stage(), "macos-install.sh");
  }
}
