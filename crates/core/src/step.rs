//! Lifecycle steps within a module/target block

use std::fmt;

/// One of the three lifecycle phases a module may declare per target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Step {
  PreInstall,
  Install,
  PostInstall,
}

impl Step {
  /// Returns the step name as used in module documents
  pub const fn as_str(&self) -> &'static str {
    match self {
      Step::PreInstall => "pre-install",
      Step::Install => "install",
      Step::PostInstall => "post-install",
    }
  }

  /// Position of this step within one priority band
  pub(crate) const fn offset(&self) -> i64 {
    match self {
      Step::PreInstall => 0,
      Step::Install => 1,
      Step::PostInstall => 2,
    }
  }
}

impl fmt::Display for Step {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn step_names_match_module_documents() {
    assert_eq!(Step::PreInstall.as_str(), "pre-install");
    assert_eq!(Step::Install.as_str(), "install");
    assert_eq!(Step::PostInstall.as_str(), "post-install");
  }
}
