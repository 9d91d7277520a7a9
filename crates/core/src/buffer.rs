//! Shared stage buffers keyed by (stage, step, priority)
//!
//! Every fragment a module emits lands in the buffer for its key; modules
//! that resolve to the same key append to the same buffer in visit order.
//! Buffers are spooled temporary files: small fragments stay in memory,
//! large ones spill to disk, and the backing storage is released when the
//! registry is dropped, on success and failure paths alike.

use std::io::{Read, Seek, SeekFrom, Write};

use tempfile::SpooledTempFile;

use crate::error::Result;
use crate::step::Step;

/// Spill threshold for a single buffer
const SPOOL_MAX: usize = 64 * 1024;

/// Identity of one shared output buffer
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StageKey {
  /// Output script file name this buffer belongs to
  pub stage: String,
  pub step: Step,
  pub priority: i64,
}

impl StageKey {
  pub fn new(stage: impl Into<String>, step: Step, priority: i64) -> Self {
    Self {
      stage: stage.into(),
      step,
      priority,
    }
  }

  /// Ordering weight within a stage: lower runs earlier.
  ///
  /// Priority dominates; within one priority, pre-install precedes install
  /// precedes post-install.
  pub fn precedence(&self) -> i64 {
    3 * self.priority + self.step.offset()
  }
}

/// Insertion-ordered registry of stage buffers
///
/// A Vec of pairs rather than a map: grouping and composition depend on
/// first-seen key order.
#[derive(Default)]
pub struct StageBuffers {
  entries: Vec<(StageKey, SpooledTempFile)>,
}

impl StageBuffers {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  /// True if a buffer already exists for this key
  pub fn contains(&self, key: &StageKey) -> bool {
    self.entries.iter().any(|(k, _)| k == key)
  }

  /// Append text to the buffer for `key`, creating the buffer if needed
  pub fn append(&mut self, key: &StageKey, text: &str) -> Result<()> {
    let idx = match self.entries.iter().position(|(k, _)| k == key) {
      Some(idx) => idx,
      None => {
        self.entries.push((key.clone(), SpooledTempFile::new(SPOOL_MAX)));
        self.entries.len() - 1
      }
    };
    self.entries[idx].1.write_all(text.as_bytes())?;
    Ok(())
  }

  /// Read every buffer back, returning (key, contents) in insertion order.
  ///
  /// Consumes the registry: buffers only survive one composition.
  pub fn drain(self) -> Result<Vec<(StageKey, Vec<u8>)>> {
    let mut fragments = Vec::with_capacity(self.entries.len());
    for (key, mut file) in self.entries {
      file.seek(SeekFrom::Start(0))?;
      let mut contents = Vec::new();
      file.read_to_end(&mut contents)?;
      fragments.push((key, contents));
    }
    Ok(fragments)
  }
}
