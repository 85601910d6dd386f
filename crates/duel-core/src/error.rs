//! Error types for `duel-core`.

use std::path::PathBuf;

use thiserror::Error;

use crate::{item::ItemId, snapshot::SnapshotId};

#[derive(Debug, Error)]
pub enum Error {
  #[error("item not found: {0}")]
  ItemNotFound(ItemId),

  #[error("session not found: {0}")]
  SnapshotNotFound(SnapshotId),

  #[error("item {0} cannot be compared with itself")]
  SelfComparison(ItemId),

  #[error("failed to read bootstrap source {path:?}: {source}")]
  Bootstrap {
    path:   PathBuf,
    #[source]
    source: std::io::Error,
  },

  #[error("malformed bootstrap source at line {line}: {reason}")]
  MalformedSource { line: usize, reason: String },

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Wrap a backend error.
  pub fn store<E>(e: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(e))
  }

  /// `true` for the variants that mean "the referenced record is absent".
  pub fn is_not_found(&self) -> bool {
    matches!(self, Self::ItemNotFound(_) | Self::SnapshotNotFound(_))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
