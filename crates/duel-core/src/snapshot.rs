//! Ranking snapshots: detached text copies of the standings.
//!
//! A snapshot shares no keys with the items it was rendered from, so
//! items can be reset for a new round without touching history.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::item::Item;

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct SnapshotId(pub i64);

impl fmt::Display for SnapshotId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// An immutable record of the standings at the moment a round was
/// finalised.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingSnapshot {
  pub id:         SnapshotId,
  /// Output of [`render`].
  pub content:    String,
  pub created_at: DateTime<Utc>,
}

/// Render standings, one `"<text> — <score> points"` line per item.
///
/// Items are written in the order given; callers pass them already sorted.
pub fn render(items: &[Item]) -> String {
  items
    .iter()
    .map(|item| format!("{} — {} points", item.text, item.score))
    .collect::<Vec<_>>()
    .join("\n")
}
