//! Conversions between SQLite rows and the `duel-core` domain types.
//!
//! Timestamps are stored as RFC 3339 strings. Counters are stored as
//! SQLite integers and narrowed to `u32` on the way out.

use chrono::{DateTime, Utc};
use duel_core::{
  item::{Item, ItemId},
  snapshot::{RankingSnapshot, SnapshotId},
};

use crate::{Error, Result};

/// Column list matching [`raw_item`].
pub const ITEM_COLUMNS: &str = "item_id, text, score, comparison_count";

/// Column list matching [`raw_snapshot`].
pub const SNAPSHOT_COLUMNS: &str = "snapshot_id, content, created_at";

// ─── DateTime<Utc> ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Items ────────────────────────────────────────────────────────────────────

pub struct RawItem {
  pub item_id:          i64,
  pub text:             String,
  pub score:            i64,
  pub comparison_count: i64,
}

pub fn raw_item(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawItem> {
  Ok(RawItem {
    item_id:          row.get(0)?,
    text:             row.get(1)?,
    score:            row.get(2)?,
    comparison_count: row.get(3)?,
  })
}

fn counter(item_id: i64, column: &str, value: i64) -> Result<u32> {
  u32::try_from(value)
    .map_err(|_| Error::Corrupt(format!("item {item_id}: {column} = {value}")))
}

impl RawItem {
  pub fn into_item(self) -> Result<Item> {
    Ok(Item {
      score:            counter(self.item_id, "score", self.score)?,
      comparison_count: counter(self.item_id, "comparison_count", self.comparison_count)?,
      id:               ItemId(self.item_id),
      text:             self.text,
    })
  }
}

// ─── Snapshots ────────────────────────────────────────────────────────────────

pub struct RawSnapshot {
  pub snapshot_id: i64,
  pub content:     String,
  pub created_at:  String,
}

pub fn raw_snapshot(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawSnapshot> {
  Ok(RawSnapshot {
    snapshot_id: row.get(0)?,
    content:     row.get(1)?,
    created_at:  row.get(2)?,
  })
}

impl RawSnapshot {
  pub fn into_snapshot(self) -> Result<RankingSnapshot> {
    Ok(RankingSnapshot {
      id:         SnapshotId(self.snapshot_id),
      content:    self.content,
      created_at: decode_dt(&self.created_at)?,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn negative_counter_is_corrupt() {
    let raw = RawItem { item_id: 4, text: "x".into(), score: -1, comparison_count: 0 };
    assert!(matches!(raw.into_item(), Err(Error::Corrupt(_))));
  }

  #[test]
  fn dt_roundtrip_preserves_instant() {
    let now = Utc::now();
    assert_eq!(decode_dt(&encode_dt(now)).unwrap(), now);
  }

  #[test]
  fn bad_timestamp_is_date_parse_error() {
    let raw = RawSnapshot { snapshot_id: 1, content: String::new(), created_at: "yesterday".into() };
    assert!(matches!(raw.into_snapshot(), Err(Error::DateParse(_))));
  }
}
