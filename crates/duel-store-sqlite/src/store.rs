//! [`SqliteStore`] — the SQLite implementation of [`ItemStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use duel_core::{
  item::{Item, ItemId, REQUIRED_COMPARISONS, VoteOutcome},
  snapshot::{RankingSnapshot, SnapshotId},
  store::ItemStore,
};

use crate::{
  Result,
  encode::{
    ITEM_COLUMNS, RawItem, RawSnapshot, SNAPSHOT_COLUMNS, encode_dt, raw_item,
    raw_snapshot,
  },
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// An item store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

/// What the vote transaction found, before decoding.
enum RawOutcome {
  Recorded(RawItem, RawItem),
  Unknown(i64),
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn query_items(
    &self,
    sql: String,
    threshold: Option<i64>,
  ) -> Result<Vec<Item>> {
    let raws: Vec<RawItem> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = match threshold {
          Some(t) => stmt.query_map(rusqlite::params![t], raw_item)?,
          None => stmt.query_map([], raw_item)?,
        }
        .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawItem::into_item).collect()
  }
}

// ─── ItemStore impl ──────────────────────────────────────────────────────────

impl ItemStore for SqliteStore {
  type Error = crate::Error;

  // ── Items ─────────────────────────────────────────────────────────────────

  async fn reset_all(&self) -> Result<usize> {
    let n = self
      .conn
      .call(|conn| Ok(conn.execute("UPDATE items SET score = 0, comparison_count = 0", [])?))
      .await?;
    Ok(n)
  }

  async fn count_items(&self) -> Result<usize> {
    let n: i64 = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM items", [], |r| r.get(0))?))
      .await?;
    Ok(n as usize)
  }

  async fn bootstrap(&self, texts: Vec<String>) -> Result<usize> {
    let inserted = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let existing: i64 =
          tx.query_row("SELECT COUNT(*) FROM items", [], |r| r.get(0))?;
        if existing > 0 {
          return Ok(0);
        }

        {
          let mut stmt = tx.prepare("INSERT INTO items (text) VALUES (?1)")?;
          for text in &texts {
            stmt.execute(rusqlite::params![text])?;
          }
        }
        tx.commit()?;
        Ok(texts.len())
      })
      .await?;
    Ok(inserted)
  }

  async fn items_needing_more_comparisons(&self) -> Result<Vec<Item>> {
    self
      .query_items(
        format!(
          "SELECT {ITEM_COLUMNS} FROM items WHERE comparison_count < ?1 ORDER BY item_id"
        ),
        Some(i64::from(REQUIRED_COMPARISONS)),
      )
      .await
  }

  async fn record_outcome(&self, winner: ItemId, loser: ItemId) -> Result<VoteOutcome> {
    let (winner_id, loser_id) = (winner.0, loser.0);

    let raw = self
      .conn
      .call(move |conn| {
        // Dropping `tx` without commit rolls back, so an early return
        // leaves both rows untouched.
        let tx = conn.transaction()?;
        for id in [winner_id, loser_id] {
          let exists = tx
            .query_row(
              "SELECT 1 FROM items WHERE item_id = ?1",
              rusqlite::params![id],
              |_| Ok(()),
            )
            .optional()?
            .is_some();
          if !exists {
            return Ok(RawOutcome::Unknown(id));
          }
        }

        tx.execute(
          "UPDATE items
             SET score = score + 1, comparison_count = comparison_count + 1
           WHERE item_id = ?1",
          rusqlite::params![winner_id],
        )?;
        tx.execute(
          "UPDATE items SET comparison_count = comparison_count + 1 WHERE item_id = ?1",
          rusqlite::params![loser_id],
        )?;

        let select = format!("SELECT {ITEM_COLUMNS} FROM items WHERE item_id = ?1");
        let w = tx.query_row(&select, rusqlite::params![winner_id], raw_item)?;
        let l = tx.query_row(&select, rusqlite::params![loser_id], raw_item)?;
        tx.commit()?;
        Ok(RawOutcome::Recorded(w, l))
      })
      .await?;

    Ok(match raw {
      RawOutcome::Recorded(w, l) => VoteOutcome::Recorded {
        winner: w.into_item()?,
        loser:  l.into_item()?,
      },
      RawOutcome::Unknown(id) => VoteOutcome::UnknownItem(ItemId(id)),
    })
  }

  async fn all_items_by_score_descending(&self) -> Result<Vec<Item>> {
    self
      .query_items(
        format!("SELECT {ITEM_COLUMNS} FROM items ORDER BY score DESC, item_id ASC"),
        None,
      )
      .await
  }

  async fn get_item(&self, id: ItemId) -> Result<Option<Item>> {
    let raw: Option<RawItem> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {ITEM_COLUMNS} FROM items WHERE item_id = ?1"),
            rusqlite::params![id.0],
            raw_item,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawItem::into_item).transpose()
  }

  // ── Snapshots ─────────────────────────────────────────────────────────────

  async fn insert_snapshot(&self, content: String) -> Result<RankingSnapshot> {
    let created_at = Utc::now();
    let at_str     = encode_dt(created_at);
    let body       = content.clone();

    let id = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO snapshots (content, created_at) VALUES (?1, ?2)",
          rusqlite::params![body, at_str],
        )?;
        Ok(conn.last_insert_rowid())
      })
      .await?;

    Ok(RankingSnapshot { id: SnapshotId(id), content, created_at })
  }

  async fn list_snapshots(&self) -> Result<Vec<RankingSnapshot>> {
    let raws: Vec<RawSnapshot> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {SNAPSHOT_COLUMNS} FROM snapshots ORDER BY snapshot_id"
        ))?;
        let rows = stmt
          .query_map([], raw_snapshot)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawSnapshot::into_snapshot).collect()
  }

  async fn get_snapshot(&self, id: SnapshotId) -> Result<Option<RankingSnapshot>> {
    let raw: Option<RawSnapshot> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {SNAPSHOT_COLUMNS} FROM snapshots WHERE snapshot_id = ?1"),
            rusqlite::params![id.0],
            raw_snapshot,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawSnapshot::into_snapshot).transpose()
  }
}
