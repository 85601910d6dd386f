//! The `ItemStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `duel-store-sqlite`).
//! The engine and the web layer depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  item::{Item, ItemId, VoteOutcome},
  snapshot::{RankingSnapshot, SnapshotId},
};

/// Abstraction over the durable item and snapshot collections.
///
/// Every call reads from or commits to the backing store before it
/// resolves; implementations keep no cached item state between calls.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes (e.g. tokio with `axum`).
pub trait ItemStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Items ─────────────────────────────────────────────────────────────

  /// Zero `score` and `comparison_count` on every item. Returns the number
  /// of items touched.
  fn reset_all(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  fn count_items(&self) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Insert one item per text, in order, with zeroed counters — but only if
  /// the store holds no items yet. Returns the number inserted (0 when
  /// skipped).
  fn bootstrap(
    &self,
    texts: Vec<String>,
  ) -> impl Future<Output = Result<usize, Self::Error>> + Send + '_;

  /// Items with `comparison_count < REQUIRED_COMPARISONS`, in id order.
  fn items_needing_more_comparisons(
    &self,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + '_;

  /// Apply one vote atomically: the winner gains a point and both items
  /// gain a comparison.
  ///
  /// If either id is unknown nothing is written and
  /// [`VoteOutcome::UnknownItem`] names the first missing id (the winner
  /// is checked before the loser).
  fn record_outcome(
    &self,
    winner: ItemId,
    loser: ItemId,
  ) -> impl Future<Output = Result<VoteOutcome, Self::Error>> + Send + '_;

  /// All items, highest score first, ties in id order.
  fn all_items_by_score_descending(
    &self,
  ) -> impl Future<Output = Result<Vec<Item>, Self::Error>> + Send + '_;

  fn get_item(
    &self,
    id: ItemId,
  ) -> impl Future<Output = Result<Option<Item>, Self::Error>> + Send + '_;

  // ── Snapshots ─────────────────────────────────────────────────────────

  /// Persist a new snapshot. The id and `created_at` are store-assigned.
  fn insert_snapshot(
    &self,
    content: String,
  ) -> impl Future<Output = Result<RankingSnapshot, Self::Error>> + Send + '_;

  /// All snapshots in creation order.
  fn list_snapshots(
    &self,
  ) -> impl Future<Output = Result<Vec<RankingSnapshot>, Self::Error>> + Send + '_;

  /// Retrieve a snapshot by id. Returns `None` if not found.
  fn get_snapshot(
    &self,
    id: SnapshotId,
  ) -> impl Future<Output = Result<Option<RankingSnapshot>, Self::Error>> + Send + '_;
}
