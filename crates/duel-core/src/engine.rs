//! The ranking engine: pair selection, vote recording, and round
//! finalisation over an injected [`ItemStore`].
//!
//! There is no persisted round entity. Whether the round is still running is
//! recomputed from the item counters on every call.

use std::{path::Path, sync::Arc};

use rand::{Rng, seq::SliceRandom};
use tracing::{debug, info, warn};

use crate::{
  Error, Result, bootstrap,
  item::{Item, ItemId, Pair, VoteOutcome},
  snapshot::{self, RankingSnapshot, SnapshotId},
  store::ItemStore,
};

/// Whether the current round can still offer a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
  /// At least two items are still eligible.
  InProgress { eligible: usize },
  /// Fewer than two items are eligible.
  Complete,
}

/// What [`RankingEngine::initialize`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartupReport {
  /// Items whose counters were zeroed.
  pub reset:    usize,
  /// Items imported from the bootstrap source (0 when the store was
  /// already populated).
  pub imported: usize,
}

pub struct RankingEngine<S> {
  store: Arc<S>,
}

impl<S> Clone for RankingEngine<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: ItemStore> RankingEngine<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  pub fn store(&self) -> &Arc<S> { &self.store }

  /// Startup sequence: zero every counter, then import the bootstrap
  /// source if and only if the store is empty.
  ///
  /// The reset is unconditional, so a restart discards any round in
  /// progress. Saved snapshots are kept. The source file is only opened
  /// when an import is needed.
  pub async fn initialize(&self, source: &Path) -> Result<StartupReport> {
    let reset = self.store.reset_all().await.map_err(Error::store)?;
    info!(items = reset, "reset item counters");

    let existing = self.store.count_items().await.map_err(Error::store)?;
    if existing > 0 {
      info!(existing, "store already populated, skipping bootstrap");
      return Ok(StartupReport { reset, imported: 0 });
    }

    let texts = bootstrap::read_source(source)?;
    if texts.is_empty() {
      warn!(path = ?source, "bootstrap source contains no items");
    }
    let imported = self.store.bootstrap(texts).await.map_err(Error::store)?;
    info!(imported, path = ?source, "imported items from bootstrap source");

    Ok(StartupReport { reset, imported })
  }

  pub async fn round_state(&self) -> Result<RoundState> {
    let eligible = self
      .store
      .items_needing_more_comparisons()
      .await
      .map_err(Error::store)?
      .len();
    Ok(if eligible < 2 {
      RoundState::Complete
    } else {
      RoundState::InProgress { eligible }
    })
  }

  /// Pick two eligible items at random, or `None` once the round is over.
  pub async fn next_pair(&self) -> Result<Option<Pair>> {
    let eligible = self
      .store
      .items_needing_more_comparisons()
      .await
      .map_err(Error::store)?;

    let pair = pick_pair(&eligible, &mut rand::thread_rng());
    match &pair {
      Some(p) => debug!(first = %p.first.id, second = %p.second.id, "selected pair"),
      None => debug!(eligible = eligible.len(), "no pair available, round complete"),
    }
    Ok(pair)
  }

  /// Record that `winner` was preferred over `loser`. Returns both items
  /// as they stand after the vote.
  ///
  /// Not idempotent: each call counts as a separate vote.
  pub async fn record_vote(&self, winner: ItemId, loser: ItemId) -> Result<(Item, Item)> {
    if winner == loser {
      return Err(Error::SelfComparison(winner));
    }

    match self
      .store
      .record_outcome(winner, loser)
      .await
      .map_err(Error::store)?
    {
      VoteOutcome::Recorded { winner, loser } => {
        info!(
          winner = %winner.id,
          loser = %loser.id,
          winner_score = winner.score,
          "recorded vote"
        );
        Ok((winner, loser))
      }
      VoteOutcome::UnknownItem(id) => Err(Error::ItemNotFound(id)),
    }
  }

  /// Render the current standings and persist them as a new snapshot.
  ///
  /// Does not look at the round state, and every call creates a snapshot,
  /// even if one with identical content already exists.
  pub async fn finalize_round(&self) -> Result<RankingSnapshot> {
    let items = self
      .store
      .all_items_by_score_descending()
      .await
      .map_err(Error::store)?;

    let content = snapshot::render(&items);
    let saved = self
      .store
      .insert_snapshot(content)
      .await
      .map_err(Error::store)?;

    info!(snapshot = %saved.id, items = items.len(), "saved ranking snapshot");
    Ok(saved)
  }

  pub async fn sessions(&self) -> Result<Vec<RankingSnapshot>> {
    self.store.list_snapshots().await.map_err(Error::store)
  }

  pub async fn session(&self, id: SnapshotId) -> Result<RankingSnapshot> {
    self
      .store
      .get_snapshot(id)
      .await
      .map_err(Error::store)?
      .ok_or(Error::SnapshotNotFound(id))
  }
}

/// Choose two distinct entries of `items` uniformly at random, without
/// replacement. `None` if fewer than two are given.
pub fn pick_pair<R: Rng + ?Sized>(items: &[Item], rng: &mut R) -> Option<Pair> {
  let mut chosen = items.choose_multiple(rng, 2).cloned();
  let first = chosen.next()?;
  let second = chosen.next()?;
  Some(Pair { first, second })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
