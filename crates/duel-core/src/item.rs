//! Items: the things being compared.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Number of comparisons an item takes part in before it stops being
/// offered for new pairs.
pub const REQUIRED_COMPARISONS: u32 = 2;

/// Store-assigned identifier. Ids grow with insertion, so ordering by
/// `ItemId` is ordering by insertion.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct ItemId(pub i64);

impl fmt::Display for ItemId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { self.0.fmt(f) }
}

/// A comparable unit with its running tally.
///
/// `score <= comparison_count` holds for every item the store hands out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
  pub id:               ItemId,
  pub text:             String,
  /// Number of comparisons won.
  pub score:            u32,
  /// Number of comparisons taken part in, won or lost.
  pub comparison_count: u32,
}

impl Item {
  /// Whether the item still needs comparisons in the current round.
  pub fn is_eligible(&self) -> bool {
    self.comparison_count < REQUIRED_COMPARISONS
  }
}

/// Two distinct items offered together. Presentation order carries no
/// meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pair {
  pub first:  Item,
  pub second: Item,
}

impl Pair {
  pub fn ids(&self) -> (ItemId, ItemId) { (self.first.id, self.second.id) }
}

/// Result of [`ItemStore::record_outcome`](crate::store::ItemStore::record_outcome).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VoteOutcome {
  /// Both counters were updated; the rows are the post-update state.
  Recorded { winner: Item, loser: Item },
  /// This id does not resolve to an item. Nothing was written.
  UnknownItem(ItemId),
}
