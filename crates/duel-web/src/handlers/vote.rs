//! `GET /vote/{winner}/{loser}` — record one preference.

use axum::{
  extract::{Path, State, rejection::PathRejection},
  response::Redirect,
};
use duel_core::{item::ItemId, store::ItemStore};

use crate::{AppState, error::Error};

pub async fn handler<S>(
  State(state): State<AppState<S>>,
  ids: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<Redirect, Error>
where
  S: ItemStore + Clone + 'static,
{
  let Path((winner, loser)) = ids.map_err(|_| Error::NoSuchRoute)?;
  state.engine.record_vote(ItemId(winner), ItemId(loser)).await?;
  Ok(Redirect::to("/"))
}
