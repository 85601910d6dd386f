//! `GET /save-results` — snapshot the standings.
//!
//! Every request writes a new snapshot, including repeated requests after
//! the round has ended.

use axum::{extract::State, response::Redirect};
use duel_core::store::ItemStore;

use crate::{AppState, error::Error};

pub async fn handler<S>(State(state): State<AppState<S>>) -> Result<Redirect, Error>
where
  S: ItemStore + Clone + 'static,
{
  state.engine.finalize_round().await?;
  Ok(Redirect::to("/sessions"))
}
