//! `GET /` — offer the next pair, or end the round.

use axum::{
  extract::State,
  response::{Html, IntoResponse, Redirect, Response},
};
use duel_core::store::ItemStore;

use crate::{AppState, error::Error, pages};

pub async fn handler<S>(State(state): State<AppState<S>>) -> Result<Response, Error>
where
  S: ItemStore + Clone + 'static,
{
  match state.engine.next_pair().await? {
    Some(pair) => Ok(Html(pages::index(&pair)).into_response()),
    None => Ok(Redirect::to("/save-results").into_response()),
  }
}
