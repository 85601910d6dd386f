//! Browsing saved snapshots.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/sessions` | All snapshots, oldest first |
//! | `GET`  | `/session/{id}` | Snapshot text in `<pre>`; 404 if missing |

use axum::{
  extract::{Path, State, rejection::PathRejection},
  response::Html,
};
use duel_core::{snapshot::SnapshotId, store::ItemStore};

use crate::{AppState, error::Error, pages};

pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: ItemStore + Clone + 'static,
{
  let snapshots = state.engine.sessions().await?;
  Ok(Html(pages::sessions(&snapshots)))
}

pub async fn detail<S>(
  State(state): State<AppState<S>>,
  id: Result<Path<i64>, PathRejection>,
) -> Result<Html<String>, Error>
where
  S: ItemStore + Clone + 'static,
{
  let Path(id) = id.map_err(|_| Error::NoSuchRoute)?;
  let snapshot = state.engine.session(SnapshotId(id)).await?;
  Ok(Html(pages::session(&snapshot)))
}
