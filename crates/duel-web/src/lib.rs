//! HTTP layer for the duel pairwise ranker.
//!
//! Exposes an axum [`Router`] backed by a [`RankingEngine`] over any
//! [`ItemStore`].
//!
//! | Method | Path | Behaviour |
//! |--------|------|-----------|
//! | `GET`  | `/` | Comparison page, or `303` to `/save-results` once the round is over |
//! | `GET`  | `/vote/{winner}/{loser}` | Record a vote, `303` to `/`; 404 for unknown ids |
//! | `GET`  | `/save-results` | Save a snapshot, `303` to `/sessions` |
//! | `GET`  | `/sessions` | Snapshot list |
//! | `GET`  | `/session/{id}` | One snapshot as preformatted text |

pub mod error;
pub mod handlers;
pub mod pages;
pub mod settings;

pub use error::Error;
pub use settings::ServerConfig;

use axum::{Router, routing::get};
use duel_core::{RankingEngine, store::ItemStore};
use tower_http::trace::TraceLayer;

use handlers::{index, results, sessions, vote};

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: ItemStore> {
  pub engine: RankingEngine<S>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

pub fn router<S>(state: AppState<S>) -> Router
where
  S: ItemStore + Clone + 'static,
{
  Router::new()
    .route("/",                      get(index::handler::<S>))
    .route("/vote/{winner}/{loser}", get(vote::handler::<S>))
    .route("/save-results",          get(results::handler::<S>))
    .route("/sessions",              get(sessions::list::<S>))
    .route("/session/{id}",          get(sessions::detail::<S>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;
  use std::sync::Arc;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use duel_core::item::ItemId;
  use duel_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn make_state(texts: &[&str]) -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store
      .bootstrap(texts.iter().map(|t| t.to_string()).collect())
      .await
      .unwrap();
    AppState { engine: RankingEngine::new(Arc::new(store)) }
  }

  async fn get_uri(state: AppState<SqliteStore>, uri: &str) -> Response {
    let req = Request::builder()
      .method("GET")
      .uri(uri)
      .body(Body::empty())
      .unwrap();
    router(state).oneshot(req).await.unwrap()
  }

  async fn body_text(resp: Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  fn location(resp: &Response) -> &str {
    resp.headers().get(header::LOCATION).unwrap().to_str().unwrap()
  }

  /// Pull the first `/vote/{a}/{b}` link out of a comparison page.
  fn first_vote_link(html: &str) -> String {
    let start = html.find("href=\"/vote/").expect("vote link") + "href=\"".len();
    let end = start + html[start..].find('"').unwrap();
    html[start..end].to_string()
  }

  // ── Index ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn index_offers_two_items() {
    let state = make_state(&["alpha", "beta"]).await;
    let resp  = get_uri(state, "/").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = body_text(resp).await;
    assert!(html.contains("alpha") && html.contains("beta"), "{html}");
    assert_eq!(html.matches("href=\"/vote/").count(), 2);
  }

  #[tokio::test]
  async fn index_redirects_when_round_complete() {
    let state = make_state(&["alpha", "beta"]).await;
    state.engine.record_vote(ItemId(1), ItemId(2)).await.unwrap();
    state.engine.record_vote(ItemId(2), ItemId(1)).await.unwrap();

    let resp = get_uri(state, "/").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/save-results");
  }

  #[tokio::test]
  async fn index_with_single_item_redirects() {
    let state = make_state(&["lonely"]).await;
    let resp  = get_uri(state, "/").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
  }

  // ── Vote ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn vote_records_and_redirects_home() {
    let state = make_state(&["alpha", "beta"]).await;
    let resp  = get_uri(state.clone(), "/vote/2/1").await;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp), "/");

    let store  = state.engine.store();
    let winner = store.get_item(ItemId(2)).await.unwrap().unwrap();
    let loser  = store.get_item(ItemId(1)).await.unwrap().unwrap();
    assert_eq!((winner.score, winner.comparison_count), (1, 1));
    assert_eq!((loser.score, loser.comparison_count), (0, 1));
  }

  #[tokio::test]
  async fn vote_unknown_id_returns_404_without_writes() {
    let state = make_state(&["alpha", "beta"]).await;
    let resp  = get_uri(state.clone(), "/vote/99/1").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let loser = state.engine.store().get_item(ItemId(1)).await.unwrap().unwrap();
    assert_eq!(loser.comparison_count, 0);
  }

  #[tokio::test]
  async fn vote_non_integer_returns_404() {
    let state = make_state(&["alpha", "beta"]).await;
    let resp  = get_uri(state, "/vote/one/2").await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn vote_for_self_returns_400() {
    let state = make_state(&["alpha", "beta"]).await;
    let resp  = get_uri(state, "/vote/1/1").await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  // ── Results and sessions ────────────────────────────────────────────────────

  #[tokio::test]
  async fn save_results_always_adds_a_snapshot() {
    let state = make_state(&["alpha", "beta"]).await;
    for _ in 0..2 {
      let resp = get_uri(state.clone(), "/save-results").await;
      assert_eq!(resp.status(), StatusCode::SEE_OTHER);
      assert_eq!(location(&resp), "/sessions");
    }
    assert_eq!(state.engine.sessions().await.unwrap().len(), 2);

    let html = body_text(get_uri(state, "/sessions").await).await;
    assert!(html.contains("href=\"/session/1\""), "{html}");
    assert!(html.contains("href=\"/session/2\""), "{html}");
  }

  #[tokio::test]
  async fn session_detail_is_escaped_preformatted_text() {
    let state = make_state(&["<em>bold</em>", "plain"]).await;
    state.engine.record_vote(ItemId(2), ItemId(1)).await.unwrap();
    let snap = state.engine.finalize_round().await.unwrap();

    let resp = get_uri(state, &format!("/session/{}", snap.id)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_text(resp).await;
    assert_eq!(
      body,
      "<pre>plain — 1 points\n&lt;em&gt;bold&lt;/em&gt; — 0 points</pre>"
    );
  }

  #[tokio::test]
  async fn session_missing_returns_404() {
    let state = make_state(&[]).await;
    assert_eq!(get_uri(state.clone(), "/session/5").await.status(), StatusCode::NOT_FOUND);
    assert_eq!(get_uri(state, "/session/five").await.status(), StatusCode::NOT_FOUND);
  }

  // ── Full round ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn full_round_through_http() {
    let state = make_state(&["A", "B", "C", "D"]).await;

    let mut votes = 0;
    loop {
      let resp = get_uri(state.clone(), "/").await;
      if resp.status() == StatusCode::SEE_OTHER {
        assert_eq!(location(&resp), "/save-results");
        break;
      }
      let link = first_vote_link(&body_text(resp).await);
      let vote = get_uri(state.clone(), &link).await;
      assert_eq!(vote.status(), StatusCode::SEE_OTHER);
      votes += 1;
      assert!(votes <= 4);
    }

    let resp = get_uri(state.clone(), "/save-results").await;
    assert_eq!(location(&resp), "/sessions");

    let snaps = state.engine.sessions().await.unwrap();
    assert_eq!(snaps.len(), 1);
    let scores: Vec<u32> = snaps[0]
      .content
      .lines()
      .map(|l| l.rsplit(" — ").next().unwrap().trim_end_matches(" points").parse().unwrap())
      .collect();
    assert_eq!(scores.len(), 4);
    assert!(scores.windows(2).all(|w| w[0] >= w[1]), "{scores:?}");
    assert_eq!(scores.iter().sum::<u32>(), votes);
  }
}
