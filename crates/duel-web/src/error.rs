//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A path segment that should be an integer id was not one.
  #[error("not found")]
  NoSuchRoute,
  #[error(transparent)]
  Engine(#[from] duel_core::Error),
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    match self {
      Error::NoSuchRoute => (StatusCode::NOT_FOUND, "Not Found").into_response(),
      Error::Engine(e) if e.is_not_found() => {
        (StatusCode::NOT_FOUND, e.to_string()).into_response()
      }
      Error::Engine(e @ duel_core::Error::SelfComparison(_)) => {
        (StatusCode::BAD_REQUEST, e.to_string()).into_response()
      }
      Error::Engine(e) => {
        tracing::error!(error = %e, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response()
      }
    }
  }
}
