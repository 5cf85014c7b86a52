//! Error type for wish operations and its HTTP mapping.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum WishError {
  #[error("wish text cannot be empty")]
  Empty,
  #[error("wish text must be at most {max} characters")]
  TooLong { max: usize },
  #[error("storage error: {0}")]
  Storage(#[from] sqlx::Error),
}

impl WishError {
  /// Short machine-readable reason sent to clients.
  pub fn reason(&self) -> &'static str {
    match self {
      WishError::Empty => "empty",
      WishError::TooLong { .. } => "too_long",
      WishError::Storage(_) => "storage_error",
    }
  }

  pub fn status(&self) -> StatusCode {
    match self {
      WishError::Empty | WishError::TooLong { .. } => StatusCode::BAD_REQUEST,
      WishError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
  }
}

impl IntoResponse for WishError {
  fn into_response(self) -> Response {
    // Database details stay in the log, never in the response body.
    if let WishError::Storage(e) = &self {
      error!("storage error: {e}");
    }
    (self.status(), Json(json!({ "error": self.reason() }))).into_response()
  }
}
