//! HTTP router and handlers.

use crate::app::AppState;
use axum::{
  Router,
  routing::{delete, get, post},
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

pub mod messages;
pub mod ui;
pub mod wishes;

/// Assemble the HTTP router with all routes.
pub fn build_router(state: AppState) -> Router {
  Router::new()
    .route("/", get(ui::ui_index))
    .route("/health", get(health))
    .route("/api/wishes", post(wishes::create_wish))
    .route("/api/wishes/recent", get(wishes::recent_wishes))
    .route("/api/wishes/random", get(wishes::random_wishes))
    .route("/api/wishes/seed", get(wishes::seed_wishes))
    .route("/api/wishes/:id", delete(wishes::delete_wish))
    .route("/api/submit", post(wishes::create_wish))
    .route("/api/init", get(wishes::seed_wishes))
    .route(
      "/api/messages",
      get(messages::list_messages).post(messages::create_message),
    )
    .route("/api/delete/:id", delete(wishes::delete_wish))
    .layer(
      TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO)),
    )
    .with_state(state)
}

async fn health() -> &'static str {
  "OK"
}
