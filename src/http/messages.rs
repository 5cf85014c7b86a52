//! `/api/messages` routes: same store, but wishes are named `message`.

use super::wishes::{Params, seed_from_params, store_body};
use crate::{
  app::AppState,
  error::WishError,
  models::{response::seed::MessageSeed, wish::message_view::MessageView},
};
use axum::{
  Json,
  body::Bytes,
  extract::{Query, State},
  http::StatusCode,
};

pub async fn create_message(
  State(state): State<AppState>,
  body: Bytes,
) -> Result<(StatusCode, Json<MessageView>), WishError> {
  let wish = store_body(&state, &body).await?;
  Ok((StatusCode::CREATED, Json(MessageView::from(wish))))
}

pub async fn list_messages(
  State(state): State<AppState>,
  Query(params): Query<Params>,
) -> Result<Json<MessageSeed>, WishError> {
  let seed = seed_from_params(&state, &params).await?;
  Ok(Json(MessageSeed::from(seed)))
}
