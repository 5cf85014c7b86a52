//! Wish JSON APIs.

use crate::{
  app::AppState,
  error::WishError,
  models::{
    response::{deleted::Deleted, seed::Seed},
    wish::wish_row::Wish,
  },
  store::{DEFAULT_RANDOM_LIMIT, DEFAULT_RECENT_LIMIT, clamp_limit, parse_exclude_ids},
};
use axum::{
  Json,
  body::Bytes,
  extract::{Path, Query, State},
  http::StatusCode,
};
use serde_json::Value;
use std::collections::HashMap;
use tracing::info;

pub(crate) type Params = HashMap<String, String>;

/// First of `keys` present in the query string.
fn param<'a>(params: &'a Params, keys: &[&str]) -> Option<&'a str> {
  keys
    .iter()
    .find_map(|k| params.get(*k))
    .map(String::as_str)
}

/// Pull the wish text out of a request body. Unparsable bodies, missing
/// fields and non-string values all count as no text.
fn body_text(payload: &Value) -> Option<&str> {
  payload
    .get("text")
    .or_else(|| payload.get("message"))
    .and_then(Value::as_str)
}

pub(crate) async fn store_body(state: &AppState, body: &[u8]) -> Result<Wish, WishError> {
  let payload: Value = serde_json::from_slice(body).unwrap_or(Value::Null);
  let wish = state.store.create(body_text(&payload)).await?;
  info!("stored wish {}", wish.id);
  Ok(wish)
}

/// Seed read shared by every initial-load route. `recent_limit` and
/// `random_limit` are accepted alongside the short names.
pub(crate) async fn seed_from_params(state: &AppState, params: &Params) -> Result<Seed, WishError> {
  let recent = clamp_limit(param(params, &["recent", "recent_limit"]), DEFAULT_RECENT_LIMIT);
  let random = clamp_limit(param(params, &["random", "random_limit"]), DEFAULT_RANDOM_LIMIT);
  let exclude = parse_exclude_ids(param(params, &["exclude_ids"]));
  state.store.seed(recent, random, &exclude).await
}

pub async fn create_wish(
  State(state): State<AppState>,
  body: Bytes,
) -> Result<(StatusCode, Json<Wish>), WishError> {
  let wish = store_body(&state, &body).await?;
  Ok((StatusCode::CREATED, Json(wish)))
}

pub async fn recent_wishes(
  State(state): State<AppState>,
  Query(params): Query<Params>,
) -> Result<Json<Vec<Wish>>, WishError> {
  let limit = clamp_limit(param(&params, &["limit"]), DEFAULT_RECENT_LIMIT);
  Ok(Json(state.store.list_recent(limit).await?))
}

pub async fn random_wishes(
  State(state): State<AppState>,
  Query(params): Query<Params>,
) -> Result<Json<Vec<Wish>>, WishError> {
  let limit = clamp_limit(param(&params, &["limit"]), DEFAULT_RANDOM_LIMIT);
  let exclude = parse_exclude_ids(param(&params, &["exclude_ids"]));
  Ok(Json(state.store.list_random(limit, &exclude).await?))
}

pub async fn seed_wishes(
  State(state): State<AppState>,
  Query(params): Query<Params>,
) -> Result<Json<Seed>, WishError> {
  Ok(Json(seed_from_params(&state, &params).await?))
}

pub async fn delete_wish(
  State(state): State<AppState>,
  Path(id): Path<i64>,
) -> Result<Json<Deleted>, WishError> {
  if state.store.delete(id).await? {
    info!("deleted wish {id}");
  }
  Ok(Json(Deleted::new(id)))
}
