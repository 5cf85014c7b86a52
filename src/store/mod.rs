//! Wish store: write-time validation, query-parameter policy and the SQLite
//! queries behind every API operation.
//!
//! Each call checks out its own pooled connection (or a transaction for
//! [`WishStore::seed`]) and hands it back before returning. Nothing is cached.

use crate::{
  error::WishError,
  models::{response::seed::Seed, wish::wish_row::Wish},
};
use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqliteConnection, SqlitePool};
use std::{collections::BTreeSet, num::IntErrorKind};
use tracing::debug;

/// Maximum wish length in Unicode code points, after trimming.
pub const MAX_WISH_LENGTH: usize = 80;
pub const MIN_LIMIT: i64 = 1;
pub const MAX_LIMIT: i64 = 100;
pub const DEFAULT_RECENT_LIMIT: i64 = 20;
pub const DEFAULT_RANDOM_LIMIT: i64 = 30;
/// Client-supplied exclude ids past this count are ignored so a request never
/// runs into SQLite's bound-parameter ceiling.
pub const MAX_EXCLUDE_IDS: usize = 1000;

/// Trim and length-check wish text. Absent text counts as empty.
pub fn validate_text(raw: Option<&str>) -> Result<String, WishError> {
  let text = raw.unwrap_or_default().trim();
  if text.is_empty() {
    return Err(WishError::Empty);
  }
  if text.chars().count() > MAX_WISH_LENGTH {
    return Err(WishError::TooLong {
      max: MAX_WISH_LENGTH,
    });
  }
  Ok(text.to_string())
}

/// Parse a limit query value. Missing or malformed values fall back to
/// `default`; any integer, including one too large for `i64`, is clamped
/// into `[MIN_LIMIT, MAX_LIMIT]`.
pub fn clamp_limit(raw: Option<&str>, default: i64) -> i64 {
  let Some(raw) = raw else {
    return default.clamp(MIN_LIMIT, MAX_LIMIT);
  };
  let limit = match raw.trim().parse::<i64>() {
    Ok(n) => n,
    Err(e) => match e.kind() {
      IntErrorKind::PosOverflow => MAX_LIMIT,
      IntErrorKind::NegOverflow => MIN_LIMIT,
      _ => default,
    },
  };
  limit.clamp(MIN_LIMIT, MAX_LIMIT)
}

/// Parse a comma-separated id list, silently dropping anything that is not a
/// plain non-negative integer.
pub fn parse_exclude_ids(raw: Option<&str>) -> BTreeSet<i64> {
  let mut ids = BTreeSet::new();
  let tokens = raw
    .unwrap_or_default()
    .split(',')
    .map(str::trim)
    .filter(|t| !t.is_empty() && t.bytes().all(|b| b.is_ascii_digit()))
    .filter_map(|t| t.parse::<i64>().ok());
  for id in tokens {
    if ids.len() >= MAX_EXCLUDE_IDS {
      break;
    }
    ids.insert(id);
  }
  ids
}

/// Build the random-sample query with one bound placeholder per excluded id.
fn random_query(limit: i64, exclude: &BTreeSet<i64>) -> QueryBuilder<'static, Sqlite> {
  let mut qb = QueryBuilder::new("SELECT id, text, created_at FROM wishes");
  if !exclude.is_empty() {
    qb.push(" WHERE id NOT IN (");
    let mut ids = qb.separated(", ");
    for id in exclude {
      ids.push_bind(*id);
    }
    ids.push_unseparated(")");
  }
  qb.push(" ORDER BY RANDOM() LIMIT ");
  qb.push_bind(limit);
  qb
}

async fn fetch_recent(conn: &mut SqliteConnection, limit: i64) -> Result<Vec<Wish>, sqlx::Error> {
  // Ids are assigned in creation order, so they double as a tie-free
  // ordering on created_at.
  sqlx::query_as::<_, Wish>("SELECT id, text, created_at FROM wishes ORDER BY id DESC LIMIT ?")
    .bind(limit)
    .fetch_all(conn)
    .await
}

async fn fetch_random(
  conn: &mut SqliteConnection,
  limit: i64,
  exclude: &BTreeSet<i64>,
) -> Result<Vec<Wish>, sqlx::Error> {
  let mut qb = random_query(limit, exclude);
  qb.build_query_as::<Wish>().fetch_all(conn).await
}

/// Handle to the wishes table. Cloning shares the underlying pool.
#[derive(Clone)]
pub struct WishStore {
  pool: SqlitePool,
}

impl WishStore {
  pub fn new(pool: SqlitePool) -> Self {
    WishStore { pool }
  }

  /// Validate and persist a new wish, returning the stored row.
  pub async fn create(&self, raw_text: Option<&str>) -> Result<Wish, WishError> {
    let text = validate_text(raw_text)?;
    let wish = sqlx::query_as::<_, Wish>(
      "INSERT INTO wishes (text, created_at) VALUES (?, ?) RETURNING id, text, created_at",
    )
    .bind(text)
    .bind(Utc::now())
    .fetch_one(&self.pool)
    .await?;
    debug!(id = wish.id, "stored wish");
    Ok(wish)
  }

  /// Newest wishes first.
  pub async fn list_recent(&self, limit: i64) -> Result<Vec<Wish>, WishError> {
    let mut conn = self.pool.acquire().await?;
    let rows = fetch_recent(&mut conn, limit.clamp(MIN_LIMIT, MAX_LIMIT)).await?;
    Ok(rows)
  }

  /// Uniform random sample of wishes whose id is not in `exclude`. Returns
  /// everything that is left when fewer than `limit` qualify.
  pub async fn list_random(
    &self,
    limit: i64,
    exclude: &BTreeSet<i64>,
  ) -> Result<Vec<Wish>, WishError> {
    let mut conn = self.pool.acquire().await?;
    let rows = fetch_random(&mut conn, limit.clamp(MIN_LIMIT, MAX_LIMIT), exclude).await?;
    Ok(rows)
  }

  /// Remove a wish by id. Returns whether a row was removed; a missing id is
  /// not an error.
  pub async fn delete(&self, id: i64) -> Result<bool, WishError> {
    let res = sqlx::query("DELETE FROM wishes WHERE id = ?")
      .bind(id)
      .execute(&self.pool)
      .await?;
    let removed = res.rows_affected() > 0;
    debug!(id, removed, "delete wish");
    Ok(removed)
  }

  /// Recent wishes plus a random sample that never repeats any of them.
  ///
  /// Both reads share one transaction so the random sample is drawn from the
  /// same snapshot the recent list came from.
  pub async fn seed(
    &self,
    recent_limit: i64,
    random_limit: i64,
    exclude: &BTreeSet<i64>,
  ) -> Result<Seed, WishError> {
    let mut tx = self.pool.begin().await?;
    let recent = fetch_recent(&mut tx, recent_limit.clamp(MIN_LIMIT, MAX_LIMIT)).await?;
    let mut exclude = exclude.clone();
    exclude.extend(recent.iter().map(|w| w.id));
    let random = fetch_random(&mut tx, random_limit.clamp(MIN_LIMIT, MAX_LIMIT), &exclude).await?;
    tx.commit().await?;
    Ok(Seed { recent, random })
  }

  pub async fn count(&self) -> Result<i64, WishError> {
    let n: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM wishes")
      .fetch_one(&self.pool)
      .await?;
    Ok(n)
  }
}
