//! A stored wish, as read from SQLite and returned by the API.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Wish {
  pub id: i64,
  pub text: String,
  pub created_at: DateTime<Utc>,
}
