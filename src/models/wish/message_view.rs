//! Wish as served by the `/api/messages` routes, which name the text
//! `message`.

use super::wish_row::Wish;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MessageView {
  pub id: i64,
  pub message: String,
  pub created_at: DateTime<Utc>,
}

impl From<Wish> for MessageView {
  fn from(w: Wish) -> Self {
    MessageView {
      id: w.id,
      message: w.text,
      created_at: w.created_at,
    }
  }
}
