//! Combined recent + random payload for the initial page load.

use crate::models::wish::{message_view::MessageView, wish_row::Wish};
use serde::Serialize;

/// `random` never shares an id with `recent`.
#[derive(Debug, Serialize)]
pub struct Seed {
  pub recent: Vec<Wish>,
  pub random: Vec<Wish>,
}

#[derive(Debug, Serialize)]
pub struct MessageSeed {
  pub recent: Vec<MessageView>,
  pub random: Vec<MessageView>,
}

impl From<Seed> for MessageSeed {
  fn from(s: Seed) -> Self {
    MessageSeed {
      recent: s.recent.into_iter().map(MessageView::from).collect(),
      random: s.random.into_iter().map(MessageView::from).collect(),
    }
  }
}
