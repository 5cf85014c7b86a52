//! Acknowledgement returned by the delete endpoint.

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct Deleted {
  pub status: &'static str,
  pub id: i64,
}

impl Deleted {
  pub fn new(id: i64) -> Self {
    Deleted {
      status: "deleted",
      id,
    }
  }
}
