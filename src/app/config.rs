//! Runtime configuration read from the environment.

use std::net::SocketAddr;

const DEFAULT_DATABASE: &str = "sqlite://wishes.db";
const DEFAULT_ADDR: &str = "127.0.0.1:5000";

#[derive(Debug, Clone)]
pub struct AppConfig {
  /// sqlx SQLite URL (`WISHWALL_DATABASE`).
  pub database_url: String,
  /// HTTP listen address (`WISHWALL_ADDR`).
  pub addr: SocketAddr,
}

impl AppConfig {
  pub fn from_env() -> Result<Self, std::net::AddrParseError> {
    Self::from_lookup(|key| std::env::var(key).ok())
  }

  fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, std::net::AddrParseError> {
    let database_url = lookup("WISHWALL_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string());
    let addr = lookup("WISHWALL_ADDR")
      .unwrap_or_else(|| DEFAULT_ADDR.to_string())
      .parse()?;
    Ok(AppConfig { database_url, addr })
  }
}
