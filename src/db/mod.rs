//! Database helpers: schema setup and path handling.

use sqlx::SqlitePool;
use std::{fs, io, path::Path};

/// Create the wishes table if it is absent.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
  // AUTOINCREMENT keeps ids from being reused after a delete.
  sqlx::query(
    r#"CREATE TABLE IF NOT EXISTS wishes (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            text TEXT NOT NULL,
            created_at TEXT NOT NULL
        )"#,
  )
  .execute(pool)
  .await?;
  Ok(())
}

/// Filesystem path named by a sqlx SQLite URL, or `None` for in-memory and
/// non-SQLite URLs.
fn sqlite_file(db_url: &str) -> Option<&Path> {
  let rest = db_url
    .strip_prefix("sqlite://")
    .or_else(|| db_url.strip_prefix("sqlite:"))?;
  let path = rest.split_once('?').map_or(rest, |(p, _)| p);
  if path.is_empty() || path == ":memory:" {
    return None;
  }
  Some(Path::new(path))
}

/// Create the database file (and its directory) a SQLite URL points at, so
/// the first connect does not fail on a fresh checkout.
pub fn ensure_sqlite_path(db_url: &str) -> io::Result<String> {
  if let Some(file) = sqlite_file(db_url) {
    if let Some(dir) = file.parent().filter(|d| !d.as_os_str().is_empty()) {
      fs::create_dir_all(dir)?;
    }
    fs::OpenOptions::new().create(true).append(true).open(file)?;
  }
  Ok(db_url.to_string())
}
