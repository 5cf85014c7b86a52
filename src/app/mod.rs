//! Application setup and runtime.

pub mod config;

use crate::{db, http, store::WishStore};
use config::AppConfig;
use sqlx::sqlite::SqlitePoolOptions;
use tracing::info;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
  pub store: WishStore,
}

/// Connect the database and serve HTTP until the process stops.
pub async fn run() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
  crate::util::init_tracing();

  let cfg = AppConfig::from_env()?;
  let db_url = db::ensure_sqlite_path(&cfg.database_url)?;
  let pool = SqlitePoolOptions::new()
    .max_connections(5)
    .connect(&db_url)
    .await?;
  db::run_migrations(&pool).await?;

  let store = WishStore::new(pool);
  info!("{} wishes on the wall ({})", store.count().await?, db_url);

  let app = http::build_router(AppState { store });

  info!("wish wall:       http://{}/", cfg.addr);
  info!("submit endpoint: POST http://{}/api/wishes", cfg.addr);
  info!("seed endpoint:   GET  http://{}/api/wishes/seed", cfg.addr);

  let listener = tokio::net::TcpListener::bind(cfg.addr).await?;
  axum::serve(listener, app).await?;
  Ok(())
}
