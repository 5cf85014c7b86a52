//! wishwall library entrypoint.
//!
//! Modules:
//! - `app`: startup, configuration, shared state
//! - `http`: Axum router and handlers
//! - `store`: the wish store (validation and queries)
//! - `db`: migrations and SQLite helpers
//! - `error`: error type and its HTTP mapping
//! - `models`: typed records used across layers
//! - `util`: tracing and HTML escaping

pub mod app;
pub mod db;
pub mod error;
pub mod http;
pub mod models;
pub mod store;
pub mod util;
