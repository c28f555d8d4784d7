//! HTTP layer for the sign-up board.
//!
//! Exposes an axum [`Router`] serving the month view and the JSON sign-up
//! endpoints, backed by any [`NameRegistry`].

pub mod error;
pub mod handlers;
pub mod view;

pub use error::ApiError;

use std::{path::{Path, PathBuf}, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use serde::Deserialize;
use signup_core::NameRegistry;
use tower_http::trace::TraceLayer;

use handlers::{calendar, names};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Which [`NameRegistry`] implementation backs the server.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  Sqlite,
  Memory,
}

/// Runtime server configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub backend:    Backend,
  pub store_path: PathBuf,
}

impl ServerConfig {
  /// Layer defaults, the optional TOML file at `path`, `SIGNUP_*`
  /// environment variables and finally `port_override` (the value of `PORT`).
  /// A blank `port_override` counts as unset.
  pub fn load(
    path: impl AsRef<Path>,
    port_override: Option<String>,
  ) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .set_default("host", "0.0.0.0")?
      .set_default("port", 8080)?
      .set_default("backend", "sqlite")?
      .set_default("store_path", "names.db")?
      .add_source(config::File::from(path.as_ref()).required(false))
      .add_source(config::Environment::with_prefix("SIGNUP"))
      .set_override_option(
        "port",
        port_override.filter(|p| !p.trim().is_empty()),
      )?
      .build()?
      .try_deserialize()
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<R: NameRegistry> {
  pub registry: Arc<R>,
}

impl<R: NameRegistry> AppState<R> {
  pub fn new(registry: R) -> Self { Self { registry: Arc::new(registry) } }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the sign-up board.
pub fn router<R>(state: AppState<R>) -> Router
where
  R: NameRegistry + Clone + 'static,
{
  Router::new()
    .route("/",            get(calendar::index::<R>))
    .route("/submit-name", post(names::submit::<R>))
    .route("/remove-name", post(names::remove::<R>))
    .route("/names",       get(names::list::<R>))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}

// ─── Integration tests ────────────────────────────────────────────────────────
