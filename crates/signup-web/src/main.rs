//! Sign-up board server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the
//! configured name registry, and serves the board over HTTP. The `PORT`
//! environment variable, when set, overrides the configured port.

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::Parser;
use signup_core::MemoryRegistry;
use signup_store_sqlite::SqliteRegistry;
use signup_web::{AppState, Backend, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Calendar sign-up board server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config, std::env::var("PORT").ok())
    .context("failed to load configuration")?;

  let app = match server_cfg.backend {
    Backend::Memory => {
      tracing::info!("using in-memory registry; sign-ups will not survive a restart");
      signup_web::router(AppState::new(MemoryRegistry::new()))
    }
    Backend::Sqlite => {
      let store_path = expand_tilde(&server_cfg.store_path);
      let registry = SqliteRegistry::open(&store_path)
        .await
        .with_context(|| format!("failed to open store at {store_path:?}"))?;
      tracing::info!(path = %store_path.display(), "opened sqlite registry");
      signup_web::router(AppState::new(registry))
    }
  };

  let address = format!("{}:{}", server_cfg.host, server_cfg.port);

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}
