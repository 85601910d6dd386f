//! duel server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store, runs the startup reset and bootstrap, and serves the voting pages
//! over HTTP.

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use duel_core::RankingEngine;
use duel_store_sqlite::SqliteStore;
use duel_web::{AppState, ServerConfig};
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Pairwise quote ranking server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml")]
  config: PathBuf,

  /// Port to listen on; overrides the configuration file.
  #[arg(short, long, env = "PORT")]
  port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  // Initialise tracing.
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let server_cfg = ServerConfig::load(&cli.config, cli.port)
    .with_context(|| format!("failed to load configuration from {:?}", cli.config))?;

  let store_path     = expand_tilde(&server_cfg.store_path);
  let bootstrap_path = expand_tilde(&server_cfg.bootstrap_path);

  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  // Reset and bootstrap must both succeed before the listener binds.
  let engine = RankingEngine::new(Arc::new(store));
  let report = engine
    .initialize(&bootstrap_path)
    .await
    .context("failed to initialise item store")?;
  tracing::info!(reset = report.reset, imported = report.imported, "store ready");

  let app = duel_web::router(AppState { engine });
  let address = server_cfg.address();

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
