//! roster-server binary.
//!
//! Loads `.env.<ROSTER_ENV>` and `.env` if present, reads configuration from
//! an optional TOML file and `ROSTER_*` variables, opens the SQLite store and
//! serves the JSON API until SIGINT or SIGTERM.
//!
//! ```
//! ROSTER_DATABASE_URL=sqlite://roster.db roster-server --seed
//! ```

use std::{future::IntoFuture, path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::Parser;
use roster_api::{AppState, ServerConfig, config::ENV_PREFIX, seed};
use roster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster person API server")]
struct Cli {
  /// Optional TOML configuration file; `ROSTER_*` variables override it.
  #[arg(short, long, value_name = "FILE")]
  config: Option<PathBuf>,

  /// Insert the sample people before serving. Existing names are skipped.
  #[arg(long)]
  seed: bool,

  /// Exit after seeding instead of starting the server.
  #[arg(long, requires = "seed")]
  seed_only: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  let cli = Cli::parse();

  load_dotenv();

  let server_cfg = ServerConfig::load(cli.config.as_deref())
    .context("failed to load configuration")?;

  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::from(server_cfg.log_level).into())
        .from_env_lossy(),
    )
    .init();

  tracing::info!(env = %server_cfg.env, "starting roster-server");

  let store = SqliteStore::connect(&server_cfg.database_url)
    .await
    .with_context(|| {
      format!("failed to open store at {}", server_cfg.database_url)
    })?;
  tracing::info!("database connected");

  let state = AppState::new(Arc::new(store.clone()));

  if cli.seed {
    let report = seed::seed(&state.create_person)
      .await
      .context("failed to seed database")?;
    tracing::info!(
      created = report.created,
      skipped = report.skipped,
      "seeding finished"
    );
    if cli.seed_only {
      drop(state);
      store.close().await.context("failed to close store")?;
      return Ok(());
    }
  }

  let app = roster_api::app(state, server_cfg.env);
  let address = server_cfg.address();

  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;
  tracing::info!("Listening on http://{address}");

  let server = axum::serve(listener, app).with_graceful_shutdown(shutdown_signal());
  serve_then_close(server, store).await
}

/// Await the server, then close the store whatever the outcome. A server
/// error takes precedence over a close error.
async fn serve_then_close<F>(server: F, store: SqliteStore) -> anyhow::Result<()>
where
  F: IntoFuture<Output = std::io::Result<()>>,
{
  let served = server.await.context("server error");

  tracing::info!("server stopped, closing database");
  let closed = store.close().await.context("failed to close store");
  if closed.is_ok() {
    tracing::info!("database disconnected");
  }

  served?;
  closed
}

/// Environment-specific file first, so its values win over `.env`.
/// Missing files are not an error.
fn load_dotenv() {
  let env = std::env::var(format!("{ENV_PREFIX}_ENV"))
    .unwrap_or_else(|_| "development".to_owned());
  dotenvy::from_filename(format!(".env.{env}")).ok();
  dotenvy::dotenv().ok();
}

async fn shutdown_signal() {
  let ctrl_c = async {
    if let Err(e) = tokio::signal::ctrl_c().await {
      tracing::error!(error = %e, "failed to listen for ctrl-c");
      std::future::pending::<()>().await;
    }
  };

  #[cfg(unix)]
  let terminate = async {
    match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
    {
      Ok(mut sig) => {
        sig.recv().await;
      }
      Err(e) => {
        tracing::error!(error = %e, "failed to listen for SIGTERM");
        std::future::pending::<()>().await;
      }
    }
  };

  #[cfg(not(unix))]
  let terminate = std::future::pending::<()>();

  tokio::select! {
    () = ctrl_c => tracing::info!("received ctrl-c, shutting down"),
    () = terminate => tracing::info!("received SIGTERM, shutting down"),
  }
}

#[cfg(test)]
mod tests {
  use roster_core::{person::ListOptions, store::PersonStore as _};

  use super::*;

  #[tokio::test]
  async fn store_is_closed_after_a_server_error() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let other = store.clone();

    let result = serve_then_close(
      async { Err(std::io::Error::other("listener lost")) },
      store,
    )
    .await;

    let err = result.unwrap_err();
    assert!(format!("{err:#}").contains("listener lost"), "{err:#}");
    assert!(other.find_all(&ListOptions::default()).await.is_err());
  }

  #[tokio::test]
  async fn store_is_closed_after_a_clean_stop() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let handle = store.clone();

    serve_then_close(async { Ok(()) }, store).await.unwrap();
    assert!(handle.find_all(&ListOptions::default()).await.is_err());
  }
}
