//! Roster server binary.
//!
//! Reads `roster.toml` (or the path given with `--config`) plus `ROSTER_*`
//! environment variables, opens the SQLite store, and serves the webhook and
//! admin endpoints over HTTP.
//!
//! # Password hash generation
//!
//! To generate the argon2 PHC string for `admin_password_hash`:
//!
//! ```text
//! cargo run -p roster-server --bin roster -- --hash-password
//! ```

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use anyhow::Context as _;
use clap::Parser;
use roster_bot::Bot;
use roster_line::{LineClient, LineConfig};
use roster_server::{AppState, ServerConfig, auth};
use roster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Roster LINE segmentation bot")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "roster.toml")]
  config: PathBuf,

  /// Print the argon2 hash for a password entered on stdin and exit.
  #[arg(long)]
  hash_password: bool,
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

  if cli.hash_password {
    let password = read_password()?;
    let hash = auth::hash_password(&password).map_err(|e| anyhow::anyhow!("argon2 error: {e}"))?;
    println!("{hash}");
    return Ok(());
  }

  let settings = config::Config::builder()
    .add_source(config::File::from(cli.config).required(false))
    .add_source(config::Environment::with_prefix("ROSTER"))
    .build()
    .context("failed to read configuration")?;

  let server_cfg: ServerConfig = settings
    .try_deserialize()
    .context("failed to deserialise ServerConfig")?;

  let catalog = server_cfg.catalog().context("invalid segment catalog")?;

  let home       = std::env::var_os("HOME").map(PathBuf::from);
  let store_path = under_home(&server_cfg.store_path, home.as_deref());
  let store = SqliteStore::open(&store_path)
    .await
    .with_context(|| format!("failed to open store at {store_path:?}"))?;

  let line = LineClient::new(LineConfig {
    api_base:             server_cfg.line_api_base.clone(),
    channel_access_token: server_cfg.line_channel_access_token.clone(),
  })
  .context("failed to build LINE client")?;

  tracing::info!(segments = catalog.len(), store = ?store_path, "starting");

  let bot     = Bot::new(Arc::new(store), Arc::new(line), catalog).with_layout(server_cfg.button_layout);
  let address = format!("{}:{}", server_cfg.host, server_cfg.port);
  let app     = roster_server::router(AppState::new(bot, server_cfg));

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;

  Ok(())
}

/// The first line of stdin, without its line ending.
fn read_password() -> anyhow::Result<String> {
  eprint!("Password: ");
  let password = std::io::stdin()
    .lines()
    .next()
    .context("no password on stdin")??;
  anyhow::ensure!(!password.is_empty(), "password must not be empty");
  Ok(password)
}

/// Resolve a `~`-relative path against `home`. Other paths, or any path
/// when `home` is unknown, are returned unchanged.
fn under_home(path: &Path, home: Option<&Path>) -> PathBuf {
  match (path.strip_prefix("~"), home) {
    (Ok(rest), Some(home)) => home.join(rest),
    _ => path.to_path_buf(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn tilde_paths_resolve_under_home() {
    let home = Path::new("/home/roster");
    assert_eq!(
      under_home(Path::new("~/data/roster.db"), Some(home)),
      PathBuf::from("/home/roster/data/roster.db")
    );
    assert_eq!(under_home(Path::new("~"), Some(home)), PathBuf::from("/home/roster"));
  }

  #[test]
  fn other_paths_are_untouched() {
    let home = Path::new("/home/roster");
    assert_eq!(under_home(Path::new("roster.db"), Some(home)), PathBuf::from("roster.db"));
    assert_eq!(under_home(Path::new("/var/roster.db"), Some(home)), PathBuf::from("/var/roster.db"));
    assert_eq!(under_home(Path::new("~other/x"), Some(home)), PathBuf::from("~other/x"));
    assert_eq!(under_home(Path::new("~/x"), None), PathBuf::from("~/x"));
  }
}
