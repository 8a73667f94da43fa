//! HTTP surface for Roster.
//!
//! Exposes an axum [`Router`] with the platform webhook, the admin endpoints
//! and a liveness probe, backed by any [`ProfileStore`] and [`Messenger`].

pub mod admin;
pub mod auth;
pub mod error;
pub mod webhook;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, post},
};
use roster_bot::{Bot, ButtonLayout};
use roster_core::{
  messaging::Messenger,
  segment::{Segment, SegmentCatalog},
  store::ProfileStore,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

use auth::AuthConfig;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `roster.toml` and
/// `ROSTER_*` environment variables.
#[derive(Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:                      String,
  #[serde(default = "default_port")]
  pub port:                      u16,
  #[serde(default = "default_store_path")]
  pub store_path:                PathBuf,
  pub line_channel_access_token: String,
  pub line_channel_secret:       String,
  #[serde(default = "default_api_base")]
  pub line_api_base:             String,
  pub admin_username:            String,
  pub admin_password_hash:       String,
  /// Replaces the built-in faculty list when set.
  #[serde(default)]
  pub segments:                  Option<Vec<Segment>>,
  /// `standard` (default) or `compact`.
  #[serde(default)]
  pub button_layout:             ButtonLayout,
}

fn default_host() -> String { "0.0.0.0".to_string() }

fn default_port() -> u16 { 3000 }

fn default_store_path() -> PathBuf { PathBuf::from("roster.db") }

fn default_api_base() -> String { roster_line::client::DEFAULT_API_BASE.to_string() }

impl ServerConfig {
  /// The configured catalog, or the built-in one.
  pub fn catalog(&self) -> roster_core::Result<SegmentCatalog> {
    match &self.segments {
      Some(segments) => SegmentCatalog::new(segments.clone()),
      None => Ok(SegmentCatalog::default()),
    }
  }

  pub fn auth(&self) -> AuthConfig {
    AuthConfig {
      username:      self.admin_username.clone(),
      password_hash: self.admin_password_hash.clone(),
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S, M> {
  pub bot:    Bot<S, M>,
  pub config: Arc<ServerConfig>,
  pub auth:   Arc<AuthConfig>,
}

impl<S, M> Clone for AppState<S, M> {
  fn clone(&self) -> Self {
    Self {
      bot:    self.bot.clone(),
      config: Arc::clone(&self.config),
      auth:   Arc::clone(&self.auth),
    }
  }
}

impl<S, M> AppState<S, M>
where
  S: ProfileStore,
  M: Messenger,
{
  pub fn new(bot: Bot<S, M>, config: ServerConfig) -> Self {
    Self {
      bot,
      auth: Arc::new(config.auth()),
      config: Arc::new(config),
    }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

pub fn router<S, M>(state: AppState<S, M>) -> Router
where
  S: ProfileStore + 'static,
  M: Messenger + 'static,
{
  Router::new()
    .route("/webhook",         post(webhook::handler::<S, M>))
    .route("/admin/users",     get(admin::users::<S, M>))
    .route("/admin/broadcast", post(admin::broadcast::<S, M>))
    .route("/healthz",         get(|| async { "ok" }))
    .layer(TraceLayer::new_for_http())
    .with_state(state)
}
