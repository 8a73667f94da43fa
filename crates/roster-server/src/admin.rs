//! Admin endpoints: user listing and broadcast.

use axum::{Json, extract::State};
use bytes::Bytes;
use roster_bot::{BroadcastRequest, replies};
use roster_core::{messaging::Messenger, store::ProfileStore, user::User};
use serde::Serialize;

use crate::{
  AppState,
  auth::Authenticated,
  error::{Error, Result},
};

#[derive(Debug, Serialize)]
pub struct UsersResponse {
  pub status:      &'static str,
  pub total_users: usize,
  pub users:       Vec<User>,
}

#[derive(Debug, Serialize)]
pub struct BroadcastResponse {
  pub status:           &'static str,
  pub total_recipients: usize,
  pub message:          &'static str,
}

/// `GET /admin/users`: every stored user, newest registration first.
pub async fn users<S, M>(
  _auth: Authenticated,
  State(state): State<AppState<S, M>>,
) -> Result<Json<UsersResponse>>
where
  S: ProfileStore + 'static,
  M: Messenger + 'static,
{
  let users = state
    .bot
    .store()
    .list_users()
    .await
    .map_err(|e| Error::Bot(roster_bot::Error::Store(Box::new(e))))?;

  Ok(Json(UsersResponse { status: "success", total_users: users.len(), users }))
}

/// `POST /admin/broadcast`
pub async fn broadcast<S, M>(
  _auth: Authenticated,
  State(state): State<AppState<S, M>>,
  body: Bytes,
) -> Result<Json<BroadcastResponse>>
where
  S: ProfileStore + 'static,
  M: Messenger + 'static,
{
  let request: BroadcastRequest = serde_json::from_slice(&body)
    .map_err(|e| Error::BadRequest(format!("invalid request body: {e}")))?;

  let report = state.bot.broadcast(request).await.map_err(|e| match e {
    roster_bot::Error::EmptyMessage => Error::BadRequest(replies::BROADCAST_EMPTY.to_owned()),
    e => Error::Bot(e),
  })?;

  Ok(Json(BroadcastResponse {
    status:           "success",
    total_recipients: report.total_recipients,
    message:          replies::BROADCAST_SENT,
  }))
}
