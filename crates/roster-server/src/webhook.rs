//! `POST /webhook`: verify, parse, dispatch, acknowledge.
//!
//! Once the signature checks out the platform always gets a 200, after every
//! event of the delivery has settled. Per-event failures are only logged.

use axum::{
  extract::State,
  http::{HeaderMap, StatusCode},
};
use bytes::Bytes;
use roster_core::{event::WebhookPayload, messaging::Messenger, store::ProfileStore};
use roster_line::signature::{self, SIGNATURE_HEADER};

use crate::{
  AppState,
  error::{Error, Result},
};

pub async fn handler<S, M>(
  State(state): State<AppState<S, M>>,
  headers: HeaderMap,
  body: Bytes,
) -> Result<StatusCode>
where
  S: ProfileStore + 'static,
  M: Messenger + 'static,
{
  let provided = headers
    .get(SIGNATURE_HEADER)
    .and_then(|v| v.to_str().ok())
    .ok_or(Error::InvalidSignature)?;
  if !signature::verify(&state.config.line_channel_secret, &body, provided) {
    tracing::warn!("webhook rejected: signature mismatch");
    return Err(Error::InvalidSignature);
  }

  let payload = WebhookPayload::from_slice(&body)
    .map_err(|e| Error::BadRequest(format!("invalid webhook body: {e}")))?;

  let total   = payload.events.len();
  let results = state.bot.dispatch_all(payload.events).await;
  let failed  = results.iter().filter(|r| r.is_err()).count();
  tracing::info!(events = total, failed, "webhook delivery settled");

  Ok(StatusCode::OK)
}
