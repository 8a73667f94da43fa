//! Admin broadcast: fan one text out to every user, or to one segment.
//!
//! Recipients are sent in batches of [`MULTICAST_LIMIT`], one multicast per
//! batch, strictly in order. The first failing batch stops the loop; batches
//! before it stay delivered.

use roster_core::{
  message::Message,
  messaging::{MULTICAST_LIMIT, Messenger},
  store::ProfileStore,
};
use serde::{Deserialize, Serialize};

use crate::{Bot, Error, Result};

#[derive(Debug, Clone, Default, Deserialize)]
pub struct BroadcastRequest {
  /// Exact segment name; empty or absent means everyone.
  #[serde(default)]
  pub faculty: Option<String>,
  #[serde(default)]
  pub message: Option<String>,
}

impl BroadcastRequest {
  fn filter(&self) -> Option<String> { self.faculty.clone().filter(|f| !f.is_empty()) }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BroadcastReport {
  pub total_recipients: usize,
  pub batches:          usize,
}

impl<S, M> Bot<S, M>
where
  S: ProfileStore + 'static,
  M: Messenger + 'static,
{
  pub async fn broadcast(&self, request: BroadcastRequest) -> Result<BroadcastReport> {
    let text = match request.message.as_deref() {
      Some(text) if !text.is_empty() => text.to_owned(),
      _ => return Err(Error::EmptyMessage),
    };
    let faculty = request.filter();

    let recipients = self
      .store
      .recipients(faculty.clone())
      .await
      .map_err(Error::store)?;
    let total = recipients.len();
    tracing::info!(
      segment = faculty.as_deref().unwrap_or("*"),
      recipients = total,
      "broadcast started"
    );

    let mut delivered = 0;
    let mut batches   = 0;
    for chunk in recipients.chunks(MULTICAST_LIMIT) {
      if let Err(e) = self
        .messenger
        .multicast(chunk.to_vec(), vec![Message::text(text.clone())])
        .await
      {
        tracing::error!(delivered, total, error = %e, "multicast batch failed");
        return Err(Error::BroadcastAborted { delivered, total, source: Box::new(e) });
      }
      delivered += chunk.len();
      batches += 1;
    }

    tracing::info!(recipients = total, batches, "broadcast finished");
    Ok(BroadcastReport { total_recipients: total, batches })
  }
}
