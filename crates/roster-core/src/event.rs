//! Inbound webhook payload types.
//!
//! Only the fields the bot acts on are modelled; everything else in the
//! platform's JSON is ignored. Unknown event and message types deserialize
//! successfully so a new platform event never fails a whole delivery.

use serde::{Deserialize, Serialize};

use crate::Result;

/// One webhook delivery: a batch of events.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WebhookPayload {
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub destination: Option<String>,
  #[serde(default)]
  pub events:      Vec<Event>,
}

impl WebhookPayload {
  pub fn from_slice(body: &[u8]) -> Result<Self> { Ok(serde_json::from_slice(body)?) }
}

/// The event discriminator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
  Follow,
  Message,
  Postback,
  #[serde(other)]
  Other,
}

impl EventKind {
  pub fn as_str(&self) -> &'static str {
    match self {
      EventKind::Follow => "follow",
      EventKind::Message => "message",
      EventKind::Postback => "postback",
      EventKind::Other => "other",
    }
  }
}

/// Who the event came from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
  #[serde(rename = "type", default)]
  pub kind:    String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub user_id: Option<String>,
}

/// The message body of a `message` event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageContent {
  /// `text`, `image`, `sticker`, …
  #[serde(rename = "type")]
  pub kind: String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub id:   Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub text: Option<String>,
}

impl MessageContent {
  /// The text, if this is a text message.
  pub fn as_text(&self) -> Option<&str> {
    if self.kind == "text" { self.text.as_deref() } else { None }
  }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Postback {
  pub data: String,
}

/// A single webhook event.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
  #[serde(rename = "type")]
  pub kind:        EventKind,
  /// Absent for events that cannot be answered (unfollow, leave, …).
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub reply_token: Option<String>,
  #[serde(default)]
  pub source:      Source,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub timestamp:   Option<i64>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub message:     Option<MessageContent>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub postback:    Option<Postback>,
}

impl Event {
  pub fn user_id(&self) -> Option<&str> { self.source.user_id.as_deref() }
}
