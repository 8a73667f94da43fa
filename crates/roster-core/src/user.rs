//! User: one row per platform user who has ever followed the bot.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A stored user profile.
///
/// `registered_at` is set once, at first contact. Everything else is
/// last-known state and is overwritten on later contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
  pub line_user_id:     String,
  pub display_name:     Option<String>,
  pub picture_url:      Option<String>,
  /// Display name of the selected segment, or `None` if never chosen.
  pub faculty:          Option<String>,
  pub registered_at:    DateTime<Utc>,
  pub last_interaction: DateTime<Utc>,
}

/// The display profile reported by the messaging platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
  pub user_id:        String,
  pub display_name:   String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub picture_url:    Option<String>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub status_message: Option<String>,
}
