//! Encoding and decoding helpers between domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 UTC strings with a fixed microsecond
//! precision so that lexical order matches chronological order.

use chrono::{DateTime, SecondsFormat, Utc};
use roster_core::user::User;

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339_opts(SecondsFormat::Micros, true) }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawUser::from_row`].
pub const USER_COLUMNS: &str =
  "line_user_id, display_name, picture_url, faculty, registered_at, last_interaction";

/// Raw strings read directly from a `users` row.
pub struct RawUser {
  pub line_user_id:     String,
  pub display_name:     Option<String>,
  pub picture_url:      Option<String>,
  pub faculty:          Option<String>,
  pub registered_at:    String,
  pub last_interaction: String,
}

impl RawUser {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(RawUser {
      line_user_id:     row.get(0)?,
      display_name:     row.get(1)?,
      picture_url:      row.get(2)?,
      faculty:          row.get(3)?,
      registered_at:    row.get(4)?,
      last_interaction: row.get(5)?,
    })
  }

  pub fn into_user(self) -> Result<User> {
    Ok(User {
      line_user_id:     self.line_user_id,
      display_name:     self.display_name,
      picture_url:      self.picture_url,
      faculty:          self.faculty,
      registered_at:    decode_dt(&self.registered_at)?,
      last_interaction: decode_dt(&self.last_interaction)?,
    })
  }
}
