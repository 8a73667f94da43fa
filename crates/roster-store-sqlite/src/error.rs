//! Error type for `roster-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// The upserted row could not be read back.
  #[error("user vanished after upsert: {0}")]
  UserVanished(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
