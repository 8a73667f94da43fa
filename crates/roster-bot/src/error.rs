//! Error type for `roster-bot`.

use thiserror::Error;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, Error)]
pub enum Error {
  #[error("store error: {0}")]
  Store(#[source] BoxError),

  #[error("messaging error: {0}")]
  Messaging(#[source] BoxError),

  /// Looking up or creating the remote tag for a segment failed.
  #[error("could not resolve tag {name:?}: {source}")]
  TagResolution {
    name:   String,
    #[source]
    source: BoxError,
  },

  /// A multicast batch failed; earlier batches were already delivered.
  #[error("broadcast aborted after {delivered} of {total} recipients: {source}")]
  BroadcastAborted {
    delivered: usize,
    total:     usize,
    #[source]
    source:    BoxError,
  },

  #[error("broadcast message is empty")]
  EmptyMessage,

  #[error("event has no source user id")]
  MissingUserId,

  #[error("event task failed: {0}")]
  Task(#[from] tokio::task::JoinError),
}

impl Error {
  pub(crate) fn store<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
    Error::Store(Box::new(e))
  }

  pub(crate) fn messaging<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
    Error::Messaging(Box::new(e))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
