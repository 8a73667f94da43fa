//! Error type for `roster-line`.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  /// The platform answered with a non-success status.
  #[error("{operation} failed with {status}: {body}")]
  Api {
    operation: &'static str,
    status:    StatusCode,
    body:      String,
  },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
