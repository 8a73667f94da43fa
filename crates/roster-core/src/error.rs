//! Error types for `roster-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("segment catalog is empty")]
  EmptyCatalog,

  #[error("duplicate segment id: {0}")]
  DuplicateSegmentId(u32),

  #[error("duplicate segment name: {0:?}")]
  DuplicateSegmentName(String),

  #[error("segment name must not be blank (id {0})")]
  BlankSegmentName(u32),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
