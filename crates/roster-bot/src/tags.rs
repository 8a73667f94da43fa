//! Tag directory: segment name → platform tag id.
//!
//! Every resolution re-reads the full remote tag list and scans it for an
//! exact name match, creating the tag when absent. Nothing is cached locally.
//!
//! Two concurrent resolutions of the same brand-new name would both see it
//! missing and both create it. Within one process, resolutions of the same
//! name are serialised by a per-name async lock. Separate processes can still
//! race; the platform gives no idempotency guarantee on create.

use std::{
  collections::HashMap,
  sync::{Arc, Mutex, PoisonError},
};

use roster_core::messaging::Messenger;

use crate::{Error, Result};

#[derive(Clone, Default)]
pub struct TagDirectory {
  locks: Arc<Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>>,
}

impl TagDirectory {
  fn lock_for(&self, name: &str) -> Arc<tokio::sync::Mutex<()>> {
    let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
    Arc::clone(locks.entry(name.to_owned()).or_default())
  }

  /// Return the id of the remote tag called `name`, creating it if needed.
  pub async fn resolve_or_create<M: Messenger>(&self, messenger: &M, name: &str) -> Result<String> {
    let lock   = self.lock_for(name);
    let _guard = lock.lock().await;

    let tags = messenger.list_tags().await.map_err(|e| tag_error(name, e))?;
    if let Some(tag) = tags.into_iter().find(|t| t.name == name) {
      tracing::debug!(segment = name, tag_id = %tag.tag_id, "tag found");
      return Ok(tag.tag_id);
    }

    let tag_id = messenger
      .create_tag(name.to_owned())
      .await
      .map_err(|e| tag_error(name, e))?;
    tracing::info!(segment = name, tag_id = %tag_id, "tag created");
    Ok(tag_id)
  }
}

fn tag_error<E: std::error::Error + Send + Sync + 'static>(name: &str, e: E) -> Error {
  Error::TagResolution { name: name.to_owned(), source: Box::new(e) }
}

#[cfg(test)]
mod tests {
  use std::time::Duration;

  use super::*;
  use crate::testing::{Call, RecordingMessenger};

  #[tokio::test]
  async fn existing_tag_is_reused() {
    let messenger = RecordingMessenger::default().with_tag("t-law", "Law");
    let dir       = TagDirectory::default();

    let id = dir.resolve_or_create(&messenger, "Law").await.unwrap();
    assert_eq!(id, "t-law");
    assert_eq!(messenger.count(|c| matches!(c, Call::CreateTag(_))), 0);
  }

  #[tokio::test]
  async fn missing_tag_is_created_then_found() {
    let messenger = RecordingMessenger::default();
    let dir       = TagDirectory::default();

    let first  = dir.resolve_or_create(&messenger, "Arts").await.unwrap();
    let second = dir.resolve_or_create(&messenger, "Arts").await.unwrap();
    assert_eq!(first, second);
    assert_eq!(messenger.count(|c| matches!(c, Call::CreateTag(_))), 1);
    // no local cache: both resolutions listed remotely
    assert_eq!(messenger.count(|c| matches!(c, Call::ListTags)), 2);
  }

  #[tokio::test]
  async fn name_match_is_exact() {
    let messenger = RecordingMessenger::default().with_tag("t-1", "law");
    let dir       = TagDirectory::default();
    let id = dir.resolve_or_create(&messenger, "Law").await.unwrap();
    assert_ne!(id, "t-1");
  }

  #[tokio::test]
  async fn list_failure_is_reported_without_create() {
    let messenger = RecordingMessenger::default().failing("list_tags");
    let dir       = TagDirectory::default();

    let err = dir.resolve_or_create(&messenger, "Law").await.unwrap_err();
    assert!(matches!(err, Error::TagResolution { ref name, .. } if name == "Law"));
    assert_eq!(messenger.count(|c| matches!(c, Call::CreateTag(_))), 0);
  }

  #[tokio::test]
  async fn concurrent_resolutions_create_once() {
    let messenger = Arc::new(
      RecordingMessenger::default().with_list_delay(Duration::from_millis(20)),
    );
    let dir = TagDirectory::default();

    let mut handles = Vec::new();
    for _ in 0..5 {
      let messenger = Arc::clone(&messenger);
      let dir       = dir.clone();
      handles.push(tokio::spawn(async move {
        dir.resolve_or_create(messenger.as_ref(), "Medicine").await
      }));
    }

    let mut ids = Vec::new();
    for handle in handles {
      ids.push(handle.await.unwrap().unwrap());
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);
    assert_eq!(messenger.count(|c| matches!(c, Call::CreateTag(_))), 1);
  }
}
