//! Test doubles: a recording platform fake and an always-failing store.

use std::{
  collections::{HashMap, HashSet},
  sync::Mutex,
  time::Duration,
};

use roster_core::{
  message::Message,
  messaging::{Messenger, Tag},
  store::ProfileStore,
  user::{Profile, User},
};
use roster_store_sqlite::SqliteStore;

use crate::Bot;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
  GetProfile(String),
  Reply { token: String, messages: Vec<Message> },
  Multicast { to: Vec<String> },
  ListTags,
  CreateTag(String),
  ApplyTag { user_id: String, tag_id: String },
}

#[derive(Debug, thiserror::Error)]
#[error("fake platform failure in {0}")]
pub struct FakeError(pub &'static str);

/// In-memory stand-in for the platform that records every call.
#[derive(Default)]
pub struct RecordingMessenger {
  calls:             Mutex<Vec<Call>>,
  tags:              Mutex<Vec<Tag>>,
  profiles:          HashMap<String, Profile>,
  failing:           HashSet<&'static str>,
  /// Zero-based index of the multicast call that fails.
  fail_multicast_at: Option<usize>,
  list_delay:        Option<Duration>,
}

impl RecordingMessenger {
  pub fn with_tag(self, tag_id: &str, name: &str) -> Self {
    self.tags.lock().unwrap().push(Tag { tag_id: tag_id.into(), name: name.into() });
    self
  }

  pub fn with_profile(mut self, user_id: &str, display_name: &str) -> Self {
    self.profiles.insert(user_id.into(), Profile {
      user_id:        user_id.into(),
      display_name:   display_name.into(),
      picture_url:    Some(format!("https://cdn.example/{user_id}")),
      status_message: None,
    });
    self
  }

  pub fn failing(mut self, operation: &'static str) -> Self {
    self.failing.insert(operation);
    self
  }

  pub fn fail_multicast_at(mut self, index: usize) -> Self {
    self.fail_multicast_at = Some(index);
    self
  }

  pub fn with_list_delay(mut self, delay: Duration) -> Self {
    self.list_delay = Some(delay);
    self
  }

  fn record(&self, call: Call) { self.calls.lock().unwrap().push(call); }

  fn check(&self, operation: &'static str) -> Result<(), FakeError> {
    if self.failing.contains(operation) { Err(FakeError(operation)) } else { Ok(()) }
  }

  pub fn calls(&self) -> Vec<Call> { self.calls.lock().unwrap().clone() }

  pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
    self.calls.lock().unwrap().iter().filter(|c| pred(c)).count()
  }

  /// Messages of every reply, in call order.
  pub fn replies(&self) -> Vec<Vec<Message>> {
    self
      .calls()
      .into_iter()
      .filter_map(|c| match c {
        Call::Reply { messages, .. } => Some(messages),
        _ => None,
      })
      .collect()
  }

  /// Recipient counts of every multicast, in call order.
  pub fn multicast_sizes(&self) -> Vec<usize> {
    self
      .calls()
      .into_iter()
      .filter_map(|c| match c {
        Call::Multicast { to } => Some(to.len()),
        _ => None,
      })
      .collect()
  }

  pub fn tags(&self) -> Vec<Tag> { self.tags.lock().unwrap().clone() }
}

impl Messenger for RecordingMessenger {
  type Error = FakeError;

  async fn get_profile(&self, user_id: String) -> Result<Profile, FakeError> {
    self.record(Call::GetProfile(user_id.clone()));
    self.check("get_profile")?;
    Ok(self.profiles.get(&user_id).cloned().unwrap_or_else(|| Profile {
      display_name:   format!("User {user_id}"),
      user_id,
      picture_url:    None,
      status_message: None,
    }))
  }

  async fn reply(&self, reply_token: String, messages: Vec<Message>) -> Result<(), FakeError> {
    self.record(Call::Reply { token: reply_token, messages });
    self.check("reply")
  }

  async fn multicast(&self, to: Vec<String>, _messages: Vec<Message>) -> Result<(), FakeError> {
    let index = self.count(|c| matches!(c, Call::Multicast { .. }));
    self.record(Call::Multicast { to });
    if self.fail_multicast_at == Some(index) {
      return Err(FakeError("multicast"));
    }
    self.check("multicast")
  }

  async fn list_tags(&self) -> Result<Vec<Tag>, FakeError> {
    self.record(Call::ListTags);
    if let Some(delay) = self.list_delay {
      tokio::time::sleep(delay).await;
    }
    self.check("list_tags")?;
    Ok(self.tags())
  }

  async fn create_tag(&self, name: String) -> Result<String, FakeError> {
    self.record(Call::CreateTag(name.clone()));
    self.check("create_tag")?;
    let mut tags = self.tags.lock().unwrap();
    let tag_id   = format!("tag-{}", tags.len() + 1);
    tags.push(Tag { tag_id: tag_id.clone(), name });
    Ok(tag_id)
  }

  async fn apply_tag(&self, user_id: String, tag_id: String) -> Result<(), FakeError> {
    self.record(Call::ApplyTag { user_id, tag_id });
    self.check("apply_tag")
  }
}

#[derive(Debug, thiserror::Error)]
#[error("store is down")]
pub struct StoreDown;

/// A store whose every operation fails.
pub struct BrokenStore;

impl ProfileStore for BrokenStore {
  type Error = StoreDown;

  async fn upsert_profile(&self, _: Profile) -> Result<User, StoreDown> { Err(StoreDown) }
  async fn set_faculty(&self, _: String, _: String) -> Result<bool, StoreDown> { Err(StoreDown) }
  async fn touch(&self, _: String) -> Result<bool, StoreDown> { Err(StoreDown) }
  async fn get_user(&self, _: String) -> Result<Option<User>, StoreDown> { Err(StoreDown) }
  async fn list_users(&self) -> Result<Vec<User>, StoreDown> { Err(StoreDown) }
  async fn recipients(&self, _: Option<String>) -> Result<Vec<String>, StoreDown> { Err(StoreDown) }
}

/// A bot over a fresh in-memory SQLite store and the default catalog.
pub async fn sqlite_bot(messenger: RecordingMessenger) -> Bot<SqliteStore, RecordingMessenger> {
  let store = SqliteStore::open_in_memory().await.expect("in-memory store");
  Bot::new(
    std::sync::Arc::new(store),
    std::sync::Arc::new(messenger),
    Default::default(),
  )
}
