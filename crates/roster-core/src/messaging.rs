//! The `Messenger` trait: outbound calls to the messaging platform.

use std::future::Future;

use serde::{Deserialize, Serialize};

use crate::{message::Message, user::Profile};

/// Maximum recipients per multicast call.
pub const MULTICAST_LIMIT: usize = 500;

/// A platform-side tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
  pub tag_id: String,
  pub name:   String,
}

/// Abstraction over the messaging platform's HTTP API.
///
/// Implementations perform exactly one remote call per method and never
/// retry.
pub trait Messenger: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn get_profile(
    &self,
    user_id: String,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;

  /// Answer an event. A reply token is single-use.
  fn reply(
    &self,
    reply_token: String,
    messages: Vec<Message>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Send `messages` to at most [`MULTICAST_LIMIT`] recipients.
  fn multicast(
    &self,
    to: Vec<String>,
    messages: Vec<Message>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// The full remote tag list.
  fn list_tags(&self) -> impl Future<Output = Result<Vec<Tag>, Self::Error>> + Send + '_;

  /// Create a tag and return its id.
  fn create_tag(
    &self,
    name: String,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + '_;

  fn apply_tag(
    &self,
    user_id: String,
    tag_id: String,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;
}
