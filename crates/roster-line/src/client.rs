//! Async HTTP client for the LINE Messaging API.

use std::{sync::Arc, time::Duration};

use reqwest::{Client, RequestBuilder, Response};
use roster_core::{
  message::Message,
  messaging::{Messenger, Tag},
  user::Profile,
};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Default API origin.
pub const DEFAULT_API_BASE: &str = "https://api.line.me";

/// Connection settings for the messaging platform.
#[derive(Debug, Clone)]
pub struct LineConfig {
  pub api_base:             String,
  pub channel_access_token: String,
}

/// HTTP client for the LINE Messaging API.
///
/// Cheap to clone; the inner [`reqwest::Client`] is `Arc`-based.
#[derive(Clone)]
pub struct LineClient {
  client: Client,
  config: Arc<LineConfig>,
}

// ─── Wire bodies ─────────────────────────────────────────────────────────────

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ReplyBody {
  reply_token: String,
  messages:    Vec<Message>,
}

#[derive(Serialize)]
struct MulticastBody {
  to:       Vec<String>,
  messages: Vec<Message>,
}

#[derive(Deserialize)]
struct TagList {
  #[serde(default)]
  tags: Vec<Tag>,
}

#[derive(Serialize)]
struct CreateTagBody {
  name: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreatedTag {
  tag_id: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplyTagBody {
  tag_id: String,
}

// ─── Client ──────────────────────────────────────────────────────────────────

impl LineClient {
  pub fn new(config: LineConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(Duration::from_secs(30))
      .build()?;
    Ok(Self { client, config: Arc::new(config) })
  }

  fn url(&self, path: &str) -> String {
    format!("{}/v2/bot{}", self.config.api_base.trim_end_matches('/'), path)
  }

  fn auth(&self, req: RequestBuilder) -> RequestBuilder {
    req.bearer_auth(&self.config.channel_access_token)
  }

  /// Send `req` and turn any non-2xx status into [`Error::Api`].
  async fn send(&self, operation: &'static str, req: RequestBuilder) -> Result<Response> {
    let resp   = self.auth(req).send().await?;
    let status = resp.status();
    if status.is_success() {
      return Ok(resp);
    }
    let body = resp.text().await.unwrap_or_default();
    tracing::warn!(operation, %status, body = %body, "platform call rejected");
    Err(Error::Api { operation, status, body })
  }
}

impl Messenger for LineClient {
  type Error = Error;

  /// `GET /v2/bot/profile/{userId}`
  async fn get_profile(&self, user_id: String) -> Result<Profile> {
    let req = self.client.get(self.url(&format!("/profile/{user_id}")));
    Ok(self.send("get profile", req).await?.json().await?)
  }

  /// `POST /v2/bot/message/reply`
  async fn reply(&self, reply_token: String, messages: Vec<Message>) -> Result<()> {
    let req = self
      .client
      .post(self.url("/message/reply"))
      .json(&ReplyBody { reply_token, messages });
    self.send("reply", req).await?;
    Ok(())
  }

  /// `POST /v2/bot/message/multicast`
  async fn multicast(&self, to: Vec<String>, messages: Vec<Message>) -> Result<()> {
    let req = self
      .client
      .post(self.url("/message/multicast"))
      .json(&MulticastBody { to, messages });
    self.send("multicast", req).await?;
    Ok(())
  }

  /// `GET /v2/bot/tag`
  async fn list_tags(&self) -> Result<Vec<Tag>> {
    let req = self.client.get(self.url("/tag"));
    let list: TagList = self.send("list tags", req).await?.json().await?;
    Ok(list.tags)
  }

  /// `POST /v2/bot/tag`
  async fn create_tag(&self, name: String) -> Result<String> {
    let req = self.client.post(self.url("/tag")).json(&CreateTagBody { name });
    let created: CreatedTag = self.send("create tag", req).await?.json().await?;
    Ok(created.tag_id)
  }

  /// `POST /v2/bot/user/{userId}/tag`
  async fn apply_tag(&self, user_id: String, tag_id: String) -> Result<()> {
    let req = self
      .client
      .post(self.url(&format!("/user/{user_id}/tag")))
      .json(&ApplyTagBody { tag_id });
    self.send("apply tag", req).await?;
    Ok(())
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
