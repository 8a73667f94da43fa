//! Event routing.
//!
//! Each event goes to exactly one handler. Events of one delivery run
//! concurrently with no ordering between them; a delivery is complete once
//! every event has settled.

use std::collections::HashMap;

use roster_core::{
  event::{Event, EventKind},
  message::Message,
  messaging::Messenger,
  store::ProfileStore,
};
use tokio::task::JoinSet;
use tracing::Instrument as _;

use crate::{Bot, Error, Result, replies};

/// What a handler did with an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
  Replied,
  /// Nothing was sent; `reason` says why.
  Ignored { reason: &'static str },
}

impl<S, M> Bot<S, M>
where
  S: ProfileStore + 'static,
  M: Messenger + 'static,
{
  /// Route one event to its handler.
  pub async fn handle_event(&self, event: &Event) -> Result<Outcome> {
    match event.kind {
      EventKind::Follow => self.on_follow(event).await,
      EventKind::Postback => self.on_postback(event).await,
      EventKind::Message => match event.message.as_ref().and_then(|m| m.as_text()) {
        Some(text) => self.on_text(event, text).await,
        None => self.on_unhandled(event).await,
      },
      EventKind::Other => self.on_unhandled(event).await,
    }
  }

  /// Handle one event and log its result. Failures never propagate beyond
  /// the log; the returned value is for callers that want to inspect it.
  pub async fn dispatch(&self, event: Event) -> Result<Outcome> {
    let span = tracing::info_span!(
      "event",
      event_kind = event.kind.as_str(),
      user_id = event.user_id(),
    );

    async {
      let result = self.handle_event(&event).await;
      match &result {
        Ok(Outcome::Replied) => tracing::debug!("replied"),
        Ok(Outcome::Ignored { reason }) => tracing::debug!(reason, "ignored"),
        Err(e) => tracing::error!(error = %e, "event handling failed"),
      }
      result
    }
    .instrument(span)
    .await
  }

  /// Dispatch every event of a delivery concurrently and wait for all of
  /// them. Results are returned in input order.
  pub async fn dispatch_all(&self, events: Vec<Event>) -> Vec<Result<Outcome>> {
    let mut set   = JoinSet::new();
    let mut slots = HashMap::new();
    let mut results: Vec<Option<Result<Outcome>>> = (0..events.len()).map(|_| None).collect();

    for (index, event) in events.into_iter().enumerate() {
      let bot    = self.clone();
      let handle = set.spawn(async move { (index, bot.dispatch(event).await) });
      slots.insert(handle.id(), index);
    }

    while let Some(joined) = set.join_next().await {
      match joined {
        Ok((index, result)) => results[index] = Some(result),
        Err(e) => {
          tracing::error!(error = %e, "event task panicked");
          if let Some(&index) = slots.get(&e.id()) {
            results[index] = Some(Err(Error::Task(e)));
          }
        }
      }
    }

    results.into_iter().flatten().collect()
  }

  /// Generic acknowledgement for events the bot does not handle.
  async fn on_unhandled(&self, event: &Event) -> Result<Outcome> {
    self.reply_to(event, vec![Message::text(replies::FALLBACK)]).await
  }

  /// Answer `event` with `messages`. Handlers call this last, after their
  /// state changes; an event without a reply token is left unanswered.
  pub(crate) async fn reply_to(&self, event: &Event, messages: Vec<Message>) -> Result<Outcome> {
    let Some(token) = event.reply_token.clone() else {
      return Ok(Outcome::Ignored { reason: "no reply token" });
    };
    self
      .messenger
      .reply(token, messages)
      .await
      .map_err(Error::messaging)?;
    Ok(Outcome::Replied)
  }
}

#[cfg(test)]
mod tests {
  use roster_core::event::WebhookPayload;

  use super::*;
  use crate::testing::{Call, RecordingMessenger, sqlite_bot};

  fn payload(json: &str) -> Vec<Event> { WebhookPayload::from_slice(json.as_bytes()).unwrap().events }

  #[tokio::test]
  async fn unknown_event_gets_fallback_reply() {
    let bot = sqlite_bot(RecordingMessenger::default()).await;
    let events = payload(
      r#"{"events":[{"type":"join","replyToken":"r1","source":{"type":"group"}}]}"#,
    );
    let outcome = bot.handle_event(&events[0]).await.unwrap();
    assert_eq!(outcome, Outcome::Replied);
    assert_eq!(bot.messenger.replies(), [vec![Message::text(replies::FALLBACK)]]);
  }

  #[tokio::test]
  async fn non_text_message_gets_fallback_reply() {
    let bot = sqlite_bot(RecordingMessenger::default()).await;
    let events = payload(
      r#"{"events":[{"type":"message","replyToken":"r1","source":{"type":"user","userId":"U1"},
          "message":{"type":"image","id":"1"}}]}"#,
    );
    bot.handle_event(&events[0]).await.unwrap();
    assert_eq!(bot.messenger.replies(), [vec![Message::text(replies::FALLBACK)]]);
  }

  #[tokio::test]
  async fn unfollow_without_token_is_ignored() {
    let bot = sqlite_bot(RecordingMessenger::default()).await;
    let events = payload(r#"{"events":[{"type":"unfollow","source":{"type":"user","userId":"U1"}}]}"#);
    let outcome = bot.handle_event(&events[0]).await.unwrap();
    assert!(matches!(outcome, Outcome::Ignored { .. }));
    assert!(bot.messenger.calls().is_empty());
  }

  #[tokio::test]
  async fn delivery_settles_every_event_despite_failures() {
    let bot = sqlite_bot(RecordingMessenger::default().failing("get_profile")).await;
    let events = payload(
      r#"{"events":[
        {"type":"follow","replyToken":"r1","source":{"type":"user","userId":"U1"}},
        {"type":"message","replyToken":"r2","source":{"type":"user","userId":"U2"},
         "message":{"type":"text","id":"1","text":"hi"}},
        {"type":"postback","replyToken":"r3","source":{"type":"user","userId":"U3"},
         "postback":{"data":"more_faculties"}}
      ]}"#,
    );

    let results = bot.dispatch_all(events).await;
    assert_eq!(results.len(), 3);
    assert!(matches!(results[0], Err(Error::Messaging(_))));
    assert!(matches!(results[1], Ok(Outcome::Replied)));
    assert!(matches!(results[2], Ok(Outcome::Replied)));

    // the failed follow produced no reply
    let tokens: Vec<_> = bot
      .messenger
      .calls()
      .into_iter()
      .filter_map(|c| match c {
        Call::Reply { token, .. } => Some(token),
        _ => None,
      })
      .collect();
    assert!(!tokens.contains(&"r1".to_string()));
    assert_eq!(tokens.len(), 2);
  }
}
