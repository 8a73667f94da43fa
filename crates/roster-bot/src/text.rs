//! Text messages: keyword commands, otherwise a help reply.

use roster_core::{event::Event, message::Message, messaging::Messenger, store::ProfileStore};

use crate::{Bot, Error, Outcome, Result, replies, selection};

impl<S, M> Bot<S, M>
where
  S: ProfileStore + 'static,
  M: Messenger + 'static,
{
  /// Phrases match anywhere in the text. The segment-change phrase wins when
  /// both appear. The interaction is recorded even if no reply can be sent.
  pub(crate) async fn on_text(&self, event: &Event, text: &str) -> Result<Outcome> {
    if let Some(user_id) = event.user_id() {
      match self.store.touch(user_id.to_owned()).await {
        Ok(true) => {}
        Ok(false) => tracing::debug!(user_id, "message from unregistered user"),
        Err(e) => tracing::warn!(user_id, error = %e, "could not record interaction"),
      }
    }

    let messages = if text.contains(replies::CHANGE_SEGMENT_PHRASE) {
      vec![
        Message::text(replies::CHANGE_SEGMENT_PROMPT),
        selection::first_page(&self.catalog, self.layout),
      ]
    } else if text.contains(replies::SHOW_INFO_PHRASE) {
      vec![Message::text(self.info_text(event).await?)]
    } else {
      vec![Message::text(replies::help())]
    };

    self.reply_to(event, messages).await
  }

  async fn info_text(&self, event: &Event) -> Result<String> {
    let Some(user_id) = event.user_id() else {
      return Ok(replies::NO_RECORD.to_owned());
    };
    let user = self
      .store
      .get_user(user_id.to_owned())
      .await
      .map_err(Error::store)?;
    Ok(user.map_or_else(|| replies::NO_RECORD.to_owned(), |u| replies::user_info(&u)))
  }
}
