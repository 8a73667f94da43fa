//! `postback`: a button from a selection template was pressed.

use roster_core::{event::Event, message::Message, messaging::Messenger, store::ProfileStore};

use crate::{
  Bot, Error, Outcome, Result, replies,
  selection::{self, Selection},
};

impl<S, M> Bot<S, M>
where
  S: ProfileStore + 'static,
  M: Messenger + 'static,
{
  pub(crate) async fn on_postback(&self, event: &Event) -> Result<Outcome> {
    let Some(postback) = event.postback.as_ref() else {
      return Ok(Outcome::Ignored { reason: "postback without data" });
    };

    match Selection::parse(&postback.data) {
      Selection::Segment(id) => self.select_segment(event, id).await,
      Selection::More(offset) => match selection::more_page(&self.catalog, self.layout, offset) {
        Some(page) => self.reply_to(event, vec![page]).await,
        None => Ok(Outcome::Ignored { reason: "no segments on requested page" }),
      },
      Selection::Malformed => {
        tracing::warn!(data = %postback.data, "malformed selection payload");
        Ok(Outcome::Ignored { reason: "malformed selection payload" })
      }
      Selection::Unrecognised => Ok(Outcome::Ignored { reason: "unrecognised postback" }),
    }
  }

  /// Tag the user with the chosen segment, record it, and confirm.
  ///
  /// The stored segment is only updated once the remote tag is applied, so a
  /// tag failure leaves the row untouched and sends no confirmation. Both
  /// happen whether or not the event can be answered.
  async fn select_segment(&self, event: &Event, id: u32) -> Result<Outcome> {
    let Some(segment) = self.catalog.by_id(id) else {
      tracing::warn!(segment_id = id, "unknown segment id");
      return Ok(Outcome::Ignored { reason: "unknown segment id" });
    };
    let user_id = event.user_id().ok_or(Error::MissingUserId)?.to_owned();

    let tag_id = self
      .tags
      .resolve_or_create(self.messenger.as_ref(), &segment.name)
      .await?;

    self
      .messenger
      .apply_tag(user_id.clone(), tag_id.clone())
      .await
      .map_err(Error::messaging)?;
    tracing::info!(user_id = %user_id, segment = %segment.name, tag_id = %tag_id, "tag applied");

    let updated = self
      .store
      .set_faculty(user_id.clone(), segment.name.clone())
      .await
      .map_err(Error::store)?;
    if !updated {
      tracing::warn!(user_id = %user_id, "segment chosen by a user with no stored row");
    }

    self
      .reply_to(event, vec![Message::text(replies::segment_confirmed(&segment.name))])
      .await
  }
}
