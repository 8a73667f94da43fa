//! `follow`: a user added (or re-added) the bot.

use roster_core::{event::Event, message::Message, messaging::Messenger, store::ProfileStore};

use crate::{Bot, Error, Outcome, Result, replies, selection};

impl<S, M> Bot<S, M>
where
  S: ProfileStore + 'static,
  M: Messenger + 'static,
{
  /// Fetch the profile, upsert the user, then welcome them with the
  /// segment-selection prompt. A failed fetch or write aborts before the
  /// reply; the user is saved even when the event cannot be answered.
  pub(crate) async fn on_follow(&self, event: &Event) -> Result<Outcome> {
    let user_id = event.user_id().ok_or(Error::MissingUserId)?.to_owned();

    let profile = self
      .messenger
      .get_profile(user_id)
      .await
      .map_err(Error::messaging)?;

    let welcome = replies::welcome(&profile.display_name);

    let user = self
      .store
      .upsert_profile(profile)
      .await
      .map_err(Error::store)?;
    tracing::info!(user_id = %user.line_user_id, "user saved");

    self
      .reply_to(event, vec![
        Message::text(welcome),
        selection::first_page(&self.catalog, self.layout),
      ])
      .await
  }
}
