//! Event routing, segmentation and broadcast workflows for Roster.
//!
//! [`Bot`] is generic over a [`ProfileStore`] and a [`Messenger`] so the same
//! workflow runs against SQLite + LINE in production and against in-memory
//! fakes in tests.

pub mod broadcast;
pub mod dispatch;
pub mod error;
pub mod replies;
pub mod selection;
pub mod tags;

mod follow;
mod postback;
mod text;

#[cfg(test)]
mod testing;

pub use broadcast::{BroadcastReport, BroadcastRequest};
pub use dispatch::Outcome;
pub use error::{Error, Result};
pub use selection::ButtonLayout;

use std::sync::Arc;

use roster_core::{messaging::Messenger, segment::SegmentCatalog, store::ProfileStore};

use tags::TagDirectory;

/// The bot: shared handles to the store, the platform and the catalog.
///
/// Cloning is cheap; the shared fields are reference-counted.
pub struct Bot<S, M> {
  store:     Arc<S>,
  messenger: Arc<M>,
  catalog:   Arc<SegmentCatalog>,
  layout:    ButtonLayout,
  tags:      TagDirectory,
}

impl<S, M> Clone for Bot<S, M> {
  fn clone(&self) -> Self {
    Self {
      store:     Arc::clone(&self.store),
      messenger: Arc::clone(&self.messenger),
      catalog:   Arc::clone(&self.catalog),
      layout:    self.layout,
      tags:      self.tags.clone(),
    }
  }
}

impl<S, M> Bot<S, M>
where
  S: ProfileStore,
  M: Messenger,
{
  pub fn new(store: Arc<S>, messenger: Arc<M>, catalog: SegmentCatalog) -> Self {
    Self {
      store,
      messenger,
      catalog: Arc::new(catalog),
      layout: ButtonLayout::default(),
      tags: TagDirectory::default(),
    }
  }

  /// Use `layout` for segment-selection templates.
  pub fn with_layout(mut self, layout: ButtonLayout) -> Self {
    self.layout = layout;
    self
  }

  pub fn store(&self) -> &S { &self.store }

  pub fn catalog(&self) -> &SegmentCatalog { &self.catalog }

  pub fn layout(&self) -> ButtonLayout { self.layout }
}
