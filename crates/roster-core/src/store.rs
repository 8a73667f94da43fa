//! The `ProfileStore` trait.
//!
//! Implemented by storage backends (e.g. `roster-store-sqlite`). The workflow
//! and HTTP layers depend on this abstraction, not on a concrete backend.

use std::future::Future;

use crate::user::{Profile, User};

/// Abstraction over the single-table user store.
///
/// Timestamps are assigned by the store. Rows are never deleted.
///
/// All methods return `Send` futures so the trait can be used from tasks
/// spawned on a multi-threaded runtime.
pub trait ProfileStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Insert the user if unseen, otherwise refresh display name, picture and
  /// `last_interaction`. `faculty` and `registered_at` are never touched on
  /// update. Returns the row as stored afterwards.
  fn upsert_profile(
    &self,
    profile: Profile,
  ) -> impl Future<Output = Result<User, Self::Error>> + Send + '_;

  /// Set the user's segment and bump `last_interaction`.
  ///
  /// Returns `false` if no row exists for `line_user_id`.
  fn set_faculty(
    &self,
    line_user_id: String,
    faculty: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Bump `last_interaction`. Returns `false` if no row exists.
  fn touch(
    &self,
    line_user_id: String,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  /// Look up one user. Returns `None` if not found.
  fn get_user(
    &self,
    line_user_id: String,
  ) -> impl Future<Output = Result<Option<User>, Self::Error>> + Send + '_;

  /// All users, most recently registered first.
  fn list_users(&self) -> impl Future<Output = Result<Vec<User>, Self::Error>> + Send + '_;

  /// Platform ids of users whose faculty equals `faculty` exactly, or of all
  /// users when `faculty` is `None`.
  fn recipients(
    &self,
    faculty: Option<String>,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}
