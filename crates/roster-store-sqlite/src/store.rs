//! [`SqliteStore`], the SQLite implementation of [`ProfileStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use roster_core::{
  store::ProfileStore,
  user::{Profile, User},
};

use crate::{
  encode::{encode_dt, RawUser, USER_COLUMNS},
  schema::SCHEMA,
  Error, Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster profile store backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted. Each query
/// borrows the connection for the duration of one closure on the connection
/// thread, so it is released on every exit path including errors.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    tracing::debug!(path = %path.display(), "opening sqlite store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

// ─── ProfileStore impl ───────────────────────────────────────────────────────

impl ProfileStore for SqliteStore {
  type Error = Error;

  async fn upsert_profile(&self, profile: Profile) -> Result<User> {
    let now_str = encode_dt(Utc::now());
    let user_id = profile.user_id.clone();

    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO users (
             line_user_id, display_name, picture_url, registered_at, last_interaction
           ) VALUES (?1, ?2, ?3, ?4, ?4)
           ON CONFLICT(line_user_id) DO UPDATE SET
             display_name     = excluded.display_name,
             picture_url      = excluded.picture_url,
             last_interaction = excluded.last_interaction",
          rusqlite::params![
            profile.user_id,
            profile.display_name,
            profile.picture_url,
            now_str,
          ],
        )?;

        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE line_user_id = ?1"),
            rusqlite::params![profile.user_id],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw
      .ok_or(Error::UserVanished(user_id))?
      .into_user()
  }

  async fn set_faculty(&self, line_user_id: String, faculty: String) -> Result<bool> {
    let now_str = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET faculty = ?1, last_interaction = ?2 WHERE line_user_id = ?3",
          rusqlite::params![faculty, now_str, line_user_id],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn touch(&self, line_user_id: String) -> Result<bool> {
    let now_str = encode_dt(Utc::now());

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE users SET last_interaction = ?1 WHERE line_user_id = ?2",
          rusqlite::params![now_str, line_user_id],
        )?)
      })
      .await?;

    Ok(changed > 0)
  }

  async fn get_user(&self, line_user_id: String) -> Result<Option<User>> {
    let raw: Option<RawUser> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {USER_COLUMNS} FROM users WHERE line_user_id = ?1"),
            rusqlite::params![line_user_id],
            RawUser::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawUser::into_user).transpose()
  }

  async fn list_users(&self) -> Result<Vec<User>> {
    let raws: Vec<RawUser> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {USER_COLUMNS} FROM users ORDER BY registered_at DESC, id DESC"
        ))?;
        let rows = stmt
          .query_map([], RawUser::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawUser::into_user).collect()
  }

  async fn recipients(&self, faculty: Option<String>) -> Result<Vec<String>> {
    let ids: Vec<String> = self
      .conn
      .call(move |conn| {
        let rows = if let Some(f) = faculty {
          let mut stmt =
            conn.prepare("SELECT line_user_id FROM users WHERE faculty = ?1 ORDER BY id")?;
          stmt
            .query_map(rusqlite::params![f], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?
        } else {
          let mut stmt = conn.prepare("SELECT line_user_id FROM users ORDER BY id")?;
          stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?
        };
        Ok(rows)
      })
      .await?;

    Ok(ids)
  }
}
