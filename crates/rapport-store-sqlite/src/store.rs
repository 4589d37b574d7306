//! [`SqliteStore`] — the SQLite implementation of [`ProfileStore`].

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::OptionalExtension as _;
use tracing::{debug, info, warn};

use rapport_core::{
  profile::{local_today, NewProfile, Profile, ProfileSummary},
  quiz::Category,
  store::ProfileStore,
};

use crate::{
  encode::{encode_category, encode_date, encode_dt, RawProfile, RawSummary, PROFILE_COLUMNS},
  password::{hash_password, verify_password as password_matches},
  schema::SCHEMA,
  Result,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Rapport profile store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    debug!(path = %path.as_ref().display(), "opening profile store");
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
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

  async fn password_hash(&self, username: &str) -> Result<Option<String>> {
    let username = username.to_owned();
    let hash = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT password_hash FROM profiles WHERE username = ?1",
            rusqlite::params![username],
            |row| row.get(0),
          )
          .optional()?)
      })
      .await?;
    Ok(hash)
  }

  /// The raw `password_hash` column, for asserting on the stored form.
  #[cfg(test)]
  pub(crate) async fn stored_password_hash(&self, username: &str) -> Result<Option<String>> {
    self.password_hash(username).await
  }

  /// Number of rows in `profiles`.
  #[cfg(test)]
  pub(crate) async fn count(&self) -> Result<i64> {
    let n = self
      .conn
      .call(|conn| Ok(conn.query_row("SELECT COUNT(*) FROM profiles", [], |row| row.get(0))?))
      .await?;
    Ok(n)
  }
}

/// Expand a leading `~/` in a configured store path to the user's home
/// directory. Other paths are returned unchanged.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

/// Whether `e` is a `UNIQUE` constraint failure. The only unique column
/// besides the rowid is `username`.
pub(crate) fn is_unique_violation(e: &rusqlite::Error) -> bool {
  matches!(
    e,
    rusqlite::Error::SqliteFailure(f, _)
      if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  )
}

// ─── ProfileStore impl ───────────────────────────────────────────────────────

impl ProfileStore for SqliteStore {
  type Error = crate::Error;

  async fn create_profile(&self, input: NewProfile) -> Result<Profile> {
    input.validate(local_today())?;

    let password_hash = hash_password(&input.password)?;
    let profile = Profile {
      username:    input.username,
      first_name:  input.first_name,
      last_name:   input.last_name,
      birth_date:  input.birth_date,
      location:    input.location,
      description: input.description,
      photo_path:  input.photo_path,
      result:      None,
      created_at:  Utc::now(),
    };

    let username_str    = profile.username.clone();
    let first_name      = profile.first_name.clone();
    let last_name       = profile.last_name.clone();
    let birth_date_str  = encode_date(profile.birth_date);
    let location        = profile.location.clone();
    let description     = profile.description.clone();
    let photo_path      = profile.photo_path.clone();
    let created_at_str  = encode_dt(profile.created_at);

    let inserted = self
      .conn
      .call(move |conn| {
        let outcome = conn.execute(
          "INSERT INTO profiles (
             username, password_hash, first_name, last_name, birth_date,
             location, description, photo_path, created_at
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
          rusqlite::params![
            username_str,
            password_hash,
            first_name,
            last_name,
            birth_date_str,
            location,
            description,
            photo_path,
            created_at_str,
          ],
        );
        match outcome {
          Ok(_) => Ok(true),
          Err(e) if is_unique_violation(&e) => Ok(false),
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if !inserted {
      warn!(username = %profile.username, "registration rejected: username taken");
      return Err(rapport_core::Error::DuplicateUsername(profile.username).into());
    }

    info!(username = %profile.username, "profile created");
    Ok(profile)
  }

  async fn set_result(&self, username: &str, category: Category) -> Result<()> {
    let username_str = username.to_owned();
    let category_str = encode_category(category);

    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE profiles SET result = ?1 WHERE username = ?2",
          rusqlite::params![category_str, username_str],
        )?)
      })
      .await?;

    if changed == 0 {
      return Err(rapport_core::Error::NotFound(username.to_owned()).into());
    }

    info!(username, %category, "quiz result stored");
    Ok(())
  }

  async fn find_usernames_by_result(&self, category: Category) -> Result<Vec<String>> {
    let category_str = encode_category(category);

    let usernames = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT username FROM profiles WHERE result = ?1 ORDER BY profile_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![category_str], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;

    Ok(usernames)
  }

  async fn get_profile_summary(&self, username: &str) -> Result<ProfileSummary> {
    let username_str = username.to_owned();

    let raw: Option<RawSummary> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT first_name, last_name, birth_date, description
             FROM profiles WHERE username = ?1",
            rusqlite::params![username_str],
            |row| {
              Ok(RawSummary {
                first_name:  row.get(0)?,
                last_name:   row.get(1)?,
                birth_date:  row.get(2)?,
                description: row.get(3)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    raw
      .ok_or_else(|| rapport_core::Error::NotFound(username.to_owned()))?
      .into_summary()
  }

  async fn get_profile(&self, username: &str) -> Result<Option<Profile>> {
    let username_str = username.to_owned();

    let raw: Option<RawProfile> = self
      .conn
      .call(move |conn| {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE username = ?1");
        Ok(conn
          .query_row(&sql, rusqlite::params![username_str], RawProfile::from_row)
          .optional()?)
      })
      .await?;

    raw.map(RawProfile::into_profile).transpose()
  }

  async fn verify_password(&self, username: &str, password: &str) -> Result<bool> {
    let Some(stored) = self.password_hash(username).await? else {
      debug!(username, "credential check for unknown user");
      return Ok(false);
    };
    Ok(password_matches(password, &stored))
  }
}
