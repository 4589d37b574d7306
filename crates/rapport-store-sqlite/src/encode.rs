//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`
//! and categories as their lowercase slug.

use chrono::{DateTime, NaiveDate, Utc};
use rapport_core::{
  profile::{Profile, ProfileSummary},
  quiz::Category,
};

use crate::{Error, Result};

// ─── DateTime<Utc> ───────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Category ────────────────────────────────────────────────────────────────

pub fn encode_category(c: Category) -> &'static str { c.into() }

pub fn decode_category(s: &str) -> Result<Category> { Ok(Category::parse(s)?) }

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawProfile`].
pub const PROFILE_COLUMNS: &str = "username, first_name, last_name, birth_date, location, \
                                   description, photo_path, result, created_at";

/// Raw strings read directly from a `profiles` row.
pub struct RawProfile {
  pub username:    String,
  pub first_name:  String,
  pub last_name:   String,
  pub birth_date:  String,
  pub location:    String,
  pub description: String,
  pub photo_path:  String,
  pub result:      Option<String>,
  pub created_at:  String,
}

impl RawProfile {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      username:    row.get(0)?,
      first_name:  row.get(1)?,
      last_name:   row.get(2)?,
      birth_date:  row.get(3)?,
      location:    row.get(4)?,
      description: row.get(5)?,
      photo_path:  row.get(6)?,
      result:      row.get(7)?,
      created_at:  row.get(8)?,
    })
  }

  pub fn into_profile(self) -> Result<Profile> {
    Ok(Profile {
      username:    self.username,
      first_name:  self.first_name,
      last_name:   self.last_name,
      birth_date:  decode_date(&self.birth_date)?,
      location:    self.location,
      description: self.description,
      photo_path:  self.photo_path,
      result:      self.result.as_deref().map(decode_category).transpose()?,
      created_at:  decode_dt(&self.created_at)?,
    })
  }
}

/// Raw strings for the public card of a profile.
pub struct RawSummary {
  pub first_name:  String,
  pub last_name:   String,
  pub birth_date:  String,
  pub description: String,
}

impl RawSummary {
  pub fn into_summary(self) -> Result<ProfileSummary> {
    Ok(ProfileSummary {
      first_name:  self.first_name,
      last_name:   self.last_name,
      birth_date:  decode_date(&self.birth_date)?,
      description: self.description,
    })
  }
}
