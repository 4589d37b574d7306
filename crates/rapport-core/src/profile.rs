//! Profiles — the registered users of Rapport.
//!
//! A [`NewProfile`] is the registration input (it carries the plaintext
//! password and is never stored as-is). A [`Profile`] is the persisted read
//! model; it never exposes the password hash.

use std::{fmt, path::Path};

use chrono::{DateTime, Datelike, Local, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{error::ValidationError, quiz::Category};

pub const USERNAME_MAX_LEN: usize = 20;
pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 20;
pub const MIN_AGE: u32 = 18;

/// File extensions accepted for `photo_path`.
pub const PHOTO_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "bmp", "gif"];

// ─── Read models ─────────────────────────────────────────────────────────────

/// A registered user as stored, minus the password hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
  pub username:    String,
  pub first_name:  String,
  pub last_name:   String,
  pub birth_date:  NaiveDate,
  pub location:    String,
  pub description: String,
  pub photo_path:  String,
  /// Set once the user completes the quiz; overwritten by later attempts.
  pub result:      Option<Category>,
  pub created_at:  DateTime<Utc>,
}

/// The public card of a profile, as shown to other users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSummary {
  pub first_name:  String,
  pub last_name:   String,
  pub birth_date:  NaiveDate,
  pub description: String,
}

// ─── Registration input ──────────────────────────────────────────────────────

/// Input to [`ProfileStore::create_profile`].
///
/// [`ProfileStore::create_profile`]: crate::store::ProfileStore::create_profile
#[derive(Clone, Serialize, Deserialize)]
pub struct NewProfile {
  pub username:    String,
  pub password:    String,
  pub first_name:  String,
  pub last_name:   String,
  pub birth_date:  NaiveDate,
  pub location:    String,
  #[serde(default)]
  pub description: String,
  #[serde(default)]
  pub photo_path:  String,
}

impl fmt::Debug for NewProfile {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("NewProfile")
      .field("username", &self.username)
      .field("password", &"<redacted>")
      .field("first_name", &self.first_name)
      .field("last_name", &self.last_name)
      .field("birth_date", &self.birth_date)
      .field("location", &self.location)
      .field("description", &self.description)
      .field("photo_path", &self.photo_path)
      .finish()
  }
}

impl NewProfile {
  /// Build a profile with empty `description` and `photo_path`.
  pub fn new(
    username: impl Into<String>,
    password: impl Into<String>,
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    birth_date: NaiveDate,
    location: impl Into<String>,
  ) -> Self {
    Self {
      username: username.into(),
      password: password.into(),
      first_name: first_name.into(),
      last_name: last_name.into(),
      birth_date,
      location: location.into(),
      description: String::new(),
      photo_path: String::new(),
    }
  }

  pub fn with_description(mut self, description: impl Into<String>) -> Self {
    self.description = description.into();
    self
  }

  pub fn with_photo_path(mut self, photo_path: impl Into<String>) -> Self {
    self.photo_path = photo_path.into();
    self
  }

  /// Check every registration rule against `today`.
  ///
  /// Rules are checked in a fixed order and the first violation is returned:
  /// required fields, lengths, character classes, minimum password length,
  /// age, photo format.
  pub fn validate(&self, today: NaiveDate) -> Result<(), ValidationError> {
    let required = [
      ("username", &self.username),
      ("first_name", &self.first_name),
      ("last_name", &self.last_name),
      ("location", &self.location),
    ];
    for (name, value) in required {
      if value.trim().is_empty() {
        return Err(ValidationError::MissingField(name));
      }
    }

    if self.username.chars().count() > USERNAME_MAX_LEN {
      return Err(ValidationError::UsernameTooLong { max: USERNAME_MAX_LEN });
    }
    if self.password.chars().count() > PASSWORD_MAX_LEN {
      return Err(ValidationError::PasswordTooLong { max: PASSWORD_MAX_LEN });
    }

    if !is_alphanumeric(&self.username) {
      return Err(ValidationError::UsernameNotAlphanumeric);
    }
    if !is_alphanumeric(&self.password) {
      return Err(ValidationError::PasswordNotAlphanumeric);
    }

    if self.password.chars().count() < PASSWORD_MIN_LEN {
      return Err(ValidationError::PasswordTooShort { min: PASSWORD_MIN_LEN });
    }

    if self.birth_date > today {
      return Err(ValidationError::BirthDateInFuture);
    }
    let age = age_on(self.birth_date, today);
    if age < MIN_AGE {
      return Err(ValidationError::Underage { age, min: MIN_AGE });
    }

    if !self.photo_path.is_empty() && !is_supported_photo(&self.photo_path) {
      return Err(ValidationError::UnsupportedPhoto(self.photo_path.clone()));
    }

    Ok(())
  }
}

fn is_alphanumeric(s: &str) -> bool { s.chars().all(char::is_alphanumeric) }

/// Whether `path` has one of the [`PHOTO_EXTENSIONS`] (case-insensitive).
pub fn is_supported_photo(path: &str) -> bool {
  Path::new(path)
    .extension()
    .and_then(|ext| ext.to_str())
    .is_some_and(|ext| {
      PHOTO_EXTENSIONS
        .iter()
        .any(|allowed| ext.eq_ignore_ascii_case(allowed))
    })
}

/// Full years elapsed between `birth_date` and `today`.
///
/// Returns 0 when `birth_date` is after `today`.
pub fn age_on(birth_date: NaiveDate, today: NaiveDate) -> u32 {
  if birth_date > today {
    return 0;
  }
  let mut years = today.year() - birth_date.year();
  if (today.month(), today.day()) < (birth_date.month(), birth_date.day()) {
    years -= 1;
  }
  years.max(0) as u32
}

/// The calendar date that registration checks and displayed ages are
/// measured against: the local date of the running process.
pub fn local_today() -> NaiveDate { Local::now().date_naive() }
