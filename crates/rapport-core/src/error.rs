//! Error types for `rapport-core`.

use thiserror::Error;

/// A field-level rejection raised by [`NewProfile::validate`].
///
/// [`NewProfile::validate`]: crate::profile::NewProfile::validate
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("required field is empty: {0}")]
  MissingField(&'static str),

  #[error("username must be at most {max} characters")]
  UsernameTooLong { max: usize },

  #[error("password must be at most {max} characters")]
  PasswordTooLong { max: usize },

  #[error("username may contain only letters and digits")]
  UsernameNotAlphanumeric,

  #[error("password may contain only letters and digits")]
  PasswordNotAlphanumeric,

  #[error("password must be at least {min} characters")]
  PasswordTooShort { min: usize },

  #[error("birth date lies in the future")]
  BirthDateInFuture,

  #[error("must be at least {min} years old (computed age: {age})")]
  Underage { age: u32, min: u32 },

  #[error("unsupported photo format: {0:?}")]
  UnsupportedPhoto(String),
}

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid profile: {0}")]
  Validation(#[from] ValidationError),

  #[error("username already taken: {0}")]
  DuplicateUsername(String),

  #[error("profile not found: {0}")]
  NotFound(String),

  #[error("question index out of range: {0}")]
  QuestionOutOfRange(usize),

  #[error("option out of range: {0}")]
  OptionOutOfRange(u8),

  #[error("quiz is already completed")]
  QuizCompleted,

  #[error("quiz has unvisited questions")]
  QuizIncomplete,

  #[error("unknown category: {0:?}")]
  UnknownCategory(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Backend errors that may carry a domain-level [`Error`].
///
/// Lets front ends generic over a [`ProfileStore`] tell caller mistakes
/// (unknown username, duplicate, invalid input) apart from infrastructure
/// failures.
///
/// [`ProfileStore`]: crate::store::ProfileStore
pub trait DomainError {
  fn domain(&self) -> Option<&Error>;
}

impl DomainError for Error {
  fn domain(&self) -> Option<&Error> { Some(self) }
}
