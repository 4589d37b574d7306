//! Error type for `rapport-store-sqlite`.

use rapport_core::DomainError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("{0}")]
  Core(#[from] rapport_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  #[error("password hashing error: {0}")]
  PasswordHash(String),
}

impl From<rapport_core::ValidationError> for Error {
  fn from(e: rapport_core::ValidationError) -> Self { Self::Core(e.into()) }
}

impl DomainError for Error {
  fn domain(&self) -> Option<&rapport_core::Error> {
    match self {
      Self::Core(e) => Some(e),
      _ => None,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
