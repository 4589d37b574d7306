//! The `ProfileStore` trait.
//!
//! Implemented by storage backends (e.g. `rapport-store-sqlite`). Front ends
//! (`rapport-api`, `rapport-cli`) depend on this abstraction, not on any
//! concrete backend.

use std::future::Future;

use crate::{
  error::DomainError,
  profile::{NewProfile, Profile, ProfileSummary},
  quiz::Category,
};

/// Abstraction over a Rapport profile store backend.
///
/// Every operation either fully succeeds or has no effect. Domain failures
/// (`DuplicateUsername`, `NotFound`, `Validation`) are reachable through
/// [`DomainError::domain`] on the backend error.
pub trait ProfileStore: Send + Sync {
  type Error: std::error::Error + DomainError + Send + Sync + 'static;

  /// Validate `input` against today's date, hash its password and persist it.
  ///
  /// This is the only way a profile comes into existence. Fails with
  /// `DuplicateUsername` if the username is taken, leaving the existing
  /// profile untouched.
  fn create_profile(
    &self,
    input: NewProfile,
  ) -> impl Future<Output = Result<Profile, Self::Error>> + Send + '_;

  /// Overwrite the quiz result of `username`. Fails with `NotFound` for an
  /// unknown username.
  fn set_result<'a>(
    &'a self,
    username: &'a str,
    category: Category,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Usernames whose result is `category`, in storage order.
  fn find_usernames_by_result(
    &self,
    category: Category,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  /// The public card of `username`. Fails with `NotFound` for an unknown
  /// username.
  fn get_profile_summary<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<ProfileSummary, Self::Error>> + Send + 'a;

  /// Retrieve a full profile. Returns `None` if not found.
  fn get_profile<'a>(
    &'a self,
    username: &'a str,
  ) -> impl Future<Output = Result<Option<Profile>, Self::Error>> + Send + 'a;

  /// Check `password` against the stored hash. `false` for unknown users.
  fn verify_password<'a>(
    &'a self,
    username: &'a str,
    password: &'a str,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;
}
