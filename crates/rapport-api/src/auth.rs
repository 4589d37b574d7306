//! HTTP Basic credentials, checked against the stored password hashes.

use axum::{
  extract::FromRequestParts,
  http::{HeaderMap, header, request::Parts},
};
use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use rapport_core::store::ProfileStore;

use crate::error::ApiError;

/// Username and password taken from an `Authorization: Basic …` header.
///
/// Extraction only parses the header; [`Credentials::authorize`] checks them.
pub struct Credentials {
  pub username: String,
  pub password: String,
}

/// Parse Basic credentials from headers.
pub fn parse_basic(headers: &HeaderMap) -> Result<Credentials, ApiError> {
  let header_val = headers
    .get(header::AUTHORIZATION)
    .and_then(|v| v.to_str().ok())
    .ok_or(ApiError::Unauthorized)?;

  let encoded = header_val
    .strip_prefix("Basic ")
    .ok_or(ApiError::Unauthorized)?;

  let decoded = B64.decode(encoded).map_err(|_| ApiError::Unauthorized)?;
  let creds   = std::str::from_utf8(&decoded).map_err(|_| ApiError::Unauthorized)?;

  let (username, password) = creds.split_once(':').ok_or(ApiError::Unauthorized)?;

  Ok(Credentials {
    username: username.to_owned(),
    password: password.to_owned(),
  })
}

impl Credentials {
  /// Verify the password, then require the caller to act as `username`.
  pub async fn authorize<S>(&self, store: &S, username: &str) -> Result<(), ApiError>
  where
    S: ProfileStore,
  {
    let valid = store
      .verify_password(&self.username, &self.password)
      .await
      .map_err(ApiError::from_store)?;
    if !valid {
      tracing::debug!(username = %self.username, "rejected credentials");
      return Err(ApiError::Unauthorized);
    }
    if self.username != username {
      return Err(ApiError::Forbidden(format!(
        "{} may not act on behalf of {username}",
        self.username
      )));
    }
    Ok(())
  }
}

impl<St> FromRequestParts<St> for Credentials
where
  St: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(parts: &mut Parts, _state: &St) -> Result<Self, Self::Rejection> {
    parse_basic(&parts.headers)
  }
}
