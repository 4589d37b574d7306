//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  extract::rejection::{JsonRejection, PathRejection},
  http::{HeaderValue, StatusCode, header},
  response::{IntoResponse, Response},
};
use rapport_core::DomainError;
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("unauthorized")]
  Unauthorized,

  #[error("forbidden: {0}")]
  Forbidden(String),

  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("conflict: {0}")]
  Conflict(String),

  #[error("invalid input: {0}")]
  Unprocessable(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl ApiError {
  /// Map a store error onto a status: domain failures become 4xx, anything
  /// else is a 500.
  pub fn from_store<E>(e: E) -> Self
  where
    E: std::error::Error + DomainError + Send + Sync + 'static,
  {
    use rapport_core::Error as Core;

    let mapped = match e.domain() {
      Some(Core::NotFound(username)) => {
        Some(Self::NotFound(format!("profile {username} not found")))
      }
      Some(Core::DuplicateUsername(username)) => {
        Some(Self::Conflict(format!("username {username} is already taken")))
      }
      Some(Core::Validation(v)) => Some(Self::Unprocessable(v.to_string())),
      Some(other) => Some(Self::BadRequest(other.to_string())),
      None => None,
    };
    mapped.unwrap_or_else(|| Self::Store(Box::new(e)))
  }
}

impl From<rapport_core::Error> for ApiError {
  fn from(e: rapport_core::Error) -> Self { Self::from_store(e) }
}

// Extractor rejections go through `ApiError` so every error body is JSON.

impl From<JsonRejection> for ApiError {
  fn from(e: JsonRejection) -> Self { Self::Unprocessable(e.body_text()) }
}

impl From<PathRejection> for ApiError {
  fn from(e: PathRejection) -> Self { Self::BadRequest(e.body_text()) }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let status = match &self {
      ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
      ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
      ApiError::NotFound(_) => StatusCode::NOT_FOUND,
      ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
      ApiError::Conflict(_) => StatusCode::CONFLICT,
      ApiError::Unprocessable(_) => StatusCode::UNPROCESSABLE_ENTITY,
      ApiError::Store(e) => {
        tracing::error!(error = %e, "store failure");
        StatusCode::INTERNAL_SERVER_ERROR
      }
    };
    let mut res = (status, Json(json!({ "error": self.to_string() }))).into_response();
    if status == StatusCode::UNAUTHORIZED {
      res.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static("Basic realm=\"rapport\""),
      );
    }
    res
  }
}
