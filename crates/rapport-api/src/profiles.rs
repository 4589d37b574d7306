//! Handlers for `/profiles` and `/categories` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `POST` | `/profiles` | Body: [`NewProfile`]; 409 on a taken username |
//! | `GET`  | `/profiles/{username}` | Public summary; 404 if not found |
//! | `GET`  | `/categories/{category}/profiles` | Usernames with that result |

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::{JsonRejection, PathRejection}},
  http::StatusCode,
  response::IntoResponse,
};
use rapport_core::{
  profile::{NewProfile, ProfileSummary},
  quiz::Category,
  store::ProfileStore,
};

use crate::error::ApiError;

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /profiles`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  body: Result<Json<NewProfile>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
  S: ProfileStore,
{
  let Json(body) = body?;
  let profile = store
    .create_profile(body)
    .await
    .map_err(ApiError::from_store)?;
  Ok((StatusCode::CREATED, Json(profile)))
}

// ─── Summary ──────────────────────────────────────────────────────────────────

/// `GET /profiles/{username}`
pub async fn summary<S>(
  State(store): State<Arc<S>>,
  username: Result<Path<String>, PathRejection>,
) -> Result<Json<ProfileSummary>, ApiError>
where
  S: ProfileStore,
{
  let Path(username) = username?;
  let summary = store
    .get_profile_summary(&username)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(summary))
}

// ─── By category ──────────────────────────────────────────────────────────────

/// `GET /categories/{category}/profiles`
pub async fn by_category<S>(
  State(store): State<Arc<S>>,
  category: Result<Path<String>, PathRejection>,
) -> Result<Json<Vec<String>>, ApiError>
where
  S: ProfileStore,
{
  let Path(category) = category?;
  let category = Category::parse(&category)?;
  let usernames = store
    .find_usernames_by_result(category)
    .await
    .map_err(ApiError::from_store)?;
  Ok(Json(usernames))
}
