//! Handlers for the quiz.
//!
//! `GET /quiz` lists the questions. `PUT /profiles/{username}/result` takes
//! the four answers at once, scores them, stores the category and returns
//! the profiles that share it.

use std::sync::Arc;

use axum::{
  Json,
  extract::{Path, State, rejection::{JsonRejection, PathRejection}},
};
use rapport_core::{
  matching::{MatchCard, similar_profiles},
  profile::local_today,
  quiz::{Category, QUESTION_COUNT, QUESTIONS, Question, QuizSession},
  store::ProfileStore,
};
use serde::{Deserialize, Serialize};

use crate::{auth::Credentials, error::ApiError};

/// `GET /quiz`
pub async fn catalog() -> Json<&'static [Question]> { Json(&QUESTIONS[..]) }

#[derive(Debug, Deserialize)]
pub struct SubmitBody {
  /// One slot per question: 1–4 for the chosen option, 0 for none.
  pub answers: [u8; QUESTION_COUNT],
}

#[derive(Debug, Serialize)]
pub struct QuizOutcome {
  pub category:    Category,
  pub description: &'static str,
  pub matches:     Vec<MatchCard>,
}

/// `PUT /profiles/{username}/result` — requires Basic auth as `username`.
pub async fn submit<S>(
  State(store): State<Arc<S>>,
  username: Result<Path<String>, PathRejection>,
  credentials: Credentials,
  body: Result<Json<SubmitBody>, JsonRejection>,
) -> Result<Json<QuizOutcome>, ApiError>
where
  S: ProfileStore,
{
  let Path(username) = username?;
  credentials.authorize(store.as_ref(), &username).await?;
  let Json(body) = body?;

  let mut session = QuizSession::from_answers(body.answers)?;
  let category = session.compute_result()?;

  store
    .set_result(&username, category)
    .await
    .map_err(ApiError::from_store)?;

  let today = local_today();
  let matches = similar_profiles(store.as_ref(), &username, category, today)
    .await
    .map_err(ApiError::from_store)?;

  tracing::info!(%username, %category, matches = matches.len(), "quiz submitted");

  Ok(Json(QuizOutcome {
    category,
    description: category.description(),
    matches,
  }))
}
