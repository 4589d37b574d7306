//! JSON REST API for Rapport.
//!
//! Exposes an axum [`Router`] backed by any [`ProfileStore`]. Quiz
//! submissions are authenticated with HTTP Basic against the stored password
//! hashes; everything else is public.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", rapport_api::api_router(store.clone()))
//! ```

pub mod auth;
pub mod error;
pub mod profiles;
pub mod quiz;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post, put},
};
use rapport_core::store::ProfileStore;
use tower_http::trace::TraceLayer;

pub use error::ApiError;

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: ProfileStore + 'static,
{
  Router::new()
    .route("/quiz", get(quiz::catalog))
    .route("/profiles", post(profiles::create::<S>))
    .route("/profiles/{username}", get(profiles::summary::<S>))
    .route("/profiles/{username}/result", put(quiz::submit::<S>))
    .route("/categories/{category}/profiles", get(profiles::by_category::<S>))
    .with_state(store)
}

/// The whole application: the API under `/api`, with request tracing.
pub fn app<S>(store: Arc<S>) -> Router
where
  S: ProfileStore + 'static,
{
  Router::new()
    .nest("/api", api_router(store))
    .layer(TraceLayer::new_for_http())
}
