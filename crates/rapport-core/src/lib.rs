//! Core types and trait definitions for Rapport.
//!
//! Profiles, validation, the compatibility quiz and the [`ProfileStore`]
//! abstraction live here. This crate has no HTTP or database dependencies;
//! storage backends and front ends depend on it.
//!
//! [`ProfileStore`]: store::ProfileStore

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod error;
pub mod matching;
pub mod profile;
pub mod quiz;
pub mod store;

pub use error::{DomainError, Error, Result, ValidationError};
