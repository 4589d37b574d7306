//! SQLite backend for the Rapport profile store.
//!
//! Wraps [`tokio_rusqlite`] so all database access runs on a dedicated thread
//! without blocking the async runtime. Passwords are hashed with argon2.

mod encode;
mod password;
mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::{expand_tilde, SqliteStore};

#[cfg(test)]
mod tests;
