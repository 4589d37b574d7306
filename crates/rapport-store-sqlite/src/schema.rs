//! SQL schema for the Rapport SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout version.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS profiles (
    profile_id    INTEGER PRIMARY KEY,
    username      TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL,      -- argon2 PHC string; never plaintext
    first_name    TEXT NOT NULL,
    last_name     TEXT NOT NULL,
    birth_date    TEXT NOT NULL,      -- YYYY-MM-DD
    location      TEXT NOT NULL,
    description   TEXT NOT NULL DEFAULT '',
    photo_path    TEXT NOT NULL DEFAULT '',
    result        TEXT,               -- category slug, NULL until the quiz is done
    created_at    TEXT NOT NULL       -- ISO 8601 UTC; store-assigned
);

CREATE INDEX IF NOT EXISTS profiles_result_idx ON profiles(result);

PRAGMA user_version = 1;
";
