//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{Datelike as _, Months, NaiveDate, Utc};
use rapport_core::{
  matching::similar_profiles,
  profile::{local_today, NewProfile},
  quiz::{Category, QuizSession},
  store::ProfileStore,
  DomainError as _, ValidationError,
};

use crate::{expand_tilde, schema::SCHEMA, store::is_unique_violation, Error, SqliteStore};

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory()
    .await
    .expect("in-memory store")
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn new_profile(username: &str) -> NewProfile {
  NewProfile::new(username, "secret123", "Anna", "Petrova", date(1990, 3, 1), "Kazan")
}

fn is_not_found(e: &Error) -> bool {
  matches!(e.domain(), Some(rapport_core::Error::NotFound(_)))
}

// ─── Creation ────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_then_summary_round_trips() {
  let s = store().await;
  let input = new_profile("anna").with_description("Loves long walks");

  let created = s.create_profile(input).await.unwrap();
  assert_eq!(created.username, "anna");
  assert_eq!(created.result, None);

  let summary = s.get_profile_summary("anna").await.unwrap();
  assert_eq!(summary.first_name, "Anna");
  assert_eq!(summary.last_name, "Petrova");
  assert_eq!(summary.birth_date, date(1990, 3, 1));
  assert_eq!(summary.description, "Loves long walks");
}

#[tokio::test]
async fn get_profile_returns_full_read_model() {
  let s = store().await;
  s.create_profile(new_profile("anna").with_photo_path("/tmp/anna.png"))
    .await
    .unwrap();

  let profile = s.get_profile("anna").await.unwrap().expect("profile exists");
  assert_eq!(profile.location, "Kazan");
  assert_eq!(profile.photo_path, "/tmp/anna.png");
  assert_eq!(profile.description, "");
  assert_eq!(profile.result, None);

  assert!(s.get_profile("nobody").await.unwrap().is_none());
}

#[tokio::test]
async fn duplicate_username_is_rejected_and_original_kept() {
  let s = store().await;
  s.create_profile(new_profile("anna")).await.unwrap();

  let mut imposter = new_profile("anna");
  imposter.first_name = "Other".into();
  imposter.password = "different1".into();

  let err = s.create_profile(imposter).await.unwrap_err();
  assert!(matches!(
    err.domain(),
    Some(rapport_core::Error::DuplicateUsername(u)) if u == "anna"
  ));

  let summary = s.get_profile_summary("anna").await.unwrap();
  assert_eq!(summary.first_name, "Anna");
  assert!(s.verify_password("anna", "secret123").await.unwrap());
  assert!(!s.verify_password("anna", "different1").await.unwrap());
  assert_eq!(s.count().await.unwrap(), 1);
}

#[tokio::test]
async fn invalid_input_is_rejected_by_the_store() {
  let s = store().await;

  let mut short = new_profile("anna");
  short.password = "abc".into();
  let err = s.create_profile(short).await.unwrap_err();
  assert!(matches!(
    err.domain(),
    Some(rapport_core::Error::Validation(ValidationError::PasswordTooShort { .. }))
  ));

  let today = local_today();
  let mut young = new_profile("kid");
  young.birth_date = date(today.year() - 10, 1, 1);
  let err = s.create_profile(young).await.unwrap_err();
  assert!(matches!(
    err.domain(),
    Some(rapport_core::Error::Validation(ValidationError::Underage { .. }))
  ));

  assert_eq!(s.count().await.unwrap(), 0);
}

#[tokio::test]
async fn age_is_measured_against_the_local_date() {
  let s = store().await;
  let today = local_today();
  let eighteen_today = today.checked_sub_months(Months::new(18 * 12)).unwrap();

  let mut adult = new_profile("adult");
  adult.birth_date = eighteen_today;
  s.create_profile(adult).await.unwrap();

  let mut almost = new_profile("almost");
  almost.birth_date = eighteen_today.succ_opt().unwrap();
  let err = s.create_profile(almost).await.unwrap_err();
  assert!(matches!(
    err.domain(),
    Some(rapport_core::Error::Validation(ValidationError::Underage { age: 17, .. }))
  ));
}

#[test]
fn only_unique_failures_count_as_taken_usernames() {
  let conn = rusqlite::Connection::open_in_memory().unwrap();
  conn.execute_batch(SCHEMA).unwrap();
  let insert = "INSERT INTO profiles (
                  username, password_hash, first_name, last_name, birth_date,
                  location, created_at
                ) VALUES (?1, 'hash', ?2, 'Petrova', '1990-03-01', 'Kazan',
                          '2024-01-01T00:00:00+00:00')";

  conn.execute(insert, rusqlite::params!["anna", "Anna"]).unwrap();
  let taken = conn.execute(insert, rusqlite::params!["anna", "Anna"]).unwrap_err();
  assert!(is_unique_violation(&taken));

  let not_null = conn
    .execute(insert, rusqlite::params!["boris", None::<String>])
    .unwrap_err();
  assert!(!is_unique_violation(&not_null));
}

// ─── Passwords ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn password_is_stored_hashed() {
  let s = store().await;
  s.create_profile(new_profile("anna")).await.unwrap();

  let stored = s.stored_password_hash("anna").await.unwrap().unwrap();
  assert_ne!(stored, "secret123");
  assert!(!stored.contains("secret123"));

  assert!(s.verify_password("anna", "secret123").await.unwrap());
  assert!(!s.verify_password("anna", "secret124").await.unwrap());
  assert!(!s.verify_password("nobody", "secret123").await.unwrap());
}

// ─── Results ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn set_result_overwrites() {
  let s = store().await;
  s.create_profile(new_profile("anna")).await.unwrap();

  s.set_result("anna", Category::Cheerful).await.unwrap();
  s.set_result("anna", Category::Trusting).await.unwrap();

  let profile = s.get_profile("anna").await.unwrap().unwrap();
  assert_eq!(profile.result, Some(Category::Trusting));
  assert!(s.find_usernames_by_result(Category::Cheerful).await.unwrap().is_empty());
}

#[tokio::test]
async fn set_result_on_unknown_user_fails_without_insert() {
  let s = store().await;
  let err = s.set_result("ghost", Category::Adventurous).await.unwrap_err();
  assert!(is_not_found(&err));
  assert_eq!(s.count().await.unwrap(), 0);
}

#[tokio::test]
async fn summary_of_unknown_user_is_not_found() {
  let s = store().await;
  let err = s.get_profile_summary("ghost").await.unwrap_err();
  assert!(is_not_found(&err));
}

#[tokio::test]
async fn find_by_result_matches_exactly_in_storage_order() {
  let s = store().await;
  for name in ["zoe", "anna", "boris", "vera"] {
    s.create_profile(new_profile(name)).await.unwrap();
  }
  s.set_result("zoe", Category::Intellectual).await.unwrap();
  s.set_result("boris", Category::Adventurous).await.unwrap();
  s.set_result("anna", Category::Intellectual).await.unwrap();
  // "vera" never finishes the quiz.

  let intellectual = s.find_usernames_by_result(Category::Intellectual).await.unwrap();
  assert_eq!(intellectual, vec!["zoe".to_string(), "anna".to_string()]);

  let adventurous = s.find_usernames_by_result(Category::Adventurous).await.unwrap();
  assert_eq!(adventurous, vec!["boris".to_string()]);

  assert!(s.find_usernames_by_result(Category::Trusting).await.unwrap().is_empty());
}

// ─── End-to-end flow ─────────────────────────────────────────────────────────

#[tokio::test]
async fn quiz_result_and_similar_profiles() {
  let s = store().await;
  let mut other = new_profile("boris");
  other.first_name = "Boris".into();
  other.birth_date = date(1980, 12, 31);
  s.create_profile(other.with_description("Chess")).await.unwrap();
  s.set_result("boris", Category::Intellectual).await.unwrap();

  s.create_profile(new_profile("anna")).await.unwrap();

  let mut quiz = QuizSession::from_answers([1, 1, 1, 2]).unwrap();
  let category = quiz.compute_result().unwrap();
  assert_eq!(category, Category::Intellectual);
  s.set_result("anna", category).await.unwrap();

  let today = date(2024, 6, 1);
  let matches = similar_profiles(&s, "anna", category, today).await.unwrap();
  assert_eq!(matches.len(), 1);
  assert_eq!(matches[0].username, "boris");
  assert_eq!(matches[0].first_name, "Boris");
  assert_eq!(matches[0].age, 43);
  assert_eq!(matches[0].description, "Chess");
}

// ─── Persistence ─────────────────────────────────────────────────────────────

#[tokio::test]
async fn reopening_a_file_keeps_profiles() {
  let path = std::env::temp_dir().join(format!(
    "rapport-store-test-{}-{}.db",
    std::process::id(),
    Utc::now().timestamp_nanos_opt().unwrap_or_default()
  ));

  {
    let s = SqliteStore::open(&path).await.unwrap();
    s.create_profile(new_profile("anna")).await.unwrap();
    s.set_result("anna", Category::Cheerful).await.unwrap();
  }

  let s = SqliteStore::open(&path).await.unwrap();
  assert_eq!(
    s.find_usernames_by_result(Category::Cheerful).await.unwrap(),
    vec!["anna".to_string()]
  );

  drop(s);
  for suffix in ["", "-wal", "-shm"] {
    let mut p = path.clone().into_os_string();
    p.push(suffix);
    let _ = std::fs::remove_file(p);
  }
}

// ─── Paths ───────────────────────────────────────────────────────────────────

#[test]
fn tilde_expands_to_home_only_as_a_prefix() {
  use std::path::{Path, PathBuf};

  if let Ok(home) = std::env::var("HOME") {
    assert_eq!(
      expand_tilde(Path::new("~/data/rapport.db")),
      PathBuf::from(home).join("data/rapport.db")
    );
  }
  assert_eq!(expand_tilde(Path::new("/srv/rapport.db")), Path::new("/srv/rapport.db"));
  assert_eq!(expand_tilde(Path::new("~other/rapport.db")), Path::new("~other/rapport.db"));
  assert_eq!(expand_tilde(Path::new("rapport.db")), Path::new("rapport.db"));
}
