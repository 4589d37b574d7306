//! "Similar users": other profiles that scored the same category.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{profile::age_on, quiz::Category, store::ProfileStore};

/// What one user gets to see of another who shares their category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchCard {
  pub username:    String,
  pub first_name:  String,
  pub last_name:   String,
  pub age:         u32,
  pub description: String,
}

/// Every profile with `category` except `username` itself, in storage order.
///
/// Ages are computed against `today`.
pub async fn similar_profiles<S: ProfileStore>(
  store: &S,
  username: &str,
  category: Category,
  today: NaiveDate,
) -> Result<Vec<MatchCard>, S::Error> {
  let mut cards = Vec::new();
  for other in store.find_usernames_by_result(category).await? {
    if other == username {
      continue;
    }
    let summary = store.get_profile_summary(&other).await?;
    cards.push(MatchCard {
      age: age_on(summary.birth_date, today),
      first_name: summary.first_name,
      last_name: summary.last_name,
      description: summary.description,
      username: other,
    });
  }
  Ok(cards)
}
