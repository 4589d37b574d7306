//! The interactive flow: registration form → quiz → result → similar users.
//!
//! Generic over the input and output streams so the whole flow can be driven
//! from a script in tests.

use std::io::{BufRead, Write};

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use rapport_core::{
  DomainError as _,
  matching::{MatchCard, similar_profiles},
  profile::NewProfile,
  quiz::{Category, OPTION_COUNT, QUESTION_COUNT, QuizSession, UNANSWERED},
  store::ProfileStore,
};

pub const TERMS: &str = "\
Terms of use
1. Using Rapport is only possible if you accept every provision of these terms.
2. By creating an account you confirm that:
   - you are at least 18 years old;
   - you have the right and capacity to enter into this agreement;
   - you have never been convicted of a serious or sexual offence;
   - no account of yours has previously been blocked or removed.
3. You will use Rapport and post content only in accordance with these terms
   and all applicable laws.";

/// How a wizard run ended.
#[derive(Debug)]
pub enum Outcome {
  /// The user refused the terms of use; nothing was written.
  Declined,
  Completed {
    username: String,
    category: Category,
    matches:  Vec<MatchCard>,
  },
}

pub struct Wizard<'s, S, R, W> {
  store:  &'s S,
  input:  R,
  output: W,
  /// Reference date for age checks and displayed ages.
  today:  NaiveDate,
}

impl<'s, S, R, W> Wizard<'s, S, R, W>
where
  S: ProfileStore,
  R: BufRead,
  W: Write,
{
  pub fn new(store: &'s S, input: R, output: W, today: NaiveDate) -> Self {
    Self { store, input, output, today }
  }

  pub async fn run(&mut self) -> Result<Outcome> {
    let Some(username) = self.register().await? else {
      writeln!(self.output, "You must accept the terms of use to register.")?;
      return Ok(Outcome::Declined);
    };

    let category = self.take_quiz()?;
    self
      .store
      .set_result(&username, category)
      .await
      .context("storing quiz result")?;

    writeln!(self.output, "\nYour result:\n{}", category.description())?;

    let matches = similar_profiles(self.store, &username, category, self.today)
      .await
      .context("looking up similar users")?;
    self.show_matches(&matches)?;

    Ok(Outcome::Completed { username, category, matches })
  }

  // ── Registration ──────────────────────────────────────────────────────────

  /// Returns the new username, or `None` if the terms were refused.
  async fn register(&mut self) -> Result<Option<String>> {
    writeln!(self.output, "{TERMS}\n")?;
    if !self.confirm("Do you accept the terms of use? [y/N] ")? {
      return Ok(None);
    }

    loop {
      let form = self.read_form()?;
      if let Err(e) = form.validate(self.today) {
        writeln!(self.output, "Error: {e}. Please try again.\n")?;
        continue;
      }

      match self.store.create_profile(form).await {
        Ok(profile) => {
          writeln!(self.output, "You have registered successfully!")?;
          return Ok(Some(profile.username));
        }
        Err(e) if e.domain().is_some() => {
          writeln!(self.output, "Error: {e}. Please try again.\n")?;
        }
        Err(e) => return Err(e).context("creating profile"),
      }
    }
  }

  fn read_form(&mut self) -> Result<NewProfile> {
    let username   = self.prompt("Username: ")?;
    let password   = self.prompt("Password (8-20 letters or digits): ")?;
    let first_name = self.prompt("First name: ")?;
    let last_name  = self.prompt("Last name: ")?;
    let birth_date = self.prompt_date("Birth date (YYYY-MM-DD): ")?;
    let location   = self.prompt("Location: ")?;

    Ok(
      NewProfile::new(username, password, first_name, last_name, birth_date, location)
        .with_description(self.prompt("Profile description (optional): ")?)
        .with_photo_path(self.prompt("Photo path (optional): ")?),
    )
  }

  // ── Quiz ──────────────────────────────────────────────────────────────────

  fn take_quiz(&mut self) -> Result<Category> {
    let mut session = QuizSession::new();

    while let Some(question) = session.current_question() {
      let index = session.cursor();
      writeln!(
        self.output,
        "\nQuestion {}/{QUESTION_COUNT}: {}",
        index + 1,
        question.prompt
      )?;
      for (i, option) in question.options.iter().enumerate() {
        writeln!(self.output, "  {}. {option}", i + 1)?;
      }

      let option = loop {
        let line = self.prompt("Your choice (1-4, empty to skip): ")?;
        let line = line.trim();
        if line.is_empty() {
          break UNANSWERED;
        }
        match line.parse::<u8>() {
          Ok(n) if (1..=OPTION_COUNT).contains(&n) => break n,
          _ => writeln!(self.output, "Please enter a number from 1 to {OPTION_COUNT}.")?,
        }
      };

      session.record_answer(index, option)?;
      session.advance()?;
    }

    Ok(session.compute_result()?)
  }

  fn show_matches(&mut self, matches: &[MatchCard]) -> Result<()> {
    if matches.is_empty() {
      writeln!(self.output, "\nNo users with the same result.")?;
      return Ok(());
    }
    writeln!(self.output, "\nUsers with the same result:")?;
    for m in matches {
      writeln!(
        self.output,
        "First name: {}\nLast name: {}\nAge: {}\nDescription: {}\n",
        m.first_name, m.last_name, m.age, m.description
      )?;
    }
    Ok(())
  }

  // ── Line input ────────────────────────────────────────────────────────────

  fn prompt(&mut self, label: &str) -> Result<String> {
    write!(self.output, "{label}")?;
    self.output.flush()?;

    let mut line = String::new();
    if self.input.read_line(&mut line)? == 0 {
      bail!("input closed before the flow finished");
    }
    Ok(line.trim_end_matches(['\n', '\r']).to_string())
  }

  fn prompt_date(&mut self, label: &str) -> Result<NaiveDate> {
    loop {
      let line = self.prompt(label)?;
      match NaiveDate::parse_from_str(line.trim(), "%Y-%m-%d") {
        Ok(date) => return Ok(date),
        Err(_) => writeln!(self.output, "Please enter the date as YYYY-MM-DD.")?,
      }
    }
  }

  fn confirm(&mut self, label: &str) -> Result<bool> {
    let answer = self.prompt(label)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
  }
}
