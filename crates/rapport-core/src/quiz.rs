//! The compatibility quiz.
//!
//! Four fixed questions, four options each. Every option position is a
//! "bucket"; the bucket chosen most often decides the [`Category`]. Ties go to
//! the lowest bucket, so an empty answer sheet scores as bucket 1.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoEnumIterator as _, IntoStaticStr};

use crate::{Error, Result};

pub const QUESTION_COUNT: usize = 4;
pub const OPTION_COUNT: u8 = 4;

/// Answer slot value for a question left unanswered.
pub const UNANSWERED: u8 = 0;

// ─── Catalog ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Question {
  pub prompt:  &'static str,
  pub options: [&'static str; OPTION_COUNT as usize],
}

/// The question catalog. Order of questions and options is significant.
pub static QUESTIONS: [Question; QUESTION_COUNT] = [
  Question {
    prompt:  "Which of these activities is closest to you?",
    options: [
      "Reading books",
      "Spending time outdoors",
      "Going to events and parties",
      "Playing sports",
    ],
  },
  Question {
    prompt:  "Which kind of communication do you find most pleasant?",
    options: [
      "Deep conversations on serious topics",
      "Light and cheerful chats",
      "Discussing interesting facts and knowledge",
      "Romantic compliments and flirting",
    ],
  },
  Question {
    prompt:  "What matters more to you in a relationship?",
    options: [
      "Emotional support",
      "Shared interests and hobbies",
      "Adventures and new experiences",
      "Trust and openness",
    ],
  },
  Question {
    prompt:  "Which partner trait matters most to you?",
    options: [
      "Sense of humour",
      "Kindness and care",
      "Ambition and drive",
      "Intelligence and education",
    ],
  },
];

// ─── Category ────────────────────────────────────────────────────────────────

/// A quiz result. The lowercase variant name is the persisted string.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  Display,
  EnumString,
  AsRefStr,
  IntoStaticStr,
  EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Category {
  Intellectual,
  Cheerful,
  Adventurous,
  Trusting,
}

impl Category {
  /// Bucket number, 1–4.
  pub fn bucket(self) -> u8 {
    match self {
      Self::Intellectual => 1,
      Self::Cheerful => 2,
      Self::Adventurous => 3,
      Self::Trusting => 4,
    }
  }

  pub fn from_bucket(bucket: u8) -> Option<Self> {
    Self::iter().find(|c| c.bucket() == bucket)
  }

  /// The text shown to the user once the quiz is scored.
  pub fn description(self) -> &'static str {
    match self {
      Self::Intellectual => {
        "You need deep, intellectual relationships. We recommend thoughtful \
         conversation partners and people with a rich inner world."
      }
      Self::Cheerful => {
        "You are looking for a cheerful, fun-loving partner. We recommend \
         meeting upbeat, joyful people."
      }
      Self::Adventurous => {
        "Adventure and activity matter to you. People ready for shared travel \
         and new experiences suit you best."
      }
      Self::Trusting => {
        "You need partners for a trusting, harmonious relationship. We \
         recommend open and honest people."
      }
    }
  }

  /// Plurality vote over buckets 1–4.
  ///
  /// Unanswered slots (and any value outside 1–4) count for nothing. The
  /// lowest bucket wins a tie.
  pub fn from_answers(answers: &[u8; QUESTION_COUNT]) -> Self {
    let mut counts = [0usize; OPTION_COUNT as usize];
    for &answer in answers {
      if (1..=OPTION_COUNT).contains(&answer) {
        counts[usize::from(answer - 1)] += 1;
      }
    }

    let mut winner = 0;
    for (bucket, &count) in counts.iter().enumerate() {
      if count > counts[winner] {
        winner = bucket;
      }
    }

    // `winner` is in 0..4, so the lookup always succeeds.
    Self::from_bucket(winner as u8 + 1).unwrap_or(Self::Intellectual)
  }

  /// Parse a persisted category string.
  pub fn parse(s: &str) -> Result<Self> {
    s.parse().map_err(|_| Error::UnknownCategory(s.to_owned()))
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState {
  NotStarted,
  InProgress,
  /// Terminal. A retake needs a new session.
  Completed(Category),
}

/// One user's pass through [`QUESTIONS`]. Never persisted.
#[derive(Debug, Clone)]
pub struct QuizSession {
  answers: [u8; QUESTION_COUNT],
  cursor:  usize,
  state:   QuizState,
}

impl Default for QuizSession {
  fn default() -> Self { Self::new() }
}

impl QuizSession {
  pub fn new() -> Self {
    Self {
      answers: [UNANSWERED; QUESTION_COUNT],
      cursor:  0,
      state:   QuizState::NotStarted,
    }
  }

  /// A session with every question answered and passed, ready to score.
  pub fn from_answers(answers: [u8; QUESTION_COUNT]) -> Result<Self> {
    let mut session = Self::new();
    for (question, option) in answers.into_iter().enumerate() {
      session.record_answer(question, option)?;
      session.advance()?;
    }
    Ok(session)
  }

  pub fn state(&self) -> QuizState { self.state }

  pub fn answers(&self) -> [u8; QUESTION_COUNT] { self.answers }

  /// Index of the question the user is on; equals [`QUESTION_COUNT`] once
  /// every question has been passed.
  pub fn cursor(&self) -> usize { self.cursor }

  pub fn current_question(&self) -> Option<&'static Question> {
    QUESTIONS.get(self.cursor)
  }

  /// Set the answer for `question` (0-based) to `option` (1-based), or clear
  /// it with [`UNANSWERED`]. A later call replaces the earlier one.
  pub fn record_answer(&mut self, question: usize, option: u8) -> Result<()> {
    self.ensure_open()?;
    if question >= QUESTION_COUNT {
      return Err(Error::QuestionOutOfRange(question));
    }
    if option > OPTION_COUNT {
      return Err(Error::OptionOutOfRange(option));
    }
    self.answers[question] = option;
    self.state = QuizState::InProgress;
    Ok(())
  }

  /// Move on to the next question; the current one keeps whatever answer it
  /// has, possibly none.
  pub fn advance(&mut self) -> Result<()> {
    self.ensure_open()?;
    if self.cursor < QUESTION_COUNT {
      self.cursor += 1;
    }
    self.state = QuizState::InProgress;
    Ok(())
  }

  pub fn is_complete(&self) -> bool { self.cursor >= QUESTION_COUNT }

  /// Score the session and close it. Calling again returns the same result.
  pub fn compute_result(&mut self) -> Result<Category> {
    if let QuizState::Completed(category) = self.state {
      return Ok(category);
    }
    if !self.is_complete() {
      return Err(Error::QuizIncomplete);
    }
    let category = Category::from_answers(&self.answers);
    self.state = QuizState::Completed(category);
    Ok(category)
  }

  fn ensure_open(&self) -> Result<()> {
    match self.state {
      QuizState::Completed(_) => Err(Error::QuizCompleted),
      _ => Ok(()),
    }
  }
}

#[cfg(test)]
mod tests {
  use strum::IntoEnumIterator;

  use super::*;

  #[test]
  fn catalog_shape() {
    assert_eq!(QUESTIONS.len(), 4);
    assert_eq!(QUESTIONS[0].prompt, "Which of these activities is closest to you?");
    assert_eq!(QUESTIONS[3].prompt, "Which partner trait matters most to you?");
  }

  #[test]
  fn majority_wins() {
    assert_eq!(Category::from_answers(&[1, 1, 1, 2]), Category::Intellectual);
    assert_eq!(Category::from_answers(&[3, 4, 3, 1]), Category::Adventurous);
    assert_eq!(Category::from_answers(&[4, 4, 0, 0]), Category::Trusting);
  }

  #[test]
  fn ties_go_to_lowest_bucket() {
    assert_eq!(Category::from_answers(&[1, 2, 0, 0]), Category::Intellectual);
    assert_eq!(Category::from_answers(&[4, 3, 2, 0]), Category::Cheerful);
    assert_eq!(Category::from_answers(&[3, 3, 2, 2]), Category::Cheerful);
  }

  #[test]
  fn empty_sheet_scores_bucket_one() {
    assert_eq!(Category::from_answers(&[0, 0, 0, 0]), Category::Intellectual);
  }

  #[test]
  fn scoring_is_deterministic() {
    let answers = [2, 3, 2, 3];
    let first = Category::from_answers(&answers);
    for _ in 0..10 {
      assert_eq!(Category::from_answers(&answers), first);
    }
  }

  #[test]
  fn category_strings_round_trip() {
    for category in Category::iter() {
      assert_eq!(Category::parse(category.as_ref()).unwrap(), category);
      assert_eq!(Category::from_bucket(category.bucket()), Some(category));
    }
    assert_eq!(Category::Adventurous.to_string(), "adventurous");
    assert!(matches!(
      Category::parse("romantic"),
      Err(Error::UnknownCategory(s)) if s == "romantic"
    ));
  }

  #[test]
  fn category_serde_uses_slug() {
    let json = serde_json::to_string(&Category::Trusting).unwrap();
    assert_eq!(json, "\"trusting\"");
  }

  #[test]
  fn session_walkthrough() {
    let mut quiz = QuizSession::new();
    assert_eq!(quiz.state(), QuizState::NotStarted);
    assert_eq!(quiz.current_question(), Some(&QUESTIONS[0]));

    quiz.record_answer(0, 3).unwrap();
    assert_eq!(quiz.state(), QuizState::InProgress);
    quiz.advance().unwrap();
    quiz.record_answer(1, 3).unwrap();
    quiz.advance().unwrap();
    // Question 3 left unanswered.
    quiz.advance().unwrap();
    assert!(!quiz.is_complete());
    assert!(matches!(quiz.compute_result(), Err(Error::QuizIncomplete)));

    quiz.record_answer(3, 1).unwrap();
    quiz.advance().unwrap();
    assert!(quiz.is_complete());
    assert_eq!(quiz.current_question(), None);
    assert_eq!(quiz.answers(), [3, 3, 0, 1]);

    let category = quiz.compute_result().unwrap();
    assert_eq!(category, Category::Adventurous);
    assert_eq!(quiz.state(), QuizState::Completed(Category::Adventurous));
    assert_eq!(quiz.compute_result().unwrap(), category);
  }

  #[test]
  fn later_selection_overwrites() {
    let mut quiz = QuizSession::new();
    quiz.record_answer(0, 1).unwrap();
    quiz.record_answer(0, 4).unwrap();
    assert_eq!(quiz.answers()[0], 4);
    quiz.record_answer(0, UNANSWERED).unwrap();
    assert_eq!(quiz.answers()[0], UNANSWERED);
  }

  #[test]
  fn out_of_range_input_is_rejected() {
    let mut quiz = QuizSession::new();
    assert!(matches!(quiz.record_answer(4, 1), Err(Error::QuestionOutOfRange(4))));
    assert!(matches!(quiz.record_answer(0, 5), Err(Error::OptionOutOfRange(5))));
    assert!(matches!(
      QuizSession::from_answers([1, 2, 9, 0]),
      Err(Error::OptionOutOfRange(9))
    ));
  }

  #[test]
  fn completed_session_is_closed() {
    let mut quiz = QuizSession::from_answers([2, 2, 1, 0]).unwrap();
    assert_eq!(quiz.compute_result().unwrap(), Category::Cheerful);
    assert!(matches!(quiz.record_answer(0, 1), Err(Error::QuizCompleted)));
    assert!(matches!(quiz.advance(), Err(Error::QuizCompleted)));
  }
}
