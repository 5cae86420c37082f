//! # Story Key Parsing
//!
//! Validates the Jira story keys callers hand to the processor. A story key is
//! a project prefix of upper-case letters, a dash, and a numeric id
//! (`PROJ-123`).

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use thiserror::Error;

static STORY_KEY_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^[A-Z]+-[0-9]+$").expect("Failed to compile story key regex"));

/// Errors that can occur while parsing a story key
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoryKeyError {
  #[error("story_key is required")]
  Missing,
  #[error("Invalid story key format: '{0}'. Expected format: PROJ-123")]
  InvalidFormat(String),
}

/// A validated Jira story key such as `PROJ-123`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StoryKey(String);

impl StoryKey {
  /// Parse a story key from user input, trimming surrounding whitespace
  pub fn parse(input: &str) -> Result<Self, StoryKeyError> {
    let input = input.trim();

    if input.is_empty() {
      return Err(StoryKeyError::Missing);
    }

    if STORY_KEY_PATTERN.is_match(input) {
      Ok(Self(input.to_string()))
    } else {
      Err(StoryKeyError::InvalidFormat(input.to_string()))
    }
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for StoryKey {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}
