//! Story-level failures that abort a whole processing run.

use serde::Serialize;
use thiserror::Error;

use crate::story_key::StoryKeyError;
use crate::token::TokenError;
use crate::tracker::TrackerError;

/// Tag identifying which kind of story-level failure occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
  ValidationError,
  NotFoundError,
  AuthenticationError,
  UpstreamUnavailableError,
}

impl ErrorKind {
  pub const fn as_str(self) -> &'static str {
    match self {
      Self::ValidationError => "ValidationError",
      Self::NotFoundError => "NotFoundError",
      Self::AuthenticationError => "AuthenticationError",
      Self::UpstreamUnavailableError => "UpstreamUnavailableError",
    }
  }
}

/// A failure that stops a run before any subtask is processed
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessError {
  #[error("{0}")]
  Validation(String),
  #[error("{0}")]
  NotFound(String),
  #[error("{0}")]
  Authentication(String),
  #[error("{0}")]
  UpstreamUnavailable(String),
}

impl ProcessError {
  pub const fn kind(&self) -> ErrorKind {
    match self {
      Self::Validation(_) => ErrorKind::ValidationError,
      Self::NotFound(_) => ErrorKind::NotFoundError,
      Self::Authentication(_) => ErrorKind::AuthenticationError,
      Self::UpstreamUnavailable(_) => ErrorKind::UpstreamUnavailableError,
    }
  }
}

impl From<StoryKeyError> for ProcessError {
  fn from(error: StoryKeyError) -> Self {
    Self::Validation(error.to_string())
  }
}

impl From<TokenError> for ProcessError {
  fn from(error: TokenError) -> Self {
    Self::Validation(error.to_string())
  }
}

impl From<TrackerError> for ProcessError {
  fn from(error: TrackerError) -> Self {
    let message = error.to_string();
    match error {
      TrackerError::Authentication => Self::Authentication(message),
      TrackerError::NotFound(_) => Self::NotFound(message),
      TrackerError::InvalidTransition(_) | TrackerError::Unavailable(_) | TrackerError::Unexpected { .. } => {
        Self::UpstreamUnavailable(message)
      }
    }
  }
}
