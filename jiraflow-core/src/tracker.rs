//! # Issue Tracker Seam
//!
//! The operations the task processor needs from a remote issue tracker. Every
//! call carries the caller's token, so one tracker value can serve many
//! independent runs.

use std::future::Future;

use thiserror::Error;

use crate::models::{Subtask, UserIdentity};
use crate::token::AccessToken;
use crate::workflow::WorkflowState;

/// Failures reported by an issue tracker.
///
/// Messages never include the caller's token.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TrackerError {
  #[error("Authentication failed. Please check your Jira PAT.")]
  Authentication,
  #[error("Issue {0} not found")]
  NotFound(String),
  #[error("Invalid transition: {0}")]
  InvalidTransition(String),
  #[error("Jira is unavailable: {0}")]
  Unavailable(String),
  #[error("Unexpected error: HTTP {status} - {body}")]
  Unexpected { status: u16, body: String },
}

/// Remote issue tracker operations used by a processing run
pub trait IssueTracker {
  /// Resolve the identity the token belongs to
  fn current_user(&self, token: &AccessToken) -> impl Future<Output = Result<UserIdentity, TrackerError>> + Send;

  /// List the subtasks of a story, in tracker order
  fn list_subtasks(
    &self,
    story_key: &str,
    token: &AccessToken,
  ) -> impl Future<Output = Result<Vec<Subtask>, TrackerError>> + Send;

  /// Fetch the full detail of one subtask, including its assignee
  fn get_subtask(&self, key: &str, token: &AccessToken) -> impl Future<Output = Result<Subtask, TrackerError>> + Send;

  /// Move a subtask into `target`
  fn transition(
    &self,
    key: &str,
    target: WorkflowState,
    token: &AccessToken,
  ) -> impl Future<Output = Result<(), TrackerError>> + Send;

  /// Whether `user` already logged work on the subtask
  fn has_worklog_by(
    &self,
    key: &str,
    user: &UserIdentity,
    token: &AccessToken,
  ) -> impl Future<Output = Result<bool, TrackerError>> + Send;

  /// Record a work-log entry such as `2h`
  fn add_worklog(
    &self,
    key: &str,
    time_spent: &str,
    token: &AccessToken,
  ) -> impl Future<Output = Result<(), TrackerError>> + Send;
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_error_messages() {
    assert_eq!(
      TrackerError::NotFound("PROJ-99999".to_string()).to_string(),
      "Issue PROJ-99999 not found"
    );
    assert_eq!(
      TrackerError::Unexpected {
        status: 418,
        body: "teapot".to_string(),
      }
      .to_string(),
      "Unexpected error: HTTP 418 - teapot"
    );
    assert!(TrackerError::Authentication.to_string().contains("Authentication failed"));
  }
}
