//! # Jira Issue Endpoints
//!
//! Fetching issues, and the subtasks listed under a parent story.

use jiraflow_core::{AccessToken, Subtask, TrackerError};
use reqwest::StatusCode;
use tracing::debug;

use crate::client::{JiraClient, decode, status_error};
use crate::models::JiraIssue;

/// Fields needed to judge and report on one subtask
const SUBTASK_FIELDS: &str = "summary,status,assignee";

impl JiraClient {
  /// Get a Jira issue by key, restricted to the comma-separated `fields`
  pub async fn get_issue(&self, issue_key: &str, fields: &str, token: &AccessToken) -> Result<JiraIssue, TrackerError> {
    debug!(issue = issue_key, fields, "Fetching issue");
    let request = self
      .client
      .get(self.api_url(&format!("/issue/{issue_key}")))
      .query(&[("fields", fields)]);
    let response = self.send(request, token).await?;

    match response.status() {
      StatusCode::OK => decode(response, "issue").await,
      _ => Err(status_error(response, issue_key).await),
    }
  }

  /// Get the subtasks of a story, in the order Jira lists them
  pub async fn get_subtasks(&self, story_key: &str, token: &AccessToken) -> Result<Vec<Subtask>, TrackerError> {
    let story = self.get_issue(story_key, "subtasks", token).await?;
    Ok(story.fields.subtasks.into_iter().map(Subtask::from).collect())
  }

  /// Get one subtask with its assignee
  pub async fn get_subtask_detail(&self, key: &str, token: &AccessToken) -> Result<Subtask, TrackerError> {
    self.get_issue(key, SUBTASK_FIELDS, token).await.map(Subtask::from)
  }
}
