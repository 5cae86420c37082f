//! Work-log endpoints.

use jiraflow_core::{AccessToken, TrackerError, UserIdentity};
use reqwest::StatusCode;
use tracing::info;

use crate::client::{JiraClient, decode, status_error};
use crate::models::{JiraUser, JiraWorklog, JiraWorklogs, WorklogRequest};

impl JiraClient {
  /// Get the work-log entries of an issue
  pub async fn get_worklogs(&self, issue_key: &str, token: &AccessToken) -> Result<Vec<JiraWorklog>, TrackerError> {
    let request = self.client.get(self.api_url(&format!("/issue/{issue_key}/worklog")));
    let response = self.send(request, token).await?;

    match response.status() {
      StatusCode::OK => {
        let worklogs: JiraWorklogs = decode(response, "worklogs").await?;
        Ok(worklogs.worklogs)
      }
      _ => Err(status_error(response, issue_key).await),
    }
  }

  /// Whether `user` authored any work-log entry on the issue
  pub async fn has_worklog_entry_by(
    &self,
    issue_key: &str,
    user: &UserIdentity,
    token: &AccessToken,
  ) -> Result<bool, TrackerError> {
    let worklogs = self.get_worklogs(issue_key, token).await?;
    Ok(
      worklogs
        .iter()
        .filter_map(|worklog| worklog.author.as_ref().and_then(JiraUser::identity))
        .any(|author| &author == user),
    )
  }

  /// Log `time_spent` (Jira duration syntax, e.g. `2h`) against an issue
  pub async fn add_worklog_entry(
    &self,
    issue_key: &str,
    time_spent: &str,
    token: &AccessToken,
  ) -> Result<(), TrackerError> {
    let payload = WorklogRequest {
      time_spent: time_spent.to_string(),
    };

    let request = self
      .client
      .post(self.api_url(&format!("/issue/{issue_key}/worklog")))
      .json(&payload);
    let response = self.send(request, token).await?;

    match response.status() {
      StatusCode::CREATED | StatusCode::OK => {
        info!(issue = issue_key, time_spent, "Logged work");
        Ok(())
      }
      _ => Err(status_error(response, issue_key).await),
    }
  }
}
