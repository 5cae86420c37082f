//! [`IssueTracker`] backed by the Jira REST API.

use jiraflow_core::{AccessToken, IssueTracker, Subtask, TrackerError, UserIdentity, WorkflowState};

use crate::client::JiraClient;

impl IssueTracker for JiraClient {
  async fn current_user(&self, token: &AccessToken) -> Result<UserIdentity, TrackerError> {
    self
      .get_myself(token)
      .await?
      .identity()
      .ok_or_else(|| TrackerError::Unavailable("Jira returned a user without a name".to_string()))
  }

  async fn list_subtasks(&self, story_key: &str, token: &AccessToken) -> Result<Vec<Subtask>, TrackerError> {
    self.get_subtasks(story_key, token).await
  }

  async fn get_subtask(&self, key: &str, token: &AccessToken) -> Result<Subtask, TrackerError> {
    self.get_subtask_detail(key, token).await
  }

  async fn transition(&self, key: &str, target: WorkflowState, token: &AccessToken) -> Result<(), TrackerError> {
    self.transition_to(key, target, token).await
  }

  async fn has_worklog_by(&self, key: &str, user: &UserIdentity, token: &AccessToken) -> Result<bool, TrackerError> {
    self.has_worklog_entry_by(key, user, token).await
  }

  async fn add_worklog(&self, key: &str, time_spent: &str, token: &AccessToken) -> Result<(), TrackerError> {
    self.add_worklog_entry(key, time_spent, token).await
  }
}
