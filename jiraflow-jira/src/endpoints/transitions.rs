use jiraflow_core::{AccessToken, TrackerError, WorkflowState};
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::client::{JiraClient, decode, status_error};
use crate::models::{JiraTransition, JiraTransitions, TransitionId, TransitionRequest};

impl JiraClient {
  /// Get available transitions for an issue
  pub async fn get_transitions(&self, issue_key: &str, token: &AccessToken) -> Result<Vec<JiraTransition>, TrackerError> {
    let request = self.client.get(self.api_url(&format!("/issue/{issue_key}/transitions")));
    let response = self.send(request, token).await?;

    match response.status() {
      StatusCode::OK => {
        let transitions: JiraTransitions = decode(response, "transitions").await?;
        Ok(transitions.transitions)
      }
      _ => Err(status_error(response, issue_key).await),
    }
  }

  /// Apply a transition by id
  pub async fn transition_issue(
    &self,
    issue_key: &str,
    transition_id: &str,
    token: &AccessToken,
  ) -> Result<(), TrackerError> {
    let payload = TransitionRequest {
      transition: TransitionId {
        id: transition_id.to_string(),
      },
    };

    let request = self
      .client
      .post(self.api_url(&format!("/issue/{issue_key}/transitions")))
      .json(&payload);
    let response = self.send(request, token).await?;

    match response.status() {
      StatusCode::NO_CONTENT | StatusCode::OK => Ok(()),
      StatusCode::BAD_REQUEST => Err(TrackerError::InvalidTransition(format!(
        "transition {transition_id} is not available for {issue_key} in its current status"
      ))),
      _ => Err(status_error(response, issue_key).await),
    }
  }

  /// Move an issue into `target`, picking the transition whose destination
  /// status matches it
  pub async fn transition_to(
    &self,
    issue_key: &str,
    target: WorkflowState,
    token: &AccessToken,
  ) -> Result<(), TrackerError> {
    let transitions = self.get_transitions(issue_key, token).await?;

    let Some(transition) = transitions
      .iter()
      .find(|t| target.matches_status_name(t.target_name()))
    else {
      let available: Vec<&str> = transitions.iter().map(JiraTransition::target_name).collect();
      debug!(issue = issue_key, ?available, "No matching transition");
      return Err(TrackerError::InvalidTransition(format!(
        "no transition to {target} available for {issue_key}"
      )));
    };

    self.transition_issue(issue_key, &transition.id, token).await?;
    info!(issue = issue_key, to = %target, transition = %transition.name, "Transitioned issue");
    Ok(())
  }
}
