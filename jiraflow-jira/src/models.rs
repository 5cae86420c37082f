use jiraflow_core::{Subtask, UserIdentity};
use serde::{Deserialize, Serialize};

/// Represents a Jira issue
#[derive(Debug, Deserialize)]
pub struct JiraIssue {
  #[allow(dead_code)]
  pub id: String,
  pub key: String,
  #[serde(default)]
  pub fields: JiraIssueFields,
}

/// Represents Jira issue fields.
///
/// Only the fields named in the request's `fields` parameter are returned, so
/// every field is optional.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JiraIssueFields {
  pub summary: Option<String>,
  pub status: Option<JiraIssueStatus>,
  pub assignee: Option<JiraUser>,
  pub subtasks: Vec<JiraSubtaskRef>,
}

/// Represents a Jira issue status
#[derive(Debug, Deserialize)]
pub struct JiraIssueStatus {
  #[allow(dead_code)]
  pub id: Option<String>,
  pub name: String,
}

/// A subtask as embedded in its parent issue
#[derive(Debug, Deserialize)]
pub struct JiraSubtaskRef {
  pub key: String,
  #[serde(default)]
  pub fields: JiraIssueFields,
}

/// Represents a Jira user (Jira Server / Data Center shape)
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
  pub name: Option<String>,
  pub key: Option<String>,
  pub display_name: Option<String>,
  pub email_address: Option<String>,
}

impl JiraUser {
  /// Login name, falling back to the user key
  pub fn identity(&self) -> Option<UserIdentity> {
    self
      .name
      .as_deref()
      .or(self.key.as_deref())
      .filter(|name| !name.is_empty())
      .map(UserIdentity::new)
  }
}

/// Represents a Jira transition
#[derive(Debug, Deserialize)]
pub struct JiraTransition {
  pub id: String,
  pub name: String,
  pub to: Option<JiraTransitionTarget>,
}

impl JiraTransition {
  /// Name of the status this transition leads to
  pub fn target_name(&self) -> &str {
    self.to.as_ref().map(|to| to.name.as_str()).unwrap_or(&self.name)
  }
}

/// The status a transition leads to
#[derive(Debug, Deserialize)]
pub struct JiraTransitionTarget {
  pub name: String,
}

/// Represents a list of Jira transitions
#[derive(Debug, Deserialize)]
pub struct JiraTransitions {
  pub transitions: Vec<JiraTransition>,
}

/// Represents a transition request payload
#[derive(Debug, Serialize)]
pub struct TransitionRequest {
  pub transition: TransitionId,
}

/// Represents a transition ID for the request
#[derive(Debug, Serialize)]
pub struct TransitionId {
  pub id: String,
}

/// Payload for adding a work-log entry
#[derive(Debug, Serialize)]
pub struct WorklogRequest {
  #[serde(rename = "timeSpent")]
  pub time_spent: String,
}

/// One work-log entry
#[derive(Debug, Deserialize)]
pub struct JiraWorklog {
  pub author: Option<JiraUser>,
  #[serde(rename = "timeSpent")]
  pub time_spent: Option<String>,
}

/// Work-log listing for an issue
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct JiraWorklogs {
  pub worklogs: Vec<JiraWorklog>,
}

fn status_name(fields: &JiraIssueFields) -> String {
  fields.status.as_ref().map(|s| s.name.clone()).unwrap_or_default()
}

impl From<JiraIssue> for Subtask {
  fn from(issue: JiraIssue) -> Self {
    Self {
      status: status_name(&issue.fields),
      assignee: issue.fields.assignee.as_ref().and_then(JiraUser::identity),
      summary: issue.fields.summary.unwrap_or_default(),
      key: issue.key,
    }
  }
}

impl From<JiraSubtaskRef> for Subtask {
  fn from(subtask: JiraSubtaskRef) -> Self {
    Self {
      status: status_name(&subtask.fields),
      assignee: subtask.fields.assignee.as_ref().and_then(JiraUser::identity),
      summary: subtask.fields.summary.unwrap_or_default(),
      key: subtask.key,
    }
  }
}

#[cfg(test)]
mod tests {
  use serde_json::json;

  use super::*;

  #[test]
  fn test_jira_issue_with_subtasks_deserialization() {
    let json = json!({
        "id": "10000",
        "key": "PROJ-123",
        "fields": {
            "subtasks": [
                {
                    "id": "10001",
                    "key": "PROJ-124",
                    "fields": {
                        "summary": "Dev Testing",
                        "status": { "id": "1", "name": "Open" }
                    }
                },
                {
                    "id": "10002",
                    "key": "PROJ-125",
                    "fields": {
                        "summary": "Peer Code Review",
                        "status": { "name": "In Progress." }
                    }
                }
            ]
        }
    });

    let issue: JiraIssue = serde_json::from_value(json).unwrap();
    assert_eq!(issue.key, "PROJ-123");
    assert!(issue.fields.summary.is_none());

    let subtasks: Vec<Subtask> = issue.fields.subtasks.into_iter().map(Subtask::from).collect();
    assert_eq!(subtasks.len(), 2);
    assert_eq!(subtasks[0].key, "PROJ-124");
    assert_eq!(subtasks[0].status, "Open");
    assert_eq!(subtasks[1].summary, "Peer Code Review");
    assert_eq!(subtasks[1].status, "In Progress.");
    assert!(subtasks[1].assignee.is_none());
  }

  #[test]
  fn test_subtask_from_issue_uses_assignee_name() {
    let json = json!({
        "id": "10001",
        "key": "PROJ-124",
        "fields": {
            "summary": "Dev Testing",
            "status": { "name": "Open" },
            "assignee": { "name": "testuser", "key": "JIRAUSER1", "displayName": "Test User" }
        }
    });

    let subtask = Subtask::from(serde_json::from_value::<JiraIssue>(json).unwrap());
    assert_eq!(subtask.assignee, Some(UserIdentity::new("testuser")));
    assert_eq!(subtask.summary, "Dev Testing");
  }

  #[test]
  fn test_user_identity_falls_back_to_key() {
    let user: JiraUser = serde_json::from_value(json!({ "key": "JIRAUSER10100" })).unwrap();
    assert_eq!(user.identity(), Some(UserIdentity::new("JIRAUSER10100")));

    let nobody: JiraUser = serde_json::from_value(json!({ "displayName": "Ghost" })).unwrap();
    assert_eq!(nobody.identity(), None);
  }

  #[test]
  fn test_jira_transitions_deserialization() {
    let json = json!({
        "transitions": [
            { "id": "11", "name": "Start Progress", "to": { "id": "3", "name": "In Progress." } },
            { "id": "31", "name": "Completed" }
        ]
    });

    let transitions: JiraTransitions = serde_json::from_value(json).unwrap();

    assert_eq!(transitions.transitions.len(), 2);
    assert_eq!(transitions.transitions[0].target_name(), "In Progress.");
    assert_eq!(transitions.transitions[1].target_name(), "Completed");
  }

  #[test]
  fn test_request_payloads() {
    let transition = TransitionRequest {
      transition: TransitionId { id: "21".to_string() },
    };
    assert_eq!(
      serde_json::to_value(&transition).unwrap(),
      json!({ "transition": { "id": "21" } })
    );

    let worklog = WorklogRequest {
      time_spent: "2h".to_string(),
    };
    assert_eq!(serde_json::to_value(&worklog).unwrap(), json!({ "timeSpent": "2h" }));
  }
}
