//! Scripted issue tracker for processor tests
//!
//! [`RecordingTracker`] serves a fixed set of subtasks, fails the calls it is
//! told to fail, and records every call so tests can assert on call counts
//! and ordering.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use jiraflow_core::{AccessToken, IssueTracker, Subtask, TrackerError, UserIdentity, WorkflowState};

/// One call made against the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TrackerCall {
  CurrentUser,
  ListSubtasks(String),
  GetSubtask(String),
  Transition(String, WorkflowState),
  HasWorklog(String),
  AddWorklog(String, String),
}

impl TrackerCall {
  /// Whether the call changes state on the tracker
  pub fn is_mutation(&self) -> bool {
    matches!(self, Self::Transition(..) | Self::AddWorklog(..))
  }
}

/// In-memory tracker with scripted failures
pub struct RecordingTracker {
  identity: Result<UserIdentity, TrackerError>,
  list_failure: Option<TrackerError>,
  subtasks: Vec<Subtask>,
  get_failures: HashMap<String, TrackerError>,
  transition_failures: HashMap<(String, WorkflowState), TrackerError>,
  existing_worklogs: HashSet<String>,
  worklog_lookup_failures: HashMap<String, TrackerError>,
  worklog_failures: HashMap<String, TrackerError>,
  calls: Mutex<Vec<TrackerCall>>,
}

impl RecordingTracker {
  /// A tracker whose tokens belong to `identity`
  pub fn new(identity: &str) -> Self {
    Self {
      identity: Ok(UserIdentity::new(identity)),
      list_failure: None,
      subtasks: Vec::new(),
      get_failures: HashMap::new(),
      transition_failures: HashMap::new(),
      existing_worklogs: HashSet::new(),
      worklog_lookup_failures: HashMap::new(),
      worklog_failures: HashMap::new(),
      calls: Mutex::new(Vec::new()),
    }
  }

  /// Add a subtask under the story, in listing order
  pub fn with_subtask(mut self, key: &str, status: &str, assignee: Option<&str>) -> Self {
    self.subtasks.push(Subtask {
      key: key.to_string(),
      status: status.to_string(),
      assignee: assignee.map(UserIdentity::new),
      summary: format!("Summary of {key}"),
    });
    self
  }

  pub fn fail_current_user(mut self, error: TrackerError) -> Self {
    self.identity = Err(error);
    self
  }

  pub fn fail_list(mut self, error: TrackerError) -> Self {
    self.list_failure = Some(error);
    self
  }

  pub fn fail_get(mut self, key: &str, error: TrackerError) -> Self {
    self.get_failures.insert(key.to_string(), error);
    self
  }

  pub fn fail_transition(mut self, key: &str, target: WorkflowState, error: TrackerError) -> Self {
    self.transition_failures.insert((key.to_string(), target), error);
    self
  }

  /// Pretend the caller already logged work on `key`
  pub fn with_existing_worklog(mut self, key: &str) -> Self {
    self.existing_worklogs.insert(key.to_string());
    self
  }

  pub fn fail_worklog_lookup(mut self, key: &str, error: TrackerError) -> Self {
    self.worklog_lookup_failures.insert(key.to_string(), error);
    self
  }

  pub fn fail_worklog(mut self, key: &str, error: TrackerError) -> Self {
    self.worklog_failures.insert(key.to_string(), error);
    self
  }

  /// Every call made so far, in order
  pub fn calls(&self) -> Vec<TrackerCall> {
    self.calls.lock().expect("tracker call log poisoned").clone()
  }

  /// Number of calls that would have changed the tracker
  pub fn mutation_count(&self) -> usize {
    self.calls().iter().filter(|call| call.is_mutation()).count()
  }

  /// Calls made for one subtask key
  pub fn calls_for(&self, key: &str) -> Vec<TrackerCall> {
    self
      .calls()
      .into_iter()
      .filter(|call| match call {
        TrackerCall::GetSubtask(k)
        | TrackerCall::Transition(k, _)
        | TrackerCall::HasWorklog(k)
        | TrackerCall::AddWorklog(k, _) => k == key,
        TrackerCall::CurrentUser | TrackerCall::ListSubtasks(_) => false,
      })
      .collect()
  }

  fn record(&self, call: TrackerCall) {
    self.calls.lock().expect("tracker call log poisoned").push(call);
  }
}

impl IssueTracker for RecordingTracker {
  async fn current_user(&self, _token: &AccessToken) -> Result<UserIdentity, TrackerError> {
    self.record(TrackerCall::CurrentUser);
    self.identity.clone()
  }

  async fn list_subtasks(&self, story_key: &str, _token: &AccessToken) -> Result<Vec<Subtask>, TrackerError> {
    self.record(TrackerCall::ListSubtasks(story_key.to_string()));
    if let Some(error) = &self.list_failure {
      return Err(error.clone());
    }

    // Subtasks embedded in a story carry no assignee.
    Ok(
      self
        .subtasks
        .iter()
        .map(|subtask| Subtask {
          assignee: None,
          ..subtask.clone()
        })
        .collect(),
    )
  }

  async fn get_subtask(&self, key: &str, _token: &AccessToken) -> Result<Subtask, TrackerError> {
    self.record(TrackerCall::GetSubtask(key.to_string()));
    if let Some(error) = self.get_failures.get(key) {
      return Err(error.clone());
    }

    self
      .subtasks
      .iter()
      .find(|subtask| subtask.key == key)
      .cloned()
      .ok_or_else(|| TrackerError::NotFound(key.to_string()))
  }

  async fn transition(&self, key: &str, target: WorkflowState, _token: &AccessToken) -> Result<(), TrackerError> {
    self.record(TrackerCall::Transition(key.to_string(), target));
    match self.transition_failures.get(&(key.to_string(), target)) {
      Some(error) => Err(error.clone()),
      None => Ok(()),
    }
  }

  async fn has_worklog_by(&self, key: &str, _user: &UserIdentity, _token: &AccessToken) -> Result<bool, TrackerError> {
    self.record(TrackerCall::HasWorklog(key.to_string()));
    match self.worklog_lookup_failures.get(key) {
      Some(error) => Err(error.clone()),
      None => Ok(self.existing_worklogs.contains(key)),
    }
  }

  async fn add_worklog(&self, key: &str, time_spent: &str, _token: &AccessToken) -> Result<(), TrackerError> {
    self.record(TrackerCall::AddWorklog(key.to_string(), time_spent.to_string()));
    match self.worklog_failures.get(key) {
      Some(error) => Err(error.clone()),
      None => Ok(()),
    }
  }
}
