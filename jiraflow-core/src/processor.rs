//! # Task Processor
//!
//! Runs the Process Tasks workflow for one story: list its subtasks, apply
//! the status policy to each one in tracker order, drive the required
//! transitions and the work-log entry, and collect one outcome per subtask.
//!
//! Only story-level problems (bad key, missing story, rejected token,
//! unreachable tracker) abort a run. A failure while handling one subtask is
//! recorded in that subtask's outcome and the run moves on.

use tracing::{debug, error, info, warn};

use crate::error::ProcessError;
use crate::models::{OutcomeStatus, RunReport, Subtask, TransitionOutcome, UserIdentity};
use crate::policy::{Decision, decide};
use crate::story_key::StoryKey;
use crate::token::AccessToken;
use crate::tracker::IssueTracker;
use crate::workflow::Transition;

/// Default amount of work logged against a completed subtask
pub const DEFAULT_WORKLOG_TIME_SPENT: &str = "2h";

pub const MESSAGE_PROCESSED: &str = "Processed successfully";
pub const ACTION_WORKLOG_EXISTS: &str = "Work already logged, skipped worklog";

/// Processes the subtasks of a story through their workflow
pub struct TaskProcessor<'a, T: IssueTracker> {
  tracker: &'a T,
  worklog_time_spent: String,
}

impl<'a, T: IssueTracker> TaskProcessor<'a, T> {
  pub fn new(tracker: &'a T) -> Self {
    Self {
      tracker,
      worklog_time_spent: DEFAULT_WORKLOG_TIME_SPENT.to_string(),
    }
  }

  /// Override the amount of work logged per subtask
  pub fn with_worklog_time_spent(mut self, time_spent: impl Into<String>) -> Self {
    self.worklog_time_spent = time_spent.into();
    self
  }

  /// Process every subtask of `story_key` on behalf of the token's owner
  pub async fn process_story(&self, story_key: &str, token: &AccessToken) -> Result<RunReport, ProcessError> {
    let story_key = StoryKey::parse(story_key)?;
    info!(story = %story_key, "Processing subtasks");

    let subtasks = self.tracker.list_subtasks(story_key.as_str(), token).await.map_err(|e| {
      error!(story = %story_key, "Failed to list subtasks: {e}");
      ProcessError::from(e)
    })?;
    info!(story = %story_key, count = subtasks.len(), "Found subtasks");

    if subtasks.is_empty() {
      return Ok(RunReport::new(Vec::new()));
    }

    let caller = self.tracker.current_user(token).await.map_err(|e| {
      error!("Failed to resolve current user: {e}");
      ProcessError::from(e)
    })?;
    debug!(user = %caller, "Resolved current user");

    let mut results = Vec::with_capacity(subtasks.len());
    for snapshot in &subtasks {
      results.push(self.process_subtask(snapshot, &caller, token).await);
    }

    let report = RunReport::new(results);
    info!(
      story = %story_key,
      total = report.summary.total,
      processed = report.summary.processed,
      skipped = report.summary.skipped,
      failed = report.summary.failed,
      "Processing complete"
    );

    Ok(report)
  }

  async fn process_subtask(&self, snapshot: &Subtask, caller: &UserIdentity, token: &AccessToken) -> TransitionOutcome {
    let subtask = match self.tracker.get_subtask(&snapshot.key, token).await {
      Ok(subtask) => subtask,
      Err(e) => {
        warn!(subtask = %snapshot.key, "Failed to fetch subtask: {e}");
        return outcome(
          snapshot,
          OutcomeStatus::Error,
          format!("Failed to fetch {}: {e}", snapshot.key),
          Vec::new(),
        );
      }
    };

    match decide(&subtask, caller) {
      Decision::Skip(reason) => {
        info!(subtask = %subtask.key, status = %subtask.status, "Skipping: {reason}");
        outcome(&subtask, OutcomeStatus::Skipped, reason.to_string(), Vec::new())
      }
      Decision::Advance(path) => self.advance(&subtask, &path, caller, token).await,
    }
  }

  /// Apply `path` in order, then log work. Stops at the first failure and
  /// keeps the actions that already succeeded.
  async fn advance(
    &self,
    subtask: &Subtask,
    path: &[Transition],
    caller: &UserIdentity,
    token: &AccessToken,
  ) -> TransitionOutcome {
    info!(subtask = %subtask.key, status = %subtask.status, steps = path.len(), "Advancing subtask");
    let mut actions = Vec::with_capacity(path.len() + 1);

    for step in path {
      if let Err(e) = self.tracker.transition(&subtask.key, step.to, token).await {
        warn!(subtask = %subtask.key, target = %step.to, "Transition failed: {e}");
        return outcome(
          subtask,
          OutcomeStatus::Error,
          format!("Failed to move to {}: {e}", step.to),
          actions,
        );
      }
      debug!(subtask = %subtask.key, target = %step.to, "Transitioned");
      actions.push(step.action());
    }

    match self.tracker.has_worklog_by(&subtask.key, caller, token).await {
      Ok(true) => {
        info!(subtask = %subtask.key, "Work already logged");
        actions.push(ACTION_WORKLOG_EXISTS.to_string());
      }
      Ok(false) => {
        if let Err(e) = self
          .tracker
          .add_worklog(&subtask.key, &self.worklog_time_spent, token)
          .await
        {
          warn!(subtask = %subtask.key, "Failed to log work: {e}");
          return outcome(subtask, OutcomeStatus::Error, format!("Failed to log work: {e}"), actions);
        }
        actions.push(format!("Logged {} work", self.worklog_time_spent));
      }
      Err(e) => {
        warn!(subtask = %subtask.key, "Failed to read work logs: {e}");
        return outcome(
          subtask,
          OutcomeStatus::Error,
          format!("Failed to check existing work logs: {e}"),
          actions,
        );
      }
    }

    info!(subtask = %subtask.key, "Processed successfully");
    outcome(subtask, OutcomeStatus::Success, MESSAGE_PROCESSED.to_string(), actions)
  }
}

fn outcome(subtask: &Subtask, status: OutcomeStatus, message: String, actions: Vec<String>) -> TransitionOutcome {
  TransitionOutcome {
    subtask_key: subtask.key.clone(),
    status,
    current_status: subtask.status.clone(),
    assignee: subtask.assignee.clone(),
    message,
    actions,
  }
}
