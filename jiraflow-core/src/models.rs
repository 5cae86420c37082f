//! # Run Models
//!
//! Subtask snapshots read from the tracker and the per-subtask outcomes and
//! summary produced by one processing run. Outcomes serialize to the JSON
//! shape the front end renders.

use serde::Serialize;

/// Identity of a tracker user (login name, falling back to user key)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserIdentity(String);

impl UserIdentity {
  pub fn new(name: impl Into<String>) -> Self {
    Self(name.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl std::fmt::Display for UserIdentity {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(&self.0)
  }
}

/// Read-only snapshot of one subtask for the duration of a run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subtask {
  pub key: String,
  /// Status name exactly as the tracker reports it
  pub status: String,
  pub assignee: Option<UserIdentity>,
  pub summary: String,
}

/// Outcome status of one subtask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutcomeStatus {
  Success,
  Skipped,
  Error,
}

/// The result of processing one subtask. Created once, never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransitionOutcome {
  pub subtask_key: String,
  pub status: OutcomeStatus,
  /// Status observed before processing
  pub current_status: String,
  pub assignee: Option<UserIdentity>,
  pub message: String,
  /// Actions actually performed, in order
  pub actions: Vec<String>,
}

/// Aggregate counts over one run.
///
/// `total == processed + skipped + failed` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
  pub total: usize,
  pub processed: usize,
  pub skipped: usize,
  pub failed: usize,
}

impl RunSummary {
  /// Tally a list of outcomes
  pub fn from_outcomes(outcomes: &[TransitionOutcome]) -> Self {
    outcomes.iter().fold(
      Self {
        total: outcomes.len(),
        ..Self::default()
      },
      |mut summary, outcome| {
        match outcome.status {
          OutcomeStatus::Success => summary.processed += 1,
          OutcomeStatus::Skipped => summary.skipped += 1,
          OutcomeStatus::Error => summary.failed += 1,
        }
        summary
      },
    )
  }
}

/// Everything a successful run hands back to the front end
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunReport {
  pub results: Vec<TransitionOutcome>,
  pub summary: RunSummary,
}

impl RunReport {
  pub fn new(results: Vec<TransitionOutcome>) -> Self {
    let summary = RunSummary::from_outcomes(&results);
    Self { results, summary }
  }
}
