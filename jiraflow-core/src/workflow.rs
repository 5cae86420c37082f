//! # Workflow States
//!
//! The closed set of subtask workflow states and the ordered transition table
//! used to compute the minimal path to `Completed`.

use std::fmt;

/// A recognised subtask workflow state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WorkflowState {
  Open,
  InProgress,
  Completed,
  /// A terminal state other than `Completed` (Done, Closed, Resolved)
  Closed,
}

/// Edges of the subtask workflow, in the order they are walked.
///
/// Adding an intermediate state means inserting one edge here.
const TRANSITION_TABLE: &[(WorkflowState, WorkflowState)] = &[
  (WorkflowState::Open, WorkflowState::InProgress),
  (WorkflowState::InProgress, WorkflowState::Completed),
];

impl WorkflowState {
  /// Recognise a tracker status name.
  ///
  /// Matching ignores case, surrounding whitespace and a trailing period, so
  /// "In Progress." is the same state as "in progress".
  pub fn from_status_name(name: &str) -> Option<Self> {
    match normalize_status_name(name).as_str() {
      "open" | "to do" => Some(Self::Open),
      "in progress" => Some(Self::InProgress),
      "completed" => Some(Self::Completed),
      "done" | "closed" | "resolved" => Some(Self::Closed),
      _ => None,
    }
  }

  /// The status name used when asking the tracker for a transition
  pub const fn status_name(self) -> &'static str {
    match self {
      Self::Open => "Open",
      Self::InProgress => "In Progress",
      Self::Completed => "Completed",
      Self::Closed => "Closed",
    }
  }

  /// Whether no further transitions apply from this state
  pub const fn is_terminal(self) -> bool {
    matches!(self, Self::Completed | Self::Closed)
  }

  /// Whether a tracker status name refers to this state
  pub fn matches_status_name(self, name: &str) -> bool {
    Self::from_status_name(name) == Some(self)
  }

  /// The ordered transitions leading from this state to `Completed`.
  ///
  /// Empty for terminal states.
  pub fn path_to_completed(self) -> Vec<Transition> {
    let mut path = Vec::new();
    let mut current = self;

    while current != Self::Completed {
      match TRANSITION_TABLE.iter().find(|(from, _)| *from == current) {
        Some(&(from, to)) => {
          path.push(Transition { from, to });
          current = to;
        }
        None => return Vec::new(),
      }
    }

    path
  }
}

impl fmt::Display for WorkflowState {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.status_name())
  }
}

/// One edge of the workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
  pub from: WorkflowState,
  pub to: WorkflowState,
}

impl Transition {
  /// Human-readable action recorded once the transition succeeded
  pub fn action(&self) -> String {
    format!("Moved to {}", self.to)
  }
}

fn normalize_status_name(name: &str) -> String {
  name.trim().trim_end_matches('.').trim_end().to_lowercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_status_name_recognition() {
    assert_eq!(WorkflowState::from_status_name("Open"), Some(WorkflowState::Open));
    assert_eq!(WorkflowState::from_status_name("To Do"), Some(WorkflowState::Open));
    assert_eq!(
      WorkflowState::from_status_name("In Progress"),
      Some(WorkflowState::InProgress)
    );
    assert_eq!(
      WorkflowState::from_status_name("In Progress."),
      Some(WorkflowState::InProgress)
    );
    assert_eq!(
      WorkflowState::from_status_name("  completed "),
      Some(WorkflowState::Completed)
    );
    assert_eq!(WorkflowState::from_status_name("Done"), Some(WorkflowState::Closed));
    assert_eq!(WorkflowState::from_status_name("Resolved"), Some(WorkflowState::Closed));
    assert_eq!(WorkflowState::from_status_name("Blocked"), None);
    assert_eq!(WorkflowState::from_status_name(""), None);
  }

  #[test]
  fn test_path_from_open() {
    let path = WorkflowState::Open.path_to_completed();
    assert_eq!(
      path,
      vec![
        Transition {
          from: WorkflowState::Open,
          to: WorkflowState::InProgress,
        },
        Transition {
          from: WorkflowState::InProgress,
          to: WorkflowState::Completed,
        },
      ]
    );
  }

  #[test]
  fn test_path_from_in_progress() {
    let path = WorkflowState::InProgress.path_to_completed();
    assert_eq!(path.len(), 1);
    assert_eq!(path[0].to, WorkflowState::Completed);
  }

  #[test]
  fn test_terminal_states_have_no_path() {
    assert!(WorkflowState::Completed.path_to_completed().is_empty());
    assert!(WorkflowState::Closed.path_to_completed().is_empty());
    assert!(WorkflowState::Completed.is_terminal());
    assert!(WorkflowState::Closed.is_terminal());
    assert!(!WorkflowState::Open.is_terminal());
  }

  #[test]
  fn test_table_reaches_completed_from_every_non_terminal_state() {
    for state in [WorkflowState::Open, WorkflowState::InProgress] {
      let path = state.path_to_completed();
      assert_eq!(path.first().map(|t| t.from), Some(state));
      assert_eq!(path.last().map(|t| t.to), Some(WorkflowState::Completed));
      assert!(path.windows(2).all(|pair| pair[0].to == pair[1].from));
    }
  }

  #[test]
  fn test_transition_action() {
    let transition = Transition {
      from: WorkflowState::Open,
      to: WorkflowState::InProgress,
    };
    assert_eq!(transition.action(), "Moved to In Progress");
  }

  #[test]
  fn test_matches_status_name() {
    assert!(WorkflowState::InProgress.matches_status_name("IN PROGRESS."));
    assert!(!WorkflowState::Completed.matches_status_name("Done"));
  }
}
