//! # Status Policy
//!
//! Decides, without side effects, what should happen to one subtask: skip it
//! with a reason, or advance it along the minimal path to `Completed`.

use std::fmt;

use crate::models::{Subtask, UserIdentity};
use crate::workflow::{Transition, WorkflowState};

/// Why a subtask is left untouched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
  NotAssignedToMe,
  AlreadyCompleted,
  UnrecognizedStatus,
}

impl SkipReason {
  pub const fn message(self) -> &'static str {
    match self {
      Self::NotAssignedToMe => "not assigned to me",
      Self::AlreadyCompleted => "already completed",
      Self::UnrecognizedStatus => "unrecognized status",
    }
  }
}

impl fmt::Display for SkipReason {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.message())
  }
}

/// The policy's verdict for one subtask
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
  Skip(SkipReason),
  /// Non-empty, ordered transitions ending at `Completed`
  Advance(Vec<Transition>),
}

/// Decide what to do with a subtask on behalf of `caller`.
///
/// The assignee check runs before the status is looked at.
pub fn decide(subtask: &Subtask, caller: &UserIdentity) -> Decision {
  if subtask.assignee.as_ref() != Some(caller) {
    return Decision::Skip(SkipReason::NotAssignedToMe);
  }

  let Some(state) = WorkflowState::from_status_name(&subtask.status) else {
    return Decision::Skip(SkipReason::UnrecognizedStatus);
  };

  if state.is_terminal() {
    Decision::Skip(SkipReason::AlreadyCompleted)
  } else {
    Decision::Advance(state.path_to_completed())
  }
}
