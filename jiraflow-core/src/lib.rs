//! # jiraflow Core Library
//!
//! Domain logic for advancing a story's subtasks through their workflow:
//! story key and token validation, the workflow transition table, the status
//! policy, the task processor, and the tracker trait it drives. Also holds
//! configuration loading and terminal output helpers shared by the CLI.

pub mod config;
pub mod error;
pub mod models;
pub mod output;
pub mod policy;
pub mod processor;
pub mod story_key;
pub mod token;
pub mod tracker;
pub mod url;
pub mod workflow;

pub use config::{AppConfig, ConfigDirs, ConfigSummary};
pub use error::{ErrorKind, ProcessError};
pub use models::{OutcomeStatus, RunReport, RunSummary, Subtask, TransitionOutcome, UserIdentity};
pub use output::{ColorMode, print_error, print_info, print_success, print_warning};
pub use policy::{Decision, SkipReason, decide};
pub use processor::TaskProcessor;
pub use story_key::{StoryKey, StoryKeyError};
pub use token::{AccessToken, TokenError};
pub use tracker::{IssueTracker, TrackerError};
pub use workflow::{Transition, WorkflowState};
