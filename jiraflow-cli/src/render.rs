//! # Result Rendering
//!
//! Text tables and JSON documents for processing runs and configuration.

use jiraflow_core::output::{format_issue_key, format_outcome_status};
use jiraflow_core::{ConfigSummary, ErrorKind, ProcessError, RunReport, RunSummary, TransitionOutcome};
use owo_colors::{OwoColorize, Stream};
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

/// Output format of the `process` command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
  Text,
  Json,
}

impl OutputFormat {
  /// Parse a `--format` value; anything but `json` renders text
  pub fn from_arg(value: &str) -> Self {
    match value {
      "json" => Self::Json,
      _ => Self::Text,
    }
  }
}

/// JSON body of a completed run
#[derive(Debug, Serialize)]
pub struct ProcessResponse<'a> {
  pub success: bool,
  pub results: &'a [TransitionOutcome],
  pub summary: RunSummary,
}

/// JSON body of a run aborted by a story-level failure
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
  pub success: bool,
  pub error: String,
  pub error_kind: ErrorKind,
}

impl<'a> From<&'a RunReport> for ProcessResponse<'a> {
  fn from(report: &'a RunReport) -> Self {
    Self {
      success: true,
      results: &report.results,
      summary: report.summary,
    }
  }
}

impl From<&ProcessError> for ErrorResponse {
  fn from(error: &ProcessError) -> Self {
    Self {
      success: false,
      error: error.to_string(),
      error_kind: error.kind(),
    }
  }
}

pub fn report_json(report: &RunReport) -> serde_json::Result<String> {
  serde_json::to_string_pretty(&ProcessResponse::from(report))
}

pub fn error_json(error: &ProcessError) -> serde_json::Result<String> {
  serde_json::to_string_pretty(&ErrorResponse::from(error))
}

#[derive(Tabled)]
struct OutcomeRow {
  #[tabled(rename = "Subtask")]
  key: String,
  #[tabled(rename = "Status")]
  current_status: String,
  #[tabled(rename = "Assignee")]
  assignee: String,
  #[tabled(rename = "Outcome")]
  outcome: String,
  #[tabled(rename = "Message")]
  message: String,
  #[tabled(rename = "Actions")]
  actions: String,
}

/// One row per subtask, in processing order
pub fn outcome_table(results: &[TransitionOutcome]) -> String {
  let rows: Vec<OutcomeRow> = results
    .iter()
    .map(|outcome| OutcomeRow {
      key: format_issue_key(&outcome.subtask_key),
      current_status: outcome.current_status.clone(),
      assignee: outcome
        .assignee
        .as_ref()
        .map(|user| user.to_string())
        .unwrap_or_else(|| "Unassigned".to_string()),
      outcome: format_outcome_status(outcome.status),
      message: outcome.message.clone(),
      actions: if outcome.actions.is_empty() {
        "-".to_string()
      } else {
        outcome.actions.join("\n")
      },
    })
    .collect();

  Table::new(rows).with(Style::sharp()).to_string()
}

pub fn summary_line(summary: &RunSummary) -> String {
  format!(
    "Total: {} | Processed: {} | Skipped: {} | Failed: {}",
    summary.total,
    summary.processed.if_supports_color(Stream::Stdout, |n| n.green()),
    summary.skipped.if_supports_color(Stream::Stdout, |n| n.yellow()),
    summary.failed.if_supports_color(Stream::Stdout, |n| n.red())
  )
}

/// Key/value listing of the configuration
pub fn config_lines(summary: &ConfigSummary) -> Vec<String> {
  vec![
    format!("Jira host:        {}", summary.jira_host),
    format!(
      "Jira PAT:         {}",
      if summary.jira_pat_configured {
        "provided"
      } else {
        "not provided"
      }
    ),
    format!("Work-log time:    {}", summary.worklog_time_spent),
    format!("Request timeout:  {}s", summary.request_timeout_secs),
    format!(
      "Config file:      {}",
      summary.config_file.as_deref().unwrap_or("(none)")
    ),
  ]
}
