//! # Process Command
//!
//! Runs the subtask workflow for one story and renders the outcomes.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use jiraflow_core::output::{print_error, print_header, print_success, print_warning};
use jiraflow_core::{AccessToken, AppConfig, ConfigDirs, ProcessError, RunReport, StoryKey, TaskProcessor};
use jiraflow_jira::{JiraClient, create_jira_client};
use tokio::runtime::Runtime;
use tracing::debug;

use crate::render::{OutputFormat, error_json, outcome_table, report_json, summary_line};
use crate::token_input::acquire_token;

/// Arguments of the process command
#[derive(Args)]
pub struct ProcessArgs {
  /// The story whose subtasks are processed (e.g., PROJ-123)
  #[arg(required = true, index = 1)]
  pub story_key: String,

  /// Output format
  #[arg(long, short = 'f', value_name = "FORMAT", value_parser = ["text", "json"], default_value = "text")]
  pub format: String,

  /// Read the Jira PAT from the first line of stdin
  #[arg(long)]
  pub token_stdin: bool,
}

pub(crate) fn handle_process_command(args: ProcessArgs) -> Result<ExitCode> {
  let format = OutputFormat::from_arg(&args.format);

  // Reject a malformed key before asking for a token
  if let Err(e) = StoryKey::parse(&args.story_key) {
    return Ok(render_failure(&ProcessError::from(e), format));
  }

  let (config, raw_token, client) = match prepare_run(args.token_stdin) {
    Ok(prepared) => prepared,
    Err(e) => return Ok(render_failure(&e, format)),
  };
  let rt = Runtime::new().context("Failed to create async runtime")?;

  let result = rt.block_on(run_process(&client, &config, &args.story_key, &raw_token));

  match result {
    Ok(report) => render_report(&report, &args.story_key, format),
    Err(e) => Ok(render_failure(&e, format)),
  }
}

/// Load the configuration, acquire the token and build the client
fn prepare_run(token_stdin: bool) -> Result<(AppConfig, String, JiraClient), ProcessError> {
  let config = ConfigDirs::new()
    .and_then(|dirs| AppConfig::load(&dirs))
    .map_err(setup_error)?;
  let (raw_token, source) = acquire_token(token_stdin).map_err(setup_error)?;
  debug!(?source, "Acquired Jira PAT");

  let client = create_jira_client(&config.jira_host, config.request_timeout_secs).map_err(setup_error)?;
  Ok((config, raw_token, client))
}

/// A configuration or token-input failure, reported like any other invalid
/// input
pub fn setup_error(error: anyhow::Error) -> ProcessError {
  ProcessError::Validation(format!("{error:#}"))
}

/// Validate the token and process the story with the configured work-log
/// amount
pub async fn run_process(
  client: &JiraClient,
  config: &AppConfig,
  story_key: &str,
  raw_token: &str,
) -> Result<RunReport, ProcessError> {
  let token = AccessToken::new(raw_token)?;

  TaskProcessor::new(client)
    .with_worklog_time_spent(config.worklog_time_spent.as_str())
    .process_story(story_key, &token)
    .await
}

fn render_report(report: &RunReport, story_key: &str, format: OutputFormat) -> Result<ExitCode> {
  match format {
    OutputFormat::Json => {
      println!("{}", report_json(report).context("Failed to serialize results")?);
    }
    OutputFormat::Text => {
      print_header(&format!("Subtasks of {}", story_key.trim()));
      if report.results.is_empty() {
        println!("  No subtasks found");
      } else {
        println!("{}", outcome_table(&report.results));
      }
      println!("{}", summary_line(&report.summary));

      if report.summary.failed > 0 {
        print_warning(&format!(
          "{} subtask(s) could not be processed, see the messages above",
          report.summary.failed
        ));
      } else if report.summary.processed > 0 {
        print_success(&format!("Processed {} subtask(s)", report.summary.processed));
      }
    }
  }

  Ok(ExitCode::SUCCESS)
}

fn render_failure(error: &ProcessError, format: OutputFormat) -> ExitCode {
  match format {
    OutputFormat::Json => match error_json(error) {
      Ok(json) => println!("{json}"),
      Err(e) => print_error(&format!("Failed to serialize error: {e}")),
    },
    OutputFormat::Text => print_error(&format!("{}: {error}", error.kind().as_str())),
  }

  ExitCode::FAILURE
}
