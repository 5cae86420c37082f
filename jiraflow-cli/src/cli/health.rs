//! # Health Command
//!
//! Checks that Jira is reachable and that the PAT is accepted.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Args;
use jiraflow_core::output::{print_error, print_header, print_success};
use jiraflow_core::{AccessToken, AppConfig, ConfigDirs, IssueTracker, TrackerError};
use jiraflow_jira::{JiraClient, create_jira_client};
use tokio::runtime::Runtime;

use crate::render::config_lines;
use crate::token_input::acquire_token;

/// Arguments of the health command
#[derive(Args)]
pub struct HealthArgs {
  /// Read the Jira PAT from the first line of stdin
  #[arg(long)]
  pub token_stdin: bool,
}

pub(crate) fn handle_health_command(args: HealthArgs) -> Result<ExitCode> {
  let dirs = ConfigDirs::new()?;
  let config_path = dirs.config_path();
  let config = AppConfig::load(&dirs)?;

  let (raw_token, _) = acquire_token(args.token_stdin)?;
  let token = match AccessToken::new(&raw_token) {
    Ok(token) => token,
    Err(e) => {
      print_error(&e.to_string());
      return Ok(ExitCode::FAILURE);
    }
  };

  let mut summary = config.summary(config_path.exists().then_some(config_path.as_path()));
  summary.jira_pat_configured = true;
  print_header("jiraflow configuration");
  for line in config_lines(&summary) {
    println!("  {line}");
  }

  let client = create_jira_client(&config.jira_host, config.request_timeout_secs)?;
  let rt = Runtime::new().context("Failed to create async runtime")?;

  print_header("Jira connection");
  match rt.block_on(check_connection(&client, &token)) {
    Ok(Some(user)) => {
      print_success(&format!("Connected to {} as {user}", client.base_url()));
      Ok(ExitCode::SUCCESS)
    }
    Ok(None) => {
      print_error(&TrackerError::Authentication.to_string());
      Ok(ExitCode::FAILURE)
    }
    Err(e) => {
      print_error(&format!("Health check failed: {e:#}"));
      Ok(ExitCode::FAILURE)
    }
  }
}

/// Who the token belongs to, or `None` when Jira rejects it
pub async fn check_connection(client: &JiraClient, token: &AccessToken) -> Result<Option<String>> {
  if !client.test_connection(token).await? {
    return Ok(None);
  }

  let user = client.current_user(token).await?;
  Ok(Some(user.to_string()))
}
