//! # Config Command
//!
//! Shows the resolved configuration without any credential.

use std::process::ExitCode;

use anyhow::Result;
use jiraflow_core::output::{print_error, print_header, print_info};
use jiraflow_core::{AppConfig, ConfigDirs};

use crate::consts::ENV_JIRA_PAT;
use crate::render::config_lines;
use crate::token_input::token_from_env;

pub(crate) fn handle_config_command() -> Result<ExitCode> {
  let dirs = ConfigDirs::new()?;
  let config_path = dirs.config_path();

  let config = match AppConfig::load(&dirs) {
    Ok(config) => config,
    Err(e) => {
      print_error(&format!("Invalid configuration: {e:#}"));
      print_info(&format!(
        "Set JIRA_HOST or add jira_host to {}",
        config_path.display()
      ));
      return Ok(ExitCode::FAILURE);
    }
  };

  let file = config_path.exists().then_some(config_path.as_path());
  let mut summary = config.summary(file);
  summary.jira_pat_configured = token_from_env(|name| std::env::var(name).ok()).is_some();

  print_header("jiraflow configuration");
  for line in config_lines(&summary) {
    println!("  {line}");
  }
  if !summary.jira_pat_configured {
    print_info(&format!(
      "{ENV_JIRA_PAT} is not set; the PAT will be requested when needed"
    ));
  }

  Ok(ExitCode::SUCCESS)
}
