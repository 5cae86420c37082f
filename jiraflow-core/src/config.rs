//! # Configuration Management
//!
//! Loads jiraflow settings from built-in defaults, an optional `config.toml`
//! in the platform config directory, and environment variables, in that order
//! of precedence. The Jira PAT is never part of the configuration.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::processor::DEFAULT_WORKLOG_TIME_SPENT;
use crate::url::{ensure_url_scheme, is_http_url};

/// Environment variable storing the Jira host
pub const ENV_JIRA_HOST: &str = "JIRA_HOST";
/// Environment variable overriding the amount of work logged per subtask
pub const ENV_WORKLOG_TIME: &str = "JIRAFLOW_WORKLOG_TIME";
/// Environment variable overriding the HTTP request timeout
pub const ENV_TIMEOUT_SECS: &str = "JIRAFLOW_TIMEOUT_SECS";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const MAX_TIMEOUT_SECS: u64 = 600;

static WORKLOG_TIME_PATTERN: LazyLock<Regex> =
  LazyLock::new(|| Regex::new(r"^\d+[wdhm]( \d+[wdhm])*$").expect("Failed to compile worklog time regex"));

/// Validation failures for a loaded configuration
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
  #[error("JIRA_HOST is required")]
  MissingHost,
  #[error("JIRA_HOST must start with http:// or https:// (got '{0}')")]
  UnsupportedScheme(String),
  #[error("Invalid request timeout '{0}': must be between 1 and 600 seconds")]
  InvalidTimeout(String),
  #[error("Invalid work-log time '{0}': expected Jira duration such as '2h' or '1h 30m'")]
  InvalidWorklogTime(String),
}

/// Values that may appear in `config.toml`
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FileConfig {
  pub jira_host: Option<String>,
  pub worklog_time_spent: Option<String>,
  pub request_timeout_secs: Option<u64>,
}

/// Fully resolved and validated settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
  /// Base URL of the Jira server, scheme included, no trailing slash
  pub jira_host: String,
  pub worklog_time_spent: String,
  pub request_timeout_secs: u64,
}

/// Token-free view of the configuration for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConfigSummary {
  pub jira_host: String,
  pub jira_pat_configured: bool,
  pub worklog_time_spent: String,
  pub request_timeout_secs: u64,
  pub config_file: Option<String>,
}

impl AppConfig {
  /// Load from the platform config file and the process environment
  pub fn load(dirs: &ConfigDirs) -> Result<Self> {
    Self::load_with(Some(&dirs.config_path()), |name| std::env::var(name).ok())
  }

  /// Load from an optional config file and an environment lookup
  pub fn load_with(config_path: Option<&Path>, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
    let file = match config_path {
      Some(path) => load_file_config(path)?,
      None => FileConfig::default(),
    };

    let jira_host = env(ENV_JIRA_HOST)
      .filter(|host| !host.trim().is_empty())
      .or(file.jira_host)
      .ok_or(ConfigError::MissingHost)?;

    let worklog_time_spent = env(ENV_WORKLOG_TIME)
      .or(file.worklog_time_spent)
      .unwrap_or_else(|| DEFAULT_WORKLOG_TIME_SPENT.to_string());

    let request_timeout_secs = match env(ENV_TIMEOUT_SECS) {
      Some(raw) => raw
        .trim()
        .parse::<u64>()
        .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?,
      None => file.request_timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
    };

    let config = Self {
      jira_host: ensure_url_scheme(&jira_host).context("Invalid Jira host")?,
      worklog_time_spent: worklog_time_spent.trim().to_string(),
      request_timeout_secs,
    };
    config.validate()?;

    Ok(config)
  }

  /// Check the resolved values
  pub fn validate(&self) -> Result<(), ConfigError> {
    if self.jira_host.is_empty() {
      return Err(ConfigError::MissingHost);
    }
    if !is_http_url(&self.jira_host) {
      return Err(ConfigError::UnsupportedScheme(self.jira_host.clone()));
    }
    if !(1..=MAX_TIMEOUT_SECS).contains(&self.request_timeout_secs) {
      return Err(ConfigError::InvalidTimeout(self.request_timeout_secs.to_string()));
    }
    if !WORKLOG_TIME_PATTERN.is_match(&self.worklog_time_spent) {
      return Err(ConfigError::InvalidWorklogTime(self.worklog_time_spent.clone()));
    }
    Ok(())
  }

  pub fn summary(&self, config_file: Option<&Path>) -> ConfigSummary {
    ConfigSummary {
      jira_host: self.jira_host.clone(),
      jira_pat_configured: false,
      worklog_time_spent: self.worklog_time_spent.clone(),
      request_timeout_secs: self.request_timeout_secs,
      config_file: config_file.map(|path| path.display().to_string()),
    }
  }
}

fn load_file_config(path: &Path) -> Result<FileConfig> {
  if !path.exists() {
    return Ok(FileConfig::default());
  }

  let content = fs::read_to_string(path).with_context(|| format!("Failed to read config from {}", path.display()))?;

  toml::from_str(&content).with_context(|| format!("Failed to parse config from {}", path.display()))
}

/// Platform configuration directory for jiraflow
#[derive(Debug, Clone)]
pub struct ConfigDirs {
  pub config_dir: PathBuf,
}

impl ConfigDirs {
  pub fn new() -> Result<Self> {
    let proj_dirs = ProjectDirs::from("", "", "jiraflow").context("Failed to determine project directories")?;

    Ok(Self {
      config_dir: proj_dirs.config_dir().to_path_buf(),
    })
  }

  pub fn config_dir(&self) -> &Path {
    &self.config_dir
  }

  /// Path to `config.toml`
  pub fn config_path(&self) -> PathBuf {
    self.config_dir.join("config.toml")
  }
}
