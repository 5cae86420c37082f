//! # Command Line Interface
//!
//! Defines the CLI structure and command handlers for the jiraflow tool.

mod config;
pub mod health;
pub mod process;

use std::process::ExitCode;

use anyhow::Result;
use clap::builder::Styles;
use clap::builder::styling::AnsiColor;
use clap::{ArgAction, Parser, Subcommand};
use jiraflow_core::ColorMode;

/// Top-level CLI command for the jiraflow tool
#[derive(Parser)]
#[command(name = "jiraflow")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(about = "Advance your assigned Jira subtasks and log work")]
#[command(
  long_about = "jiraflow walks the subtasks of a Jira story and moves every subtask assigned\n\
        to you through Open -> In Progress -> Completed, logging work on each one it\n\
        completes. Subtasks assigned to others, already completed, or in an unknown\n\
        status are skipped and reported."
)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(propagate_version = true)]
#[command(subcommand_required(true))]
#[command(disable_help_subcommand = true)]
#[command(max_term_width = 120)]
#[command(styles = Styles::styled()
    .header(AnsiColor::BrightBlue.on_default().bold().underline())
    .usage(AnsiColor::Blue.on_default().bold())
    .literal(AnsiColor::BrightBlue.on_default().bold())
    .placeholder(AnsiColor::BrightWhite.on_default().italic())
    .valid(AnsiColor::Green.on_default())
    .invalid(AnsiColor::BrightRed.on_default().bold())
)]
pub struct Cli {
  /// Sets the level of verbosity (can be used multiple times)
  #[arg(
    short = 'v',
    long = "verbose",
    action = ArgAction::Count,
    global = true,
    long_help = "Sets the level of verbosity for tracing and logging output.\n\n\
             -v: Show info level messages\n\
             -vv: Show debug level messages\n\
             -vvv: Show trace level messages"
  )]
  pub verbose: u8,

  /// Controls when colored output is used
  #[arg(
    long,
    value_enum,
    global = true,
    ignore_case = true,
    default_value_t = ColorMode::Auto,
  )]
  pub colors: ColorMode,

  /// Subcommands
  #[command(subcommand)]
  pub command: Commands,
}

/// Subcommands for the jiraflow tool
#[derive(Subcommand)]
pub enum Commands {
  /// Process the subtasks of a story
  #[command(long_about = "Process every subtask of a Jira story on your behalf.\n\n\
            Each subtask assigned to you moves along the shortest path to Completed,\n\
            then work is logged against it unless you already logged some. Failures on\n\
            one subtask are reported and the remaining subtasks are still processed.\n\n\
            The Jira PAT is read from stdin with --token-stdin, else from JIRA_PAT,\n\
            else from a hidden prompt.")]
  #[command(alias = "p")]
  Process(process::ProcessArgs),

  /// Show the current configuration
  #[command(long_about = "Show the resolved configuration.\n\n\
            Settings come from config.toml in the platform config directory and are\n\
            overridden by JIRA_HOST, JIRAFLOW_WORKLOG_TIME and JIRAFLOW_TIMEOUT_SECS.\n\
            The Jira PAT is never shown.")]
  Config,

  /// Check connectivity to Jira and validity of the PAT
  #[command(long_about = "Check that Jira is reachable and that the PAT is accepted.\n\n\
            Prints the configuration summary, then asks Jira who the token belongs to.")]
  Health(health::HealthArgs),
}

/// Handle the parsed command line
pub fn handle_cli(cli: Cli) -> Result<ExitCode> {
  cli.colors.apply();

  match cli.command {
    Commands::Process(args) => process::handle_process_command(args),
    Commands::Config => config::handle_config_command(),
    Commands::Health(args) => health::handle_health_command(args),
  }
}
