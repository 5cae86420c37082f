//! # Output Formatting
//!
//! Coloured, emoji-prefixed terminal messages and formatters for outcome
//! statuses.

use owo_colors::{OwoColorize, Stream, Style};

use crate::models::OutcomeStatus;

/// When coloured output is used
#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
  /// Enable colored output
  Always,
  /// Detect terminal support
  Auto,
  /// Disable colored output
  Never,
}

impl ColorMode {
  /// Apply the mode as the global colour override
  pub fn apply(self) {
    match self {
      Self::Always => owo_colors::set_override(true),
      Self::Never => owo_colors::set_override(false),
      Self::Auto => owo_colors::unset_override(),
    }
  }
}

/// An emoji by shortcode, or `default` when the shortcode is unknown
pub fn get_emoji_or_default(name: &str, default: &str) -> String {
  match emojis::get_by_shortcode(name) {
    Some(emoji) => emoji.to_string(),
    None => default.to_string(),
  }
}

/// Style `text` for `stream`, or leave it plain when that stream gets no
/// colour
pub fn paint(text: &str, stream: Stream, style: Style) -> String {
  text.if_supports_color(stream, |t| t.style(style)).to_string()
}

pub fn print_success(message: &str) {
  let check = get_emoji_or_default("check_mark", "✓");
  println!("{} {}", paint(&check, Stream::Stdout, Style::new().green().bold()), message);
}

#[allow(clippy::print_stderr)]
pub fn print_error(message: &str) {
  let cross = get_emoji_or_default("cross_mark", "✗");
  eprintln!("{} {}", paint(&cross, Stream::Stderr, Style::new().red().bold()), message);
}

pub fn print_warning(message: &str) {
  let warning = get_emoji_or_default("warning", "⚠");
  println!("{} {}", paint(&warning, Stream::Stdout, Style::new().yellow().bold()), message);
}

pub fn print_info(message: &str) {
  let info = get_emoji_or_default("information", "ℹ");
  println!("{} {}", paint(&info, Stream::Stdout, Style::new().blue().bold()), message);
}

pub fn print_header(header: &str) {
  println!("\n{}", paint(header, Stream::Stdout, Style::new().blue().bold()));
}

/// Colour an outcome status for table output
pub fn format_outcome_status(status: OutcomeStatus) -> String {
  match status {
    OutcomeStatus::Success => paint("success", Stream::Stdout, Style::new().green()),
    OutcomeStatus::Skipped => paint("skipped", Stream::Stdout, Style::new().yellow()),
    OutcomeStatus::Error => paint("error", Stream::Stdout, Style::new().red().bold()),
  }
}

/// Colour a subtask or story key
pub fn format_issue_key(key: &str) -> String {
  paint(key, Stream::Stdout, Style::new().bright_cyan().bold())
}
