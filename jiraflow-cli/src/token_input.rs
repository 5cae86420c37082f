//! # Token Acquisition
//!
//! The Jira PAT is never accepted as a positional argument or plain flag, so
//! it stays out of process listings and shell history. Sources, in order:
//! one line on stdin (`--token-stdin`), the `JIRA_PAT` environment variable,
//! then a hidden interactive prompt.

use std::io::{self, BufRead, IsTerminal};

use anyhow::{Context, Result};
use dialoguer::Password;
use tracing::debug;

use crate::consts::{ENV_JIRA_PAT, TOKEN_PROMPT};

/// Where the token came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenSource {
  Stdin,
  Environment,
  Prompt,
  /// No source was available; the token is blank
  None,
}

/// Read the raw token text. A blank result is rejected later, when the token
/// is validated.
pub fn acquire_token(token_stdin: bool) -> Result<(String, TokenSource)> {
  if token_stdin {
    let token = read_token_line(io::stdin().lock())?;
    return Ok((token, TokenSource::Stdin));
  }

  if let Some(token) = token_from_env(|name| std::env::var(name).ok()) {
    debug!("Using Jira PAT from {ENV_JIRA_PAT}");
    return Ok((token, TokenSource::Environment));
  }

  if !io::stdin().is_terminal() {
    return Ok((String::new(), TokenSource::None));
  }

  let token = Password::new()
    .with_prompt(TOKEN_PROMPT)
    .allow_empty_password(true)
    .interact()
    .context("Failed to read Jira PAT")?;
  Ok((token, TokenSource::Prompt))
}

/// Read the first line of `reader`, without its line ending
pub fn read_token_line(mut reader: impl BufRead) -> Result<String> {
  let mut line = String::new();
  reader
    .read_line(&mut line)
    .context("Failed to read Jira PAT from stdin")?;
  Ok(line.trim().to_string())
}

/// A non-blank token from the environment
pub fn token_from_env(env: impl Fn(&str) -> Option<String>) -> Option<String> {
  env(ENV_JIRA_PAT).filter(|token| !token.trim().is_empty())
}

#[cfg(test)]
mod tests {
  use std::io::Cursor;

  use super::*;

  #[test]
  fn test_read_token_line_takes_first_line() {
    let input = Cursor::new("secret-pat\nsomething else\n");
    assert_eq!(read_token_line(input).unwrap(), "secret-pat");
  }

  #[test]
  fn test_read_token_line_handles_crlf_and_missing_newline() {
    assert_eq!(read_token_line(Cursor::new("secret-pat\r\n")).unwrap(), "secret-pat");
    assert_eq!(read_token_line(Cursor::new("secret-pat")).unwrap(), "secret-pat");
  }

  #[test]
  fn test_read_token_line_empty_input() {
    assert_eq!(read_token_line(Cursor::new("")).unwrap(), "");
  }

  #[test]
  fn test_token_from_env() {
    let set = |name: &str| (name == ENV_JIRA_PAT).then(|| "env-pat".to_string());
    assert_eq!(token_from_env(set), Some("env-pat".to_string()));

    let blank = |_: &str| Some("   ".to_string());
    assert_eq!(token_from_env(blank), None);

    let unset = |_: &str| None;
    assert_eq!(token_from_env(unset), None);
  }
}
