//! Personal Access Token handling.
//!
//! The token only lives for a single run. It never implements `Display`, and
//! its `Debug` output is redacted so it cannot leak through logs or error
//! messages.

use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TokenError {
  #[error("Jira PAT is required")]
  Missing,
}

/// A caller-supplied Jira Personal Access Token
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
  /// Wrap a raw token, rejecting blank input
  pub fn new(raw: &str) -> Result<Self, TokenError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Err(TokenError::Missing);
    }
    Ok(Self(trimmed.to_string()))
  }

  /// The raw secret, for building the `Authorization` header only
  pub fn expose(&self) -> &str {
    &self.0
  }
}

impl fmt::Debug for AccessToken {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("AccessToken(<redacted>)")
  }
}
