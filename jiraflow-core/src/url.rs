//! Jira host URL normalisation.

use anyhow::Result;
use url::{Position, Url};

/// Normalise a configured Jira host into a base URL.
///
/// A missing scheme defaults to `https://`, malformed `http:/host` forms are
/// repaired, and a bare trailing `/` is dropped so endpoint paths can be
/// appended directly.
pub fn ensure_url_scheme(input: &str) -> Result<String> {
  let trimmed = input.trim();
  if trimmed.is_empty() {
    return Err(anyhow::anyhow!("Host cannot be empty"));
  }

  let lowered = trimmed.to_ascii_lowercase();
  for scheme in ["http", "https"] {
    let prefix = format!("{scheme}:");
    if lowered.starts_with(&prefix) && !lowered.starts_with(&format!("{scheme}://")) {
      let remainder = trimmed[prefix.len()..].trim_start_matches('/');
      return parse_with_scheme(scheme, remainder).map(|url| strip_root_path(&url));
    }
  }

  let url = match Url::parse(trimmed) {
    Ok(url) if url.host().is_some() => url,
    _ => parse_with_scheme("https", trimmed)?,
  };

  Ok(strip_root_path(&url))
}

/// Whether a base URL uses http or https
pub fn is_http_url(base_url: &str) -> bool {
  Url::parse(base_url)
    .map(|url| matches!(url.scheme(), "http" | "https"))
    .unwrap_or(false)
}

fn parse_with_scheme(scheme: &str, host: &str) -> Result<Url> {
  Url::parse(&format!("{scheme}://{host}"))
    .map_err(|e| anyhow::anyhow!("Failed to parse URL: '{host}' ({e}). Ensure it is a valid host."))
}

fn strip_root_path(url: &Url) -> String {
  let mut result = url[..Position::BeforePath].to_string();

  let path = url.path().trim_end_matches('/');
  result.push_str(path);

  if let Some(query) = url.query() {
    result.push('?');
    result.push_str(query);
  }

  result
}
