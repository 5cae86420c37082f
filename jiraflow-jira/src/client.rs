use std::time::Duration;

use anyhow::{Context, Result};
use jiraflow_core::{AccessToken, TrackerError};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use tracing::debug;

use crate::consts::{API_PREFIX, MAX_ERROR_BODY_CHARS, USER_AGENT};

/// Represents a Jira API client.
///
/// Holds no credentials: each request is authorised with the token passed to
/// it, so one client can serve independent runs concurrently.
#[derive(Debug, Clone)]
pub struct JiraClient {
  pub(crate) client: Client,
  pub(crate) base_url: String,
}

impl JiraClient {
  /// Create a new Jira client whose requests give up after `timeout`
  pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
    let client = Client::builder()
      .user_agent(USER_AGENT)
      .timeout(timeout)
      .build()
      .context("Failed to build HTTP client")?;

    Ok(Self {
      client,
      base_url: base_url.trim_end_matches('/').to_string(),
    })
  }

  pub fn base_url(&self) -> &str {
    &self.base_url
  }

  /// Full URL of a REST v2 endpoint
  pub(crate) fn api_url(&self, path: &str) -> String {
    format!("{}{API_PREFIX}{path}", self.base_url)
  }

  /// Send an authorised request, mapping transport failures
  pub(crate) async fn send(&self, request: RequestBuilder, token: &AccessToken) -> Result<Response, TrackerError> {
    let response = request
      .bearer_auth(token.expose())
      .send()
      .await
      .map_err(transport_error)?;
    debug!(status = %response.status(), url = %response.url(), "Jira response");
    Ok(response)
  }

  /// Test the Jira connection by fetching the current user
  pub async fn test_connection(&self, token: &AccessToken) -> Result<bool> {
    let request = self.client.get(self.api_url("/myself"));
    let response = self.send(request, token).await.context("Failed to connect to Jira")?;

    Ok(response.status().is_success())
  }
}

/// Create a Jira client from configuration values
pub fn create_jira_client(base_url: &str, timeout_secs: u64) -> Result<JiraClient> {
  JiraClient::new(base_url, Duration::from_secs(timeout_secs))
}

/// Map a non-success response for `issue_key` to a tracker error
pub(crate) async fn status_error(response: Response, issue_key: &str) -> TrackerError {
  let status = response.status();
  match status {
    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => TrackerError::Authentication,
    StatusCode::NOT_FOUND => TrackerError::NotFound(issue_key.to_string()),
    _ if status.is_server_error() => TrackerError::Unavailable(format!("HTTP {status}")),
    _ => TrackerError::Unexpected {
      status: status.as_u16(),
      body: truncate_body(&response.text().await.unwrap_or_default()),
    },
  }
}

/// Cut an error body down to `MAX_ERROR_BODY_CHARS`, marking the cut
fn truncate_body(body: &str) -> String {
  let body = body.trim();
  match body.char_indices().nth(MAX_ERROR_BODY_CHARS) {
    Some((end, _)) => format!("{}…", &body[..end]),
    None => body.to_string(),
  }
}

/// Decode a JSON body, treating garbage from the server as unavailability
pub(crate) async fn decode<T: serde::de::DeserializeOwned>(response: Response, what: &str) -> Result<T, TrackerError> {
  response
    .json::<T>()
    .await
    .map_err(|e| TrackerError::Unavailable(format!("Failed to parse Jira {what}: {e}")))
}

fn transport_error(error: reqwest::Error) -> TrackerError {
  if error.is_timeout() {
    TrackerError::Unavailable("request to Jira timed out".to_string())
  } else if error.is_connect() {
    TrackerError::Unavailable("could not connect to Jira".to_string())
  } else {
    TrackerError::Unavailable(error.without_url().to_string())
  }
}

#[cfg(test)]
mod tests {
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use super::*;

  fn token() -> AccessToken {
    AccessToken::new("test-pat").unwrap()
  }

  #[test]
  fn test_jira_client_creation() -> Result<()> {
    let client = create_jira_client("https://jira.example.com/", 30)?;

    assert_eq!(client.base_url(), "https://jira.example.com");
    assert_eq!(client.api_url("/myself"), "https://jira.example.com/rest/api/2/myself");
    Ok(())
  }

  #[tokio::test]
  async fn test_connection_sends_bearer_token() -> Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), 5)?;

    Mock::given(method("GET"))
      .and(path("/rest/api/2/myself"))
      .and(header("Authorization", "Bearer test-pat"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "name": "testuser",
          "displayName": "Test User"
      })))
      .expect(1)
      .mount(&mock_server)
      .await;

    assert!(client.test_connection(&token()).await?);
    Ok(())
  }

  #[tokio::test]
  async fn test_connection_rejected_token() -> Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), 5)?;

    Mock::given(method("GET"))
      .and(path("/rest/api/2/myself"))
      .respond_with(ResponseTemplate::new(401))
      .mount(&mock_server)
      .await;

    assert!(!client.test_connection(&token()).await?);
    Ok(())
  }

  #[tokio::test]
  async fn test_timeout_is_unavailable() -> Result<()> {
    let mock_server = MockServer::start().await;
    let client = JiraClient::new(&mock_server.uri(), Duration::from_millis(100))?;

    Mock::given(method("GET"))
      .and(path("/rest/api/2/myself"))
      .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
      .mount(&mock_server)
      .await;

    let error = client
      .send(client.client.get(client.api_url("/myself")), &token())
      .await
      .unwrap_err();
    assert_eq!(error, TrackerError::Unavailable("request to Jira timed out".to_string()));
    Ok(())
  }

  #[tokio::test]
  async fn test_unexpected_status_keeps_a_bounded_body() -> Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), 5)?;
    let page = format!("<html><body>{}</body></html>", "x".repeat(5000));

    Mock::given(method("GET"))
      .and(path("/rest/api/2/issue/PROJ-124"))
      .respond_with(ResponseTemplate::new(418).set_body_string(page))
      .mount(&mock_server)
      .await;

    let response = client
      .send(client.client.get(client.api_url("/issue/PROJ-124")), &token())
      .await?;
    match status_error(response, "PROJ-124").await {
      TrackerError::Unexpected { status, body } => {
        assert_eq!(status, 418);
        assert_eq!(body.chars().count(), MAX_ERROR_BODY_CHARS + 1);
        assert!(body.starts_with("<html><body>xxx"));
        assert!(body.ends_with('…'));
      }
      other => panic!("expected unexpected-status error, got {other:?}"),
    }
    Ok(())
  }

  #[test]
  fn test_short_body_is_kept_whole() {
    assert_eq!(truncate_body(" Bad request \n"), "Bad request");
    assert_eq!(truncate_body("ü".repeat(MAX_ERROR_BODY_CHARS).as_str()).chars().count(), MAX_ERROR_BODY_CHARS);
  }

  #[tokio::test]
  async fn test_unreachable_host_is_unavailable() -> Result<()> {
    // Nothing listens on port 9 (discard) locally.
    let client = create_jira_client("http://127.0.0.1:9", 5)?;

    let error = client
      .send(client.client.get(client.api_url("/myself")), &token())
      .await
      .unwrap_err();
    assert!(matches!(error, TrackerError::Unavailable(_)));
    assert!(!error.to_string().contains("test-pat"));
    Ok(())
  }
}
