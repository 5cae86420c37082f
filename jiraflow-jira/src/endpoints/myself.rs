//! The `/myself` endpoint, resolving who a token belongs to.

use jiraflow_core::{AccessToken, TrackerError};
use reqwest::StatusCode;

use crate::client::{JiraClient, decode, status_error};
use crate::models::JiraUser;

impl JiraClient {
  /// Get the user the token authenticates as
  pub async fn get_myself(&self, token: &AccessToken) -> Result<JiraUser, TrackerError> {
    let request = self.client.get(self.api_url("/myself"));
    let response = self.send(request, token).await?;

    match response.status() {
      StatusCode::OK => decode(response, "user").await,
      _ => Err(status_error(response, "myself").await),
    }
  }
}

#[cfg(test)]
mod tests {
  use jiraflow_core::{AccessToken, TrackerError};
  use wiremock::matchers::{header, method, path};
  use wiremock::{Mock, MockServer, ResponseTemplate};

  use crate::client::create_jira_client;

  #[tokio::test]
  async fn test_get_myself() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), 5)?;

    Mock::given(method("GET"))
      .and(path("/rest/api/2/myself"))
      .and(header("Authorization", "Bearer test-pat"))
      .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
          "name": "testuser",
          "key": "JIRAUSER10100",
          "displayName": "Test User",
          "emailAddress": "test@example.com"
      })))
      .mount(&mock_server)
      .await;

    let user = client.get_myself(&AccessToken::new("test-pat")?).await?;
    assert_eq!(user.name.as_deref(), Some("testuser"));
    assert_eq!(user.display_name.as_deref(), Some("Test User"));
    assert_eq!(user.email_address.as_deref(), Some("test@example.com"));

    Ok(())
  }

  #[tokio::test]
  async fn test_get_myself_unauthorized() -> anyhow::Result<()> {
    let mock_server = MockServer::start().await;
    let client = create_jira_client(&mock_server.uri(), 5)?;

    Mock::given(method("GET"))
      .and(path("/rest/api/2/myself"))
      .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
          "errorMessages": ["Authentication failed"],
          "errors": {}
      })))
      .mount(&mock_server)
      .await;

    let result = client.get_myself(&AccessToken::new("invalid-pat")?).await;
    assert_eq!(result.unwrap_err(), TrackerError::Authentication);

    Ok(())
  }
}
