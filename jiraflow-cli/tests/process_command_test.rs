//! The process command's run against a mocked Jira server.

use jiraflow_cli::cli::health::check_connection;
use jiraflow_cli::cli::process::{run_process, setup_error};
use jiraflow_cli::render::{error_json, report_json};
use jiraflow_core::{AccessToken, AppConfig, ErrorKind};
use jiraflow_jira::create_jira_client;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(mock_server: &MockServer, worklog_time: &str) -> anyhow::Result<AppConfig> {
  let host = mock_server.uri();
  let worklog_time = worklog_time.to_string();
  AppConfig::load_with(None, move |name: &str| match name {
    "JIRA_HOST" => Some(host.clone()),
    "JIRAFLOW_WORKLOG_TIME" => Some(worklog_time.clone()),
    _ => None,
  })
}

#[tokio::test]
async fn test_run_process_logs_configured_work_time() -> anyhow::Result<()> {
  let mock_server = MockServer::start().await;
  let config = config_for(&mock_server, "1h 30m")?;
  let client = create_jira_client(&config.jira_host, config.request_timeout_secs)?;

  Mock::given(method("GET"))
    .and(path("/rest/api/2/issue/PROJ-123"))
    .and(query_param("fields", "subtasks"))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "id": "10000",
        "key": "PROJ-123",
        "fields": {
            "subtasks": [
                { "id": "10001", "key": "PROJ-124", "fields": { "status": { "name": "In Progress." } } }
            ]
        }
    })))
    .mount(&mock_server)
    .await;

  Mock::given(method("GET"))
    .and(path("/rest/api/2/myself"))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "name": "testuser" })))
    .mount(&mock_server)
    .await;

  Mock::given(method("GET"))
    .and(path("/rest/api/2/issue/PROJ-124"))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "id": "10001",
        "key": "PROJ-124",
        "fields": {
            "summary": "Dev Testing",
            "status": { "name": "In Progress." },
            "assignee": { "name": "testuser" }
        }
    })))
    .mount(&mock_server)
    .await;

  Mock::given(method("GET"))
    .and(path("/rest/api/2/issue/PROJ-124/transitions"))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "transitions": [ { "id": "21", "name": "Completed" } ]
    })))
    .mount(&mock_server)
    .await;

  Mock::given(method("POST"))
    .and(path("/rest/api/2/issue/PROJ-124/transitions"))
    .respond_with(ResponseTemplate::new(204))
    .expect(1)
    .mount(&mock_server)
    .await;

  Mock::given(method("GET"))
    .and(path("/rest/api/2/issue/PROJ-124/worklog"))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "worklogs": [] })))
    .mount(&mock_server)
    .await;

  Mock::given(method("POST"))
    .and(path("/rest/api/2/issue/PROJ-124/worklog"))
    .and(body_json(serde_json::json!({ "timeSpent": "1h 30m" })))
    .respond_with(ResponseTemplate::new(201))
    .expect(1)
    .mount(&mock_server)
    .await;

  let report = run_process(&client, &config, "PROJ-123", "test-pat\n").await?;
  let json: serde_json::Value = serde_json::from_str(&report_json(&report)?)?;

  assert_eq!(json["success"], true);
  assert_eq!(json["results"][0]["status"], "success");
  assert_eq!(json["results"][0]["current_status"], "In Progress.");
  assert_eq!(
    json["results"][0]["actions"],
    serde_json::json!(["Moved to Completed", "Logged 1h 30m work"])
  );
  assert_eq!(json["summary"]["processed"], 1);

  Ok(())
}

#[tokio::test]
async fn test_run_process_blank_token_is_validation_error() -> anyhow::Result<()> {
  let mock_server = MockServer::start().await;
  let config = config_for(&mock_server, "2h")?;
  let client = create_jira_client(&config.jira_host, config.request_timeout_secs)?;

  let error = run_process(&client, &config, "PROJ-123", "   ").await.unwrap_err();

  assert_eq!(error.kind(), ErrorKind::ValidationError);
  assert_eq!(error.to_string(), "Jira PAT is required");
  assert!(mock_server.received_requests().await.unwrap_or_default().is_empty());

  let json: serde_json::Value = serde_json::from_str(&error_json(&error)?)?;
  assert_eq!(json["success"], false);
  assert_eq!(json["error_kind"], "ValidationError");

  Ok(())
}

#[tokio::test]
async fn test_run_process_unreachable_jira() -> anyhow::Result<()> {
  let config = AppConfig::load_with(None, |name: &str| {
    (name == "JIRA_HOST").then(|| "http://127.0.0.1:9".to_string())
  })?;
  let client = create_jira_client(&config.jira_host, 5)?;

  let error = run_process(&client, &config, "PROJ-123", "test-pat").await.unwrap_err();

  assert_eq!(error.kind(), ErrorKind::UpstreamUnavailableError);
  assert!(!error.to_string().contains("test-pat"));

  Ok(())
}

#[tokio::test]
async fn test_check_connection() -> anyhow::Result<()> {
  let mock_server = MockServer::start().await;
  let client = create_jira_client(&mock_server.uri(), 5)?;

  Mock::given(method("GET"))
    .and(path("/rest/api/2/myself"))
    .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
        "name": "testuser",
        "displayName": "Test User"
    })))
    .mount(&mock_server)
    .await;

  let token = AccessToken::new("test-pat")?;
  assert_eq!(check_connection(&client, &token).await?, Some("testuser".to_string()));

  Ok(())
}

#[tokio::test]
async fn test_check_connection_rejected_token() -> anyhow::Result<()> {
  let mock_server = MockServer::start().await;
  let client = create_jira_client(&mock_server.uri(), 5)?;

  Mock::given(method("GET"))
    .and(path("/rest/api/2/myself"))
    .respond_with(ResponseTemplate::new(401))
    .mount(&mock_server)
    .await;

  let token = AccessToken::new("bad-pat")?;
  assert_eq!(check_connection(&client, &token).await?, None);

  Ok(())
}

#[test]
fn test_missing_host_renders_validation_error_body() -> anyhow::Result<()> {
  let Err(load_error) = AppConfig::load_with(None, |_| None) else {
    anyhow::bail!("configuration without JIRA_HOST should not load");
  };

  let error = setup_error(load_error);
  assert_eq!(error.kind(), ErrorKind::ValidationError);

  let json: serde_json::Value = serde_json::from_str(&error_json(&error)?)?;
  assert_eq!(json["success"], false);
  assert_eq!(json["error_kind"], "ValidationError");
  assert!(json["error"].as_str().unwrap_or_default().contains("JIRA_HOST is required"));
  Ok(())
}
