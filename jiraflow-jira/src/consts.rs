//! Constants for the jiraflow Jira client.

/// User-Agent header value for the Jira API client
pub const USER_AGENT: &str = concat!("jiraflow/", env!("CARGO_PKG_VERSION"));

/// Prefix of every Jira REST v2 endpoint
pub const API_PREFIX: &str = "/rest/api/2";

/// Most characters of an unexpected response body kept in an error message
pub const MAX_ERROR_BODY_CHARS: usize = 200;
