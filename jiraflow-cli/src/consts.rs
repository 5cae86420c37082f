//! Constants for the jiraflow CLI

/// Environment variable holding the Jira Personal Access Token
pub const ENV_JIRA_PAT: &str = "JIRA_PAT";

/// Prompt shown when the token is read interactively
pub const TOKEN_PROMPT: &str = "Jira Personal Access Token";
