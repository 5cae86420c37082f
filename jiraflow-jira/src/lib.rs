//! # Jira API Client
//!
//! Jira REST API v2 integration used by jiraflow: reading a story's subtasks,
//! resolving the current user, moving issues through workflow transitions and
//! recording work logs. Every request is authenticated with the caller's
//! Personal Access Token.

mod client;
mod consts;
mod endpoints;
pub mod models;
mod tracker;

pub use client::{JiraClient, create_jira_client};
pub use models::{
  JiraIssue, JiraIssueFields, JiraIssueStatus, JiraSubtaskRef, JiraTransition, JiraTransitionTarget, JiraTransitions,
  JiraUser, JiraWorklog, JiraWorklogs, TransitionId, TransitionRequest, WorklogRequest,
};
