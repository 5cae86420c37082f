//! # Jira API Endpoints
//!
//! Endpoint implementations grouped by Jira resource: issues, the current
//! user, workflow transitions and work logs.

pub mod issues;
pub mod myself;
pub mod transitions;
pub mod worklogs;
