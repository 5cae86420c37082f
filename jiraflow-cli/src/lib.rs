//! # jiraflow CLI Library
//!
//! Command definitions, token acquisition and result rendering for the
//! `jiraflow` binary.

pub mod cli;
pub mod consts;
pub mod render;
pub mod token_input;
