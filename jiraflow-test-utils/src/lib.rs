//! Test utilities shared across the jiraflow workspace
//!
//! This crate provides common testing infrastructure including:
//! - Environment variable isolation ([`EnvVarGuard`])
//! - An isolated config home ([`ConfigHomeGuard`])
//! - A scripted, call-recording issue tracker ([`RecordingTracker`])
//!
//! The dead_code lint is disabled for this crate because test utilities may
//! not be used by all tests, and the compiler cannot detect usage across crate
//! boundaries in development dependencies.

#![allow(dead_code)]

pub mod env;
pub mod tracker;

pub use env::{ConfigHomeGuard, EnvVarGuard};
pub use tracker::{RecordingTracker, TrackerCall};
