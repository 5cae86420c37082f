//! Environment variable management for testing
//!
//! Guards that override process environment variables for the duration of a
//! test and restore the original values when dropped.

use std::env;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Overrides a single environment variable, restoring it on drop
pub struct EnvVarGuard {
  name: String,
  original: Option<String>,
}

impl EnvVarGuard {
  /// Remember the current value of `name` without changing it
  pub fn new(name: &str) -> Self {
    Self {
      name: name.to_string(),
      original: env::var(name).ok(),
    }
  }

  pub fn set(&self, value: &str) {
    unsafe {
      env::set_var(&self.name, value);
    }
  }

  pub fn remove(&self) {
    unsafe {
      env::remove_var(&self.name);
    }
  }
}

impl Drop for EnvVarGuard {
  fn drop(&mut self) {
    match &self.original {
      Some(val) => unsafe {
        env::set_var(&self.name, val);
      },
      None => unsafe {
        env::remove_var(&self.name);
      },
    }
  }
}

/// Points `XDG_CONFIG_HOME` at a per-test temporary directory
pub struct ConfigHomeGuard {
  /// The temporary directory standing in for the config home
  pub temp_dir: TempDir,
  config_home: EnvVarGuard,
}

impl Default for ConfigHomeGuard {
  fn default() -> Self {
    Self::new()
  }
}

impl ConfigHomeGuard {
  pub const XDG_CONFIG_HOME: &'static str = "XDG_CONFIG_HOME";

  pub fn new() -> Self {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let config_home = EnvVarGuard::new(Self::XDG_CONFIG_HOME);
    config_home.set(&temp_dir.path().to_string_lossy());

    Self { temp_dir, config_home }
  }

  /// Directory jiraflow resolves as its config directory under this guard
  pub fn app_config_dir(&self) -> PathBuf {
    self.temp_dir.path().join("jiraflow")
  }

  /// Write `content` to `config.toml` in the app config directory
  pub fn write_config(&self, content: &str) -> PathBuf {
    let dir = self.app_config_dir();
    std::fs::create_dir_all(&dir).expect("Failed to create config directory");
    let path = dir.join("config.toml");
    std::fs::write(&path, content).expect("Failed to write config.toml");
    path
  }

  pub fn path(&self) -> &Path {
    self.temp_dir.path()
  }
}
