//! Shared test helpers for CLI integration tests.

use std::path::PathBuf;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use tempfile::TempDir;

/// TEST-NET-1 (RFC 5737): no echo reply, no PTR record.
pub const UNROUTABLE_ADDR: &str = "192.0.2.1";

/// Isolated test environment.
///
/// Each test gets its own temporary directory, used as the working directory
/// of the binary and as the home of marker directories and scripts.
pub struct TestEnv {
  pub temp: TempDir,
}

impl TestEnv {
  pub fn new() -> Self {
    Self {
      temp: TempDir::new().unwrap(),
    }
  }

  /// An existing, writable directory for the marker file.
  pub fn marker_dir(&self) -> PathBuf {
    let p = self.temp.path().join("marker");
    std::fs::create_dir_all(&p).unwrap();
    p
  }

  /// A directory path that does not exist.
  pub fn missing_dir(&self) -> PathBuf {
    self.temp.path().join("home2")
  }

  /// Path to a batch file that does not exist.
  pub fn missing_script(&self) -> PathBuf {
    self.temp.path().join("test2.bat")
  }

  /// Write a shell script relative to the temp directory.
  #[cfg(unix)]
  pub fn write_script(&self, name: &str, body: &str) -> PathBuf {
    let path = self.temp.path().join(name);
    std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
    path
  }

  /// Get a pre-configured Command for the hostcheck binary.
  ///
  /// Runs in the temp directory with logging pinned to `info`.
  pub fn hostcheck_cmd(&self) -> Command {
    let mut cmd: Command = cargo_bin_cmd!("hostcheck");
    cmd.current_dir(self.temp.path());
    cmd.env("RUST_LOG", "info");
    cmd
  }
}
