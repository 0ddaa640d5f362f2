//! Failure reasons for the host checks.

use std::io;
use std::net::IpAddr;
use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

/// Why a check failed.
///
/// These never escape a check: each operation logs the error and folds it into
/// [`CheckResult::Failure`](super::CheckResult::Failure).
#[derive(Debug, Error)]
pub enum CheckError {
  /// Target directory is missing or not a directory.
  #[error("path does not exist or is not a directory: {}", .path.display())]
  PathInvalid { path: PathBuf },

  #[error("no permission to write in {}", .path.display())]
  PermissionDenied { path: PathBuf },

  #[error("file already exists: {}", .path.display())]
  FileAlreadyExists { path: PathBuf },

  #[error("failed to write {}: {source}", .path.display())]
  OsWrite {
    path: PathBuf,
    #[source]
    source: io::Error,
  },

  #[error("ping to {addr} failed: {reason}")]
  PingFailure { addr: IpAddr, reason: String },

  /// No PTR record, or the resolver could not be reached.
  #[error("{addr} does not have a valid dns ptr: {message}")]
  DnsResolution { addr: IpAddr, message: String },

  #[error("request to {url} failed: {message}")]
  HttpTransport { url: String, message: String },

  #[error("failed to run {program}: {source}")]
  SubprocessLaunch {
    program: String,
    #[source]
    source: io::Error,
  },

  #[error("file does not exist: {}", .path.display())]
  FileNotFound { path: PathBuf },

  /// Non-zero exit in strict mode.
  #[error("{} exited with {}", .path.display(), describe_exit(.code))]
  BatchExit { path: PathBuf, code: Option<i32> },

  #[error("{} still running after {timeout:?}, killed", .path.display())]
  BatchTimeout { path: PathBuf, timeout: Duration },
}

fn describe_exit(code: &Option<i32>) -> String {
  match code {
    Some(code) => format!("code {}", code),
    None => "no exit code (terminated by signal)".to_string(),
  }
}
