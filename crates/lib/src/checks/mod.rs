//! The four host checks and the platform capability set that performs them.
//!
//! [`PlatformOps`] is implemented once per OS family:
//! - [`WindowsOps`]: `ping -n 1`, `cmd /C <batch>`, refuses to overwrite an existing marker file
//! - [`PosixOps`]: `ping -c 1`, `sh <script>`, rewrites an existing marker file
//!
//! Every operation catches its own errors, logs them, and returns a [`CheckResult`].

pub mod error;
mod marker;
mod net;
mod posix;
mod process;
mod windows;

use std::fmt;
use std::net::IpAddr;
use std::path::Path;

use tracing::error;

use crate::config::CheckConfig;
use crate::platform::Family;

pub use error::CheckError;
pub use posix::PosixOps;
pub use windows::WindowsOps;

/// Name of the marker file written by [`PlatformOps::create_marker_file`].
pub const MARKER_FILE_NAME: &str = "Hello.txt";

/// Fixed content of the marker file.
pub const MARKER_CONTENT: &str = "Hello";

/// Identifies one of the four checks, in run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
  MarkerFile,
  Ping,
  ReverseDnsPage,
  BatchFile,
}

impl Check {
  /// All checks in the order a run performs them.
  pub const ALL: [Check; 4] = [Check::MarkerFile, Check::Ping, Check::ReverseDnsPage, Check::BatchFile];

  pub fn as_str(&self) -> &'static str {
    match self {
      Check::MarkerFile => "marker-file",
      Check::Ping => "ping",
      Check::ReverseDnsPage => "reverse-dns-page",
      Check::BatchFile => "batch-file",
    }
  }
}

impl fmt::Display for Check {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.as_str())
  }
}

/// Outcome of a single check.
#[derive(Debug)]
pub enum CheckResult {
  Success,
  Failure(CheckError),
}

impl CheckResult {
  pub fn is_success(&self) -> bool {
    matches!(self, CheckResult::Success)
  }

  /// The failure reason, if the check failed.
  pub fn error(&self) -> Option<&CheckError> {
    match self {
      CheckResult::Success => None,
      CheckResult::Failure(e) => Some(e),
    }
  }
}

impl From<Result<(), CheckError>> for CheckResult {
  fn from(result: Result<(), CheckError>) -> Self {
    match result {
      Ok(()) => CheckResult::Success,
      Err(e) => CheckResult::Failure(e),
    }
  }
}

/// Host capabilities exercised by a check run.
///
/// Implementations must not panic or return early on OS errors: every failure
/// is logged and reported as [`CheckResult::Failure`].
pub trait PlatformOps {
  /// The OS family whose command syntax this implementation uses.
  fn family(&self) -> Family;

  /// Write [`MARKER_FILE_NAME`] containing [`MARKER_CONTENT`] into `dir`.
  fn create_marker_file(&self, dir: &Path) -> CheckResult;

  /// Send a single ICMP echo request to `addr` using the system ping utility.
  fn ping_address(&self, addr: IpAddr) -> CheckResult;

  /// Reverse-resolve `addr` and GET `http://<name>`. Any HTTP status is a success.
  fn fetch_reverse_dns_page(&self, addr: IpAddr) -> CheckResult;

  /// Run the script at `path` with the platform interpreter in the current directory.
  fn run_batch_file(&self, path: &Path) -> CheckResult;
}

/// Returns the implementation for `family`.
pub fn platform_ops(family: Family, config: CheckConfig) -> Box<dyn PlatformOps> {
  match family {
    Family::Windows => Box::new(WindowsOps::new(config)),
    Family::Posix => Box::new(PosixOps::new(config)),
  }
}

/// Returns the implementation for the running system.
pub fn current_platform_ops(config: CheckConfig) -> Box<dyn PlatformOps> {
  platform_ops(Family::current(), config)
}

/// Log a failed check with its reason and fold the result into a [`CheckResult`].
pub(crate) fn conclude(check: Check, result: Result<(), CheckError>) -> CheckResult {
  if let Err(e) = &result {
    error!(check = %check, error = %e, "check failed");
  }
  result.into()
}
