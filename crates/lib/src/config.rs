//! Tunables shared by the host checks.

use std::time::Duration;

/// Timeout for the reverse-DNS page request.
pub const DEFAULT_HTTP_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for the host checks.
#[derive(Debug, Clone)]
pub struct CheckConfig {
  /// Upper bound on the HTTP GET against the reverse-DNS name.
  pub http_timeout: Duration,

  /// Kill the batch child if it is still running after this long.
  /// If None, the batch runs to completion however long it takes.
  pub batch_timeout: Option<Duration>,

  /// Treat a non-zero batch exit code as a failed check.
  /// Otherwise the exit code is only logged.
  pub strict_batch_exit: bool,
}

impl Default for CheckConfig {
  fn default() -> Self {
    Self {
      http_timeout: DEFAULT_HTTP_TIMEOUT,
      batch_timeout: None,
      strict_batch_exit: false,
    }
  }
}
