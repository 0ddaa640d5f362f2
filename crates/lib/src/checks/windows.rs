//! Windows implementation of the host checks.

use std::net::IpAddr;
use std::path::Path;

use tracing::info;

use super::marker::{self, ExistingMarker};
use super::{Check, CheckResult, PlatformOps, conclude, net, process};
use crate::config::CheckConfig;
use crate::platform::Family;

/// Host checks using Windows command syntax.
///
/// - an existing marker file is left untouched and fails the check
/// - the batch file runs as `cmd /C <file>`
#[derive(Debug, Clone, Default)]
pub struct WindowsOps {
  config: CheckConfig,
}

impl WindowsOps {
  pub fn new(config: CheckConfig) -> Self {
    Self { config }
  }

  /// The ping invocation for `addr`: a single echo request.
  pub fn ping_command(addr: IpAddr) -> (&'static str, Vec<String>) {
    ("ping", vec!["-n".to_string(), "1".to_string(), addr.to_string()])
  }
}

impl PlatformOps for WindowsOps {
  fn family(&self) -> Family {
    Family::Windows
  }

  fn create_marker_file(&self, dir: &Path) -> CheckResult {
    let result = marker::write_marker(dir, ExistingMarker::Reject).map(|path| {
      info!(path = %path.display(), "marker file written");
    });
    conclude(Check::MarkerFile, result)
  }

  fn ping_address(&self, addr: IpAddr) -> CheckResult {
    let (program, args) = Self::ping_command(addr);
    conclude(Check::Ping, net::ping(program, &args, addr))
  }

  fn fetch_reverse_dns_page(&self, addr: IpAddr) -> CheckResult {
    conclude(
      Check::ReverseDnsPage,
      net::fetch_ptr_page(addr, self.config.http_timeout),
    )
  }

  fn run_batch_file(&self, path: &Path) -> CheckResult {
    conclude(Check::BatchFile, process::run_script("cmd", &["/C"], path, &self.config))
  }
}
