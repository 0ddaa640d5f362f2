//! POSIX implementation of the host checks (Linux, macOS, other Unix).

use std::net::IpAddr;
use std::path::Path;

use tracing::info;

use super::marker::{self, ExistingMarker};
use super::{Check, CheckResult, PlatformOps, conclude, net, process};
use crate::config::CheckConfig;
use crate::platform::Family;

/// Host checks using POSIX command syntax.
///
/// - an existing marker file is rewritten and counts as success
/// - the batch file runs as `sh <file>`
#[derive(Debug, Clone, Default)]
pub struct PosixOps {
  config: CheckConfig,
}

impl PosixOps {
  pub fn new(config: CheckConfig) -> Self {
    Self { config }
  }

  /// The ping invocation for `addr`: a single echo request.
  ///
  /// macOS ships IPv6 ping as a separate `ping6` binary.
  pub fn ping_command(addr: IpAddr) -> (&'static str, Vec<String>) {
    let program = if addr.is_ipv6() && cfg!(target_os = "macos") {
      "ping6"
    } else {
      "ping"
    };
    (program, vec!["-c".to_string(), "1".to_string(), addr.to_string()])
  }
}

impl PlatformOps for PosixOps {
  fn family(&self) -> Family {
    Family::Posix
  }

  fn create_marker_file(&self, dir: &Path) -> CheckResult {
    let result = marker::write_marker(dir, ExistingMarker::Overwrite).map(|path| {
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
    conclude(Check::BatchFile, process::run_script("sh", &[], path, &self.config))
  }
}
