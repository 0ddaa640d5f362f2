//! Running all four host checks and aggregating the outcome.
//!
//! The checks are independent; they run in the fixed order of [`Check::ALL`]
//! so the log reads the same on every run. A failed check never stops the run.

use std::net::IpAddr;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tracing::{error, info};

use crate::checks::{Check, CheckResult, PlatformOps};
use crate::platform::Family;

/// The caller's inputs for one run.
#[derive(Debug, Clone)]
pub struct RunTarget {
  /// Directory the marker file is written into.
  pub dir: PathBuf,
  /// Address to ping and reverse-resolve.
  pub addr: IpAddr,
  /// Test batch script to execute.
  pub batch_file: PathBuf,
}

/// Result of one check within a run.
#[derive(Debug)]
pub struct StepReport {
  pub check: Check,
  pub result: CheckResult,
  pub elapsed: Duration,
}

/// Result of a whole run.
#[derive(Debug)]
pub struct RunReport {
  /// Family of the [`PlatformOps`] that performed the checks.
  pub family: Family,
  /// One entry per check, in run order.
  pub steps: Vec<StepReport>,
}

impl RunReport {
  /// True iff every check ran and succeeded.
  pub fn is_success(&self) -> bool {
    self.steps.len() == Check::ALL.len() && self.steps.iter().all(|s| s.result.is_success())
  }

  /// Steps that failed, in run order.
  pub fn failures(&self) -> impl Iterator<Item = &StepReport> {
    self.steps.iter().filter(|s| !s.result.is_success())
  }

  /// Total wall time spent in checks.
  pub fn elapsed(&self) -> Duration {
    self.steps.iter().map(|s| s.elapsed).sum()
  }
}

/// Run every check against `target` and collect the per-step results.
pub fn run_report(ops: &dyn PlatformOps, target: &RunTarget) -> RunReport {
  info!(
    family = %ops.family(),
    dir = %target.dir.display(),
    addr = %target.addr,
    batch_file = %target.batch_file.display(),
    "running host checks"
  );

  let mut steps = Vec::with_capacity(Check::ALL.len());
  for check in Check::ALL {
    let started = Instant::now();
    let result = match check {
      Check::MarkerFile => ops.create_marker_file(&target.dir),
      Check::Ping => ops.ping_address(target.addr),
      Check::ReverseDnsPage => ops.fetch_reverse_dns_page(target.addr),
      Check::BatchFile => ops.run_batch_file(&target.batch_file),
    };
    let elapsed = started.elapsed();

    if result.is_success() {
      info!(check = %check, elapsed = ?elapsed, "{}", success_message(check));
    } else {
      error!(check = %check, elapsed = ?elapsed, "{}", failure_message(check));
    }

    steps.push(StepReport { check, result, elapsed });
  }

  let report = RunReport {
    family: ops.family(),
    steps,
  };

  let failed = report.failures().count();
  if failed == 0 {
    info!("all host checks passed");
  } else {
    error!(failed, total = report.steps.len(), "host checks failed");
  }

  report
}

/// Run every check and return true iff all four succeeded.
pub fn run_tasks(ops: &dyn PlatformOps, file_path: &Path, address: IpAddr, batch_file_name: &Path) -> bool {
  let target = RunTarget {
    dir: file_path.to_path_buf(),
    addr: address,
    batch_file: batch_file_name.to_path_buf(),
  };
  run_report(ops, &target).is_success()
}

fn success_message(check: Check) -> &'static str {
  match check {
    Check::MarkerFile => "created marker file",
    Check::Ping => "ping answered",
    Check::ReverseDnsPage => "reverse-dns page responded",
    Check::BatchFile => "ran test batch",
  }
}

fn failure_message(check: Check) -> &'static str {
  match check {
    Check::MarkerFile => "error creating marker file",
    Check::Ping => "ping failed",
    Check::ReverseDnsPage => "reverse-dns page request failed",
    Check::BatchFile => "running test batch failed",
  }
}
