//! The host check run behind the `hostcheck` binary.
//!
//! Selects the checks for the running platform, runs all four, and prints the report.

use anyhow::Result;
use serde_json::json;

use hostcheck_lib::checks::current_platform_ops;
use hostcheck_lib::config::CheckConfig;
use hostcheck_lib::platform::Os;
use hostcheck_lib::run::{RunReport, RunTarget, run_report};

use crate::output::{OutputFormat, format_duration, print_error, print_info, print_json, print_stat, print_success};

/// Run every check against `target` and print the report.
///
/// Returns whether all checks passed.
pub fn cmd_check(target: &RunTarget, config: CheckConfig, format: OutputFormat) -> Result<bool> {
  let ops = current_platform_ops(config);

  if !format.is_json() {
    print_info(&format!("Checking host ({})", ops.family()));
    print_stat("Platform", os_name());
    print_stat("Directory", &target.dir.display().to_string());
    print_stat("Address", &target.addr.to_string());
    print_stat("Batch file", &target.batch_file.display().to_string());
    println!();
  }

  let report = run_report(ops.as_ref(), target);

  if format.is_json() {
    print_json(&report_json(target, &report))?;
  } else {
    print_report(&report);
  }

  Ok(report.is_success())
}

fn report_json(target: &RunTarget, report: &RunReport) -> serde_json::Value {
  let steps: Vec<_> = report
    .steps
    .iter()
    .map(|step| {
      json!({
        "check": step.check.as_str(),
        "success": step.result.is_success(),
        "error": step.result.error().map(|e| e.to_string()),
        "elapsed_ms": step.elapsed.as_millis() as u64,
      })
    })
    .collect();

  json!({
    "os": os_name(),
    "family": report.family.as_str(),
    "target": {
      "dir": target.dir.display().to_string(),
      "addr": target.addr.to_string(),
      "batch_file": target.batch_file.display().to_string(),
    },
    "success": report.is_success(),
    "steps": steps,
  })
}

fn print_report(report: &RunReport) {
  for step in &report.steps {
    let line = format!("{:<17} {}", step.check.as_str(), format_duration(step.elapsed));
    match step.result.error() {
      None => print_success(&line),
      Some(e) => print_error(&format!("{} {}", line, e)),
    }
  }

  println!();
  let total = report.steps.len();
  let failed = report.failures().count();
  if failed == 0 {
    print_success(&format!("All {} checks passed in {}", total, format_duration(report.elapsed())));
  } else {
    print_error(&format!("{} of {} checks failed", failed, total));
  }
}

fn os_name() -> &'static str {
  Os::current().map(|os| os.as_str()).unwrap_or("unknown")
}
