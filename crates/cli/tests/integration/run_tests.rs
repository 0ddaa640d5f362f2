//! Full check runs against inputs that cannot all pass in a sandbox.
//!
//! Every run here pings an unroutable address, so each test waits for the
//! ping utility to give up.

use predicates::prelude::*;
use serde_json::Value;

use super::common::{TestEnv, UNROUTABLE_ADDR};

fn json_report(output: &[u8]) -> Value {
  serde_json::from_slice(output).unwrap_or_else(|e| panic!("stdout is not a JSON report: {}", e))
}

#[test]
fn invalid_inputs_exit_1_and_report_every_check() {
  let env = TestEnv::new();

  env
    .hostcheck_cmd()
    .arg("-p")
    .arg(env.missing_dir())
    .args(["-i", UNROUTABLE_ADDR])
    .arg("-f")
    .arg(env.missing_script())
    .assert()
    .code(1)
    .stderr(predicate::str::contains("marker-file"))
    .stderr(predicate::str::contains("ping"))
    .stderr(predicate::str::contains("reverse-dns-page"))
    .stderr(predicate::str::contains("batch-file"))
    .stderr(predicate::str::contains("4 of 4 checks failed"));

  assert!(!env.missing_dir().exists());
}

#[test]
fn json_report_lists_four_steps_in_order() {
  let env = TestEnv::new();

  let output = env
    .hostcheck_cmd()
    .arg("-p")
    .arg(env.missing_dir())
    .args(["-i", UNROUTABLE_ADDR])
    .arg("-f")
    .arg(env.missing_script())
    .args(["--format", "json"])
    .output()
    .unwrap();

  assert_eq!(output.status.code(), Some(1));

  let report = json_report(&output.stdout);
  assert_eq!(report["success"], Value::Bool(false));
  assert_eq!(report["target"]["addr"], UNROUTABLE_ADDR);

  let checks: Vec<_> = report["steps"]
    .as_array()
    .unwrap()
    .iter()
    .map(|s| s["check"].as_str().unwrap().to_string())
    .collect();
  assert_eq!(checks, ["marker-file", "ping", "reverse-dns-page", "batch-file"]);

  for step in report["steps"].as_array().unwrap() {
    assert_eq!(step["success"], Value::Bool(false));
    assert!(step["error"].is_string());
  }
}

#[test]
#[cfg(unix)]
fn good_dir_and_script_pass_while_network_checks_fail() {
  let env = TestEnv::new();
  let marker_dir = env.marker_dir();
  let ran = env.temp.path().join("ran");
  let script = env.write_script("test.sh", &format!("touch '{}'", ran.display()));

  let output = env
    .hostcheck_cmd()
    .arg("-p")
    .arg(&marker_dir)
    .args(["-i", UNROUTABLE_ADDR])
    .arg("-f")
    .arg(&script)
    .args(["--format", "json"])
    .output()
    .unwrap();

  assert_eq!(output.status.code(), Some(1));
  assert_eq!(std::fs::read_to_string(marker_dir.join("Hello.txt")).unwrap(), "Hello");
  assert!(ran.exists(), "batch script should have run");

  let report = json_report(&output.stdout);
  let success: Vec<_> = report["steps"]
    .as_array()
    .unwrap()
    .iter()
    .map(|s| s["success"].as_bool().unwrap())
    .collect();
  assert_eq!(success, [true, false, false, true]);
}

#[test]
#[cfg(unix)]
fn strict_flag_fails_on_non_zero_batch_exit() {
  let env = TestEnv::new();
  let script = env.write_script("fails.sh", "exit 3");

  let output = env
    .hostcheck_cmd()
    .arg("-p")
    .arg(env.marker_dir())
    .args(["-i", UNROUTABLE_ADDR])
    .arg("-f")
    .arg(&script)
    .args(["--format", "json", "--strict"])
    .output()
    .unwrap();

  let report = json_report(&output.stdout);
  let batch = &report["steps"][3];
  assert_eq!(batch["check"], "batch-file");
  assert_eq!(batch["success"], Value::Bool(false));
  assert!(batch["error"].as_str().unwrap().contains("exited with code 3"));
}

#[test]
#[cfg(unix)]
fn batch_timeout_kills_slow_script() {
  let env = TestEnv::new();
  let script = env.write_script("slow.sh", "exec sleep 10");

  env
    .hostcheck_cmd()
    .arg("-p")
    .arg(env.marker_dir())
    .args(["-i", UNROUTABLE_ADDR])
    .arg("-f")
    .arg(&script)
    .args(["--batch-timeout", "300ms"])
    .assert()
    .code(1)
    .stderr(predicate::str::contains("still running"));
}

#[test]
#[cfg(unix)]
fn script_output_stays_out_of_json_report() {
  let env = TestEnv::new();
  let script = env.write_script("test.sh", "echo running tests\necho warming up >&2");

  let output = env
    .hostcheck_cmd()
    .arg("-p")
    .arg(env.marker_dir())
    .args(["-i", UNROUTABLE_ADDR])
    .arg("-f")
    .arg(&script)
    .args(["--format", "json"])
    .output()
    .unwrap();

  assert!(!String::from_utf8_lossy(&output.stdout).contains("running tests"));
  let report = json_report(&output.stdout);
  assert_eq!(report["steps"][3]["success"], Value::Bool(true));
}

#[test]
#[cfg(target_os = "linux")]
fn unwritable_stdout_exits_3() {
  let env = TestEnv::new();
  let full = std::fs::OpenOptions::new().write(true).open("/dev/full").unwrap();

  let output = std::process::Command::new(env!("CARGO_BIN_EXE_hostcheck"))
    .current_dir(env.temp.path())
    .env("RUST_LOG", "info")
    .arg("-p")
    .arg(env.missing_dir())
    .args(["-i", UNROUTABLE_ADDR])
    .arg("-f")
    .arg(env.missing_script())
    .args(["--format", "json"])
    .stdout(full)
    .stderr(std::process::Stdio::piped())
    .output()
    .unwrap();

  assert_eq!(output.status.code(), Some(3));
  assert!(String::from_utf8_lossy(&output.stderr).contains("Failed to write JSON report"));
}
