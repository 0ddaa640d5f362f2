//! Test-batch execution.

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{debug, info, warn};

use super::CheckError;
use crate::config::CheckConfig;

const POLL_INTERVAL: Duration = Duration::from_millis(100);

/// Run `script` through `interpreter` in the current working directory.
///
/// The child's stdout and stderr are captured and logged at debug level, never
/// passed through to ours. Its exit code only fails the check when
/// `config.strict_batch_exit` is set; a configured `batch_timeout` kills it.
pub(crate) fn run_script(
  interpreter: &str,
  interpreter_args: &[&str],
  script: &Path,
  config: &CheckConfig,
) -> Result<(), CheckError> {
  if !script.is_file() {
    return Err(CheckError::FileNotFound {
      path: script.to_path_buf(),
    });
  }

  let launch_err = |source: std::io::Error| CheckError::SubprocessLaunch {
    program: interpreter.to_string(),
    source,
  };

  let cwd = std::env::current_dir().map_err(launch_err)?;
  // dunce keeps Windows paths free of the \\?\ prefix cmd.exe cannot handle
  let script_path = dunce::canonicalize(script).map_err(launch_err)?;

  info!(script = %script_path.display(), cwd = %cwd.display(), "executing batch file");

  let mut command = Command::new(interpreter);
  command
    .args(interpreter_args)
    .arg(&script_path)
    .current_dir(&cwd)
    .stdin(Stdio::null())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped());

  debug!(interpreter = %interpreter, args = ?interpreter_args, "spawning process");

  let mut child = command.spawn().map_err(launch_err)?;
  // a full pipe blocks the child, so both are read while it runs
  let stdout = drain(child.stdout.take());
  let stderr = drain(child.stderr.take());

  let status = match config.batch_timeout {
    None => child.wait().map_err(launch_err)?,
    Some(timeout) => match wait_with_timeout(&mut child, timeout).map_err(launch_err)? {
      Some(status) => status,
      None => {
        if let Err(e) = child.kill() {
          warn!(error = %e, "failed to kill batch process");
        }
        // reap; the drain threads are left detached since a grandchild may still hold the pipes
        let _ = child.wait();
        return Err(CheckError::BatchTimeout {
          path: script.to_path_buf(),
          timeout,
        });
      }
    },
  };

  log_output(stdout, stderr);

  if status.success() {
    info!(script = %script_path.display(), "batch file finished");
    return Ok(());
  }

  if config.strict_batch_exit {
    return Err(CheckError::BatchExit {
      path: script.to_path_buf(),
      code: status.code(),
    });
  }

  warn!(script = %script_path.display(), code = ?status.code(), "batch file exited with non-zero status");
  Ok(())
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
  pipe.map(|mut pipe| {
    thread::spawn(move || {
      let mut buf = Vec::new();
      let _ = pipe.read_to_end(&mut buf);
      String::from_utf8_lossy(&buf).into_owned()
    })
  })
}

fn log_output(stdout: Option<JoinHandle<String>>, stderr: Option<JoinHandle<String>>) {
  let collect = |handle: Option<JoinHandle<String>>| handle.and_then(|h| h.join().ok()).unwrap_or_default();

  let stdout = collect(stdout);
  let stderr = collect(stderr);
  if !stdout.is_empty() {
    debug!(stdout = %stdout.trim(), "batch stdout");
  }
  if !stderr.is_empty() {
    debug!(stderr = %stderr.trim(), "batch stderr");
  }
}

/// Poll the child until it exits or `timeout` elapses.
///
/// Returns `None` if the child is still running at the deadline.
fn wait_with_timeout(child: &mut Child, timeout: Duration) -> std::io::Result<Option<ExitStatus>> {
  let start = Instant::now();
  loop {
    if let Some(status) = child.try_wait()? {
      return Ok(Some(status));
    }
    if start.elapsed() >= timeout {
      return Ok(None);
    }
    std::thread::sleep(POLL_INTERVAL);
  }
}
