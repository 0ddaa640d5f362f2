mod check;
mod output;

use std::net::IpAddr;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use clap::Parser;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use hostcheck_lib::config::CheckConfig;
use hostcheck_lib::run::RunTarget;

use crate::output::{OutputFormat, print_error};

/// Exit status when the binary itself fails, e.g. the report cannot be written.
///
/// 1 is reserved for failed checks and 2 for usage errors.
const EXIT_INTERNAL_ERROR: u8 = 3;

/// hostcheck - Validate a host: marker file, ping, reverse-DNS page, test batch
#[derive(Parser)]
#[command(name = "hostcheck")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
struct Cli {
  /// Directory to write the Hello.txt marker file into
  #[arg(short, long, value_name = "DIR")]
  path: PathBuf,

  /// IPv4 or IPv6 address to ping and reverse-resolve
  #[arg(short, long, value_name = "ADDR")]
  ip: IpAddr,

  /// Test batch script to execute (.bat on Windows, shell script elsewhere)
  #[arg(short, long, value_name = "FILE")]
  file: PathBuf,

  /// Fail the batch check when the script exits non-zero
  #[arg(long)]
  strict: bool,

  /// Kill the batch script after this long (e.g. 30s, 2m)
  #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration)]
  batch_timeout: Option<Duration>,

  /// Timeout for the HTTP request against the reverse-DNS name
  #[arg(long, value_name = "DURATION", value_parser = humantime::parse_duration, default_value = "10s")]
  http_timeout: Duration,

  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Enable verbose output
  #[arg(short, long)]
  verbose: bool,
}

fn main() -> ExitCode {
  let cli = Cli::parse();

  init_tracing(cli.verbose);

  let config = CheckConfig {
    http_timeout: cli.http_timeout,
    batch_timeout: cli.batch_timeout,
    strict_batch_exit: cli.strict,
  };

  let target = RunTarget {
    dir: cli.path,
    addr: cli.ip,
    batch_file: cli.file,
  };

  match check::cmd_check(&target, config, cli.format) {
    Ok(true) => ExitCode::SUCCESS,
    Ok(false) => ExitCode::FAILURE,
    Err(e) => {
      print_error(&format!("{:#}", e));
      ExitCode::from(EXIT_INTERNAL_ERROR)
    }
  }
}

/// Logs go to stderr so stdout stays clean for `--format json`.
///
/// `RUST_LOG` overrides the level picked by `--verbose`.
fn init_tracing(verbose: bool) {
  let default_level = if verbose { Level::DEBUG } else { Level::INFO };
  let filter = EnvFilter::builder()
    .with_default_directive(default_level.into())
    .from_env_lossy();

  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .without_time()
    .init();
}
