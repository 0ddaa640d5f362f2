//! Network probes: ping, reverse DNS, and the HTTP GET against the resolved name.

use std::io;
use std::net::{IpAddr, SocketAddr};
use std::process::Command;
use std::time::Duration;

use reqwest::StatusCode;
use tracing::{debug, info};

use super::CheckError;

/// getnameinfo flag: fail instead of returning the numeric address when there is no PTR.
#[cfg(unix)]
const NI_NAMEREQD: i32 = libc::NI_NAMEREQD;

#[cfg(windows)]
const NI_NAMEREQD: i32 = windows_sys::Win32::Networking::WinSock::NI_NAMEREQD as i32;

/// Run the ping utility and succeed iff it exits with status zero.
///
/// `program` and `args` come from the platform variant (e.g. `ping -c 1 <addr>`).
pub(crate) fn ping(program: &str, args: &[String], addr: IpAddr) -> Result<(), CheckError> {
  info!(addr = %addr, program = %program, "pinging");

  let output = Command::new(program)
    .args(args)
    .output()
    .map_err(|e| CheckError::PingFailure {
      addr,
      reason: format!("could not run {}: {}", program, e),
    })?;

  let stdout = String::from_utf8_lossy(&output.stdout);
  let stderr = String::from_utf8_lossy(&output.stderr);
  if !stdout.is_empty() {
    debug!(stdout = %stdout.trim(), "ping stdout");
  }
  if !stderr.is_empty() {
    debug!(stderr = %stderr.trim(), "ping stderr");
  }

  if !output.status.success() {
    return Err(CheckError::PingFailure {
      addr,
      reason: format!("{} exited with {}", program, output.status),
    });
  }

  Ok(())
}

/// Resolve the PTR name of `addr` through the system resolver.
///
/// Hosts files count, so loopback usually resolves to `localhost`.
pub(crate) fn reverse_lookup(addr: IpAddr) -> Result<String, CheckError> {
  let sock = SocketAddr::new(addr, 0);

  let (host, _service) = dns_lookup::getnameinfo(&sock, NI_NAMEREQD).map_err(|e| CheckError::DnsResolution {
    addr,
    message: io::Error::from(e).to_string(),
  })?;

  let host = host.trim_end_matches('.').to_string();
  if host.is_empty() || host.parse::<IpAddr>().is_ok() {
    return Err(CheckError::DnsResolution {
      addr,
      message: "no PTR record".to_string(),
    });
  }

  Ok(host)
}

/// Issue a GET against `url` and return whatever status the server answered with.
pub(crate) fn http_get(url: &str, timeout: Duration) -> Result<StatusCode, CheckError> {
  let transport_err = |e: reqwest::Error| CheckError::HttpTransport {
    url: url.to_string(),
    message: e.to_string(),
  };

  let client = reqwest::blocking::Client::builder()
    .timeout(timeout)
    .build()
    .map_err(transport_err)?;

  let response = client.get(url).send().map_err(transport_err)?;
  Ok(response.status())
}

/// Reverse-resolve `addr` and GET `http://<name>`.
///
/// The lookup must succeed before any request is made. Any HTTP status counts as a
/// response; only transport errors fail.
pub(crate) fn fetch_ptr_page(addr: IpAddr, timeout: Duration) -> Result<(), CheckError> {
  let host = reverse_lookup(addr)?;
  info!(addr = %addr, host = %host, "resolved dns ptr");

  let url = format!("http://{}", host);
  let status = http_get(&url, timeout)?;
  info!(url = %url, status = status.as_u16(), "received response");

  Ok(())
}
