//! Test utilities for hostcheck-lib.
//!
//! Cross-platform helpers for tests that need a throwaway batch script or an
//! address nothing answers on.

use std::net::{IpAddr, Ipv4Addr};
use std::path::{Path, PathBuf};

/// TEST-NET-1 (RFC 5737): never routed, never has a PTR record.
pub const UNROUTABLE_ADDR: IpAddr = IpAddr::V4(Ipv4Addr::new(192, 0, 2, 1));

/// Write a script named `stem` with the platform extension into `dir`.
///
/// `body` is written verbatim, so it must use the syntax of the platform interpreter.
#[cfg(unix)]
pub fn write_script(dir: &Path, stem: &str, body: &str) -> PathBuf {
  let path = dir.join(format!("{}.sh", stem));
  std::fs::write(&path, format!("#!/bin/sh\n{}\n", body)).unwrap();
  path
}

#[cfg(windows)]
pub fn write_script(dir: &Path, stem: &str, body: &str) -> PathBuf {
  let path = dir.join(format!("{}.bat", stem));
  std::fs::write(&path, format!("@echo off\r\n{}\r\n", body)).unwrap();
  path
}
