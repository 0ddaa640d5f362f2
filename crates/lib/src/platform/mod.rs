//! Platform detection and filesystem capability probes.

pub mod os;

use std::fs::Metadata;
use std::path::Path;

pub use os::{Family, Os};

/// Returns true if `path` is an existing directory the current process may create files in.
///
/// - **Unix**: asks the kernel via `access(W_OK)`, so ACLs and the effective uid are honored
/// - **Windows**: checks the read-only attribute
pub fn is_writable_dir(path: &Path) -> bool {
  match std::fs::metadata(path) {
    Ok(meta) if meta.is_dir() => has_write_access(path, &meta),
    _ => false,
  }
}

#[cfg(unix)]
fn has_write_access(path: &Path, _meta: &Metadata) -> bool {
  rustix::fs::access(path, rustix::fs::Access::WRITE_OK).is_ok()
}

#[cfg(not(unix))]
fn has_write_access(_path: &Path, meta: &Metadata) -> bool {
  !meta.permissions().readonly()
}
