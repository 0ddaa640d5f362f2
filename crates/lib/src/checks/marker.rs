//! Marker file writing.

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::{CheckError, MARKER_CONTENT, MARKER_FILE_NAME};
use crate::platform;

/// What to do when the marker file is already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ExistingMarker {
  /// Leave it alone and fail.
  Reject,
  /// Truncate and write the fixed content again.
  Overwrite,
}

/// Write the marker file into `dir` after checking the directory is usable.
///
/// Returns the path of the written file.
pub(crate) fn write_marker(dir: &Path, existing: ExistingMarker) -> Result<PathBuf, CheckError> {
  if !dir.is_dir() {
    return Err(CheckError::PathInvalid { path: dir.to_path_buf() });
  }
  if !platform::is_writable_dir(dir) {
    return Err(CheckError::PermissionDenied { path: dir.to_path_buf() });
  }

  let path = dir.join(MARKER_FILE_NAME);
  debug!(path = %path.display(), policy = ?existing, "writing marker file");

  let mut options = OpenOptions::new();
  options.write(true);
  match existing {
    ExistingMarker::Reject => options.create_new(true),
    ExistingMarker::Overwrite => {
      if path.exists() {
        info!(path = %path.display(), "marker file already exists, rewriting");
      }
      options.create(true).truncate(true)
    }
  };

  let file = match options.open(&path) {
    Ok(file) => file,
    Err(e) if e.kind() == io::ErrorKind::AlreadyExists => {
      return Err(CheckError::FileAlreadyExists { path });
    }
    Err(e) if e.kind() == io::ErrorKind::PermissionDenied => {
      return Err(CheckError::PermissionDenied { path: dir.to_path_buf() });
    }
    Err(source) => return Err(CheckError::OsWrite { path, source }),
  };

  fill_marker(file, path, existing)
}

/// Write the fixed content into the freshly opened marker.
///
/// In `Reject` mode a failed write removes the file again, so a half-written
/// marker does not make every later run fail with `FileAlreadyExists`.
fn fill_marker<W: Write>(mut file: W, path: PathBuf, existing: ExistingMarker) -> Result<PathBuf, CheckError> {
  let source = match file.write_all(MARKER_CONTENT.as_bytes()) {
    Ok(()) => return Ok(path),
    Err(source) => source,
  };
  drop(file);

  if existing == ExistingMarker::Reject {
    if let Err(e) = std::fs::remove_file(&path) {
      warn!(path = %path.display(), error = %e, "failed to remove partial marker file");
    }
  }

  Err(CheckError::OsWrite { path, source })
}
