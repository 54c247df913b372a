//! File-system primitives used around a transfer: size probes for the stall
//! detector, partial-file cleanup, and directory setup before a run.

use std::io;
use std::path::Path;

/// Current size of `path` in bytes, or `None` if it does not exist yet.
///
/// Metadata errors other than not-found are logged and reported as `None`;
/// the stall detector treats both the same way.
pub async fn file_size(path: &Path) -> Option<u64> {
    match tokio::fs::metadata(path).await {
        Ok(meta) => Some(meta.len()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => None,
        Err(e) => {
            tracing::warn!(path = %path.display(), "size probe failed: {}", e);
            None
        }
    }
}

/// Deletes a partially written file. Best-effort: a missing file is fine and
/// any other error is logged, never returned.
pub async fn remove_partial(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => tracing::debug!(path = %path.display(), "removed partial file"),
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => tracing::warn!(path = %path.display(), "could not remove partial file: {}", e),
    }
}

/// Creates `dir` and its parents.
pub async fn ensure_dir(dir: &Path) -> io::Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    tokio::fs::create_dir_all(dir).await
}

/// Creates the parent directory of `path` (e.g. `logs/` for `logs/errors.txt`).
pub async fn ensure_parent_dir(path: &Path) -> io::Result<()> {
    match path.parent() {
        Some(parent) => ensure_dir(parent).await,
        None => Ok(()),
    }
}
