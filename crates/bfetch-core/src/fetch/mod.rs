//! The `FetchToFile` primitive: stream one URL into one file, abortable.
//!
//! Fetchers are blocking; the transfer runner drives them on tokio's blocking
//! pool and aborts them by raising the shared flag.

mod easy;

pub use easy::CurlFetcher;

use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use thiserror::Error;

/// Why a fetch did not produce a complete file.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure reported by libcurl (DNS, connect, reset, ...).
    #[error("transfer failed: {0}")]
    Curl(#[from] curl::Error),

    /// The server answered with a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),

    #[error("cannot create {}: {source}", .path.display())]
    CreateFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("write to output file failed: {0}")]
    WriteFile(#[source] std::io::Error),

    /// The abort flag was raised while the transfer was in flight.
    #[error("transfer aborted")]
    Aborted,
}

/// Streams `url` into `path`, creating or truncating it first so that its size
/// is observable from the moment the transfer starts.
///
/// Implementations must poll `abort` while transferring and return
/// [`FetchError::Aborted`] promptly once it is set, releasing the connection
/// and the file handle before returning.
pub trait Fetcher: Send + Sync + 'static {
    /// Returns the number of body bytes written on success.
    fn fetch_to_file(&self, url: &str, path: &Path, abort: &AtomicBool) -> Result<u64, FetchError>;
}
