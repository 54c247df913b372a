//! libcurl-backed fetcher: single GET, body written sequentially to the file.

use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use super::{FetchError, Fetcher};

const USER_AGENT: &str = concat!("bfetch/", env!("CARGO_PKG_VERSION"));

/// Fetcher using one curl easy handle per transfer.
///
/// No low-speed or wall-clock timeout is set: hung transfers are left to the
/// stall detector, which raises the abort flag.
#[derive(Debug, Clone)]
pub struct CurlFetcher {
    connect_timeout: Duration,
    max_redirections: u32,
}

impl Default for CurlFetcher {
    fn default() -> Self {
        Self::new(Duration::from_secs(30))
    }
}

impl CurlFetcher {
    pub fn new(connect_timeout: Duration) -> Self {
        Self {
            connect_timeout,
            max_redirections: 10,
        }
    }
}

impl Fetcher for CurlFetcher {
    fn fetch_to_file(&self, url: &str, path: &Path, abort: &AtomicBool) -> Result<u64, FetchError> {
        let mut file = File::create(path).map_err(|source| FetchError::CreateFile {
            path: path.to_path_buf(),
            source,
        })?;

        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.useragent(USER_AGENT)?;
        easy.follow_location(true)?;
        easy.max_redirections(self.max_redirections)?;
        easy.connect_timeout(self.connect_timeout)?;
        // Enables the progress callback, which is how an idle transfer sees the abort flag.
        easy.progress(true)?;

        let mut written = 0u64;
        let mut write_error: Option<std::io::Error> = None;
        let performed = {
            let mut transfer = easy.transfer();
            transfer.write_function(|data| {
                if abort.load(Ordering::Relaxed) {
                    return Ok(0);
                }
                match file.write_all(data) {
                    Ok(()) => {
                        written += data.len() as u64;
                        Ok(data.len())
                    }
                    Err(e) => {
                        write_error = Some(e);
                        Ok(0)
                    }
                }
            })?;
            transfer.progress_function(|_, _, _, _| !abort.load(Ordering::Relaxed))?;
            transfer.perform()
        };

        if let Err(e) = performed {
            if abort.load(Ordering::Relaxed) {
                return Err(FetchError::Aborted);
            }
            if e.is_write_error() {
                if let Some(io_err) = write_error {
                    return Err(FetchError::WriteFile(io_err));
                }
            }
            return Err(FetchError::Curl(e));
        }

        let code = easy.response_code()?;
        if !(200..300).contains(&code) {
            return Err(FetchError::Http(code));
        }

        file.flush().map_err(FetchError::WriteFile)?;
        Ok(written)
    }
}
