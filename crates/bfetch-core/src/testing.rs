//! Scripted in-process fetcher for scheduler and transfer tests.

use std::collections::HashMap;
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::fetch::{FetchError, Fetcher};

/// Upper bound on how long a hanging fetch waits for its abort flag.
const HANG_LIMIT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, Copy)]
pub(crate) enum Behavior {
    /// Write `bytes` immediately and succeed.
    Succeed { bytes: u64 },
    /// Sleep, then write `bytes` and succeed.
    Slow { bytes: u64, delay: Duration },
    /// Write `after_bytes` then report a transport error.
    Fail { after_bytes: u64 },
    /// Write `after_bytes` then stop making progress until aborted.
    Hang { after_bytes: u64 },
    /// Write one byte every `every`, `chunks` times, then succeed.
    Trickle { chunks: u64, every: Duration },
}

#[derive(Default)]
pub(crate) struct ScriptedFetcher {
    script: HashMap<String, Behavior>,
    in_flight: Arc<AtomicUsize>,
    max_in_flight: Arc<AtomicUsize>,
    aborted: Arc<AtomicUsize>,
}

impl ScriptedFetcher {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Unscripted URLs behave as `Succeed { bytes: 1 }`.
    pub(crate) fn with(mut self, url: &str, behavior: Behavior) -> Self {
        self.script.insert(url.to_string(), behavior);
        self
    }

    /// High-water mark of concurrently running fetches.
    pub(crate) fn max_in_flight_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.max_in_flight)
    }

    /// Number of fetches that stopped because their abort flag was raised.
    pub(crate) fn aborted_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.aborted)
    }

    fn run(&self, behavior: Behavior, path: &Path, abort: &AtomicBool) -> Result<u64, FetchError> {
        let mut file = File::create(path).map_err(|source| FetchError::CreateFile {
            path: path.to_path_buf(),
            source,
        })?;
        let mut write = |n: u64| -> Result<(), FetchError> {
            file.write_all(&vec![b'x'; n as usize])
                .map_err(FetchError::WriteFile)
        };
        match behavior {
            Behavior::Succeed { bytes } => {
                write(bytes)?;
                Ok(bytes)
            }
            Behavior::Slow { bytes, delay } => {
                std::thread::sleep(delay);
                write(bytes)?;
                Ok(bytes)
            }
            Behavior::Fail { after_bytes } => {
                write(after_bytes)?;
                Err(FetchError::Http(500))
            }
            Behavior::Hang { after_bytes } => {
                write(after_bytes)?;
                let started = Instant::now();
                while started.elapsed() < HANG_LIMIT {
                    if abort.load(Ordering::Relaxed) {
                        self.aborted.fetch_add(1, Ordering::SeqCst);
                        return Err(FetchError::Aborted);
                    }
                    std::thread::sleep(Duration::from_millis(5));
                }
                Err(FetchError::Http(504))
            }
            Behavior::Trickle { chunks, every } => {
                for _ in 0..chunks {
                    if abort.load(Ordering::Relaxed) {
                        self.aborted.fetch_add(1, Ordering::SeqCst);
                        return Err(FetchError::Aborted);
                    }
                    write(1)?;
                    std::thread::sleep(every);
                }
                Ok(chunks)
            }
        }
    }
}

impl Fetcher for ScriptedFetcher {
    fn fetch_to_file(&self, url: &str, path: &Path, abort: &AtomicBool) -> Result<u64, FetchError> {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let behavior = self
            .script
            .get(url)
            .copied()
            .unwrap_or(Behavior::Succeed { bytes: 1 });
        let res = self.run(behavior, path, abort);

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        res
    }
}
