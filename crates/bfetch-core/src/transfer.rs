//! One item's transfer: fetch raced against its stall watch.
//!
//! The fetch runs on the blocking pool; the watch runs on the async side. The
//! first to finish decides the outcome and the other is cancelled explicitly:
//! a finished fetch drops the watch (and its timer), a stall raises the abort
//! flag and then waits for the fetch to hand back its connection and file.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::fetch::{FetchError, Fetcher};
use crate::outcome::{FailureReason, Outcome};
use crate::stall::{self, StallWatch};
use crate::storage;

/// A dispatched work item. Lives from dispatch until its outcome is logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransferTicket {
    pub index: usize,
    pub url: String,
    /// Output file: the URL's basename under the output directory.
    pub path: PathBuf,
}

/// Runs tickets with a shared fetcher. Cheap to clone into per-item tasks.
#[derive(Clone)]
pub struct TransferRunner {
    fetcher: Arc<dyn Fetcher>,
    stall_interval: Duration,
}

impl std::fmt::Debug for TransferRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransferRunner")
            .field("stall_interval", &self.stall_interval)
            .finish_non_exhaustive()
    }
}

impl TransferRunner {
    /// A zero `stall_interval` is raised to [`stall::MIN_INTERVAL`].
    pub fn new(fetcher: Arc<dyn Fetcher>, stall_interval: Duration) -> Self {
        Self {
            fetcher,
            stall_interval: stall_interval.max(stall::MIN_INTERVAL),
        }
    }

    pub fn stall_interval(&self) -> Duration {
        self.stall_interval
    }

    /// Transfers `ticket` to completion and returns its outcome.
    ///
    /// Never returns an error: transport failures, stalls and a crashed fetch
    /// task all become [`Outcome::Failure`], after the partial file is removed.
    pub async fn run(&self, ticket: &TransferTicket) -> Outcome {
        let abort = Arc::new(AtomicBool::new(false));
        // Raised on every exit from this future, including cancellation and unwinding.
        let _cancel = AbortOnDrop(Arc::clone(&abort));
        let mut fetch = {
            let fetcher = Arc::clone(&self.fetcher);
            let url = ticket.url.clone();
            let path = ticket.path.clone();
            let abort = Arc::clone(&abort);
            tokio::task::spawn_blocking(move || fetcher.fetch_to_file(&url, &path, &abort))
        };
        let watch = StallWatch::new(ticket.path.clone(), ticket.index, self.stall_interval);

        let outcome = tokio::select! {
            biased;

            joined = &mut fetch => fetch_outcome(joined),
            size = watch.wait_for_stall() => {
                tracing::warn!(index = ticket.index, url = %ticket.url, size, "transfer stalled, aborting");
                abort.store(true, Ordering::Relaxed);
                match fetch.await {
                    Ok(Err(FetchError::Aborted)) => {}
                    Ok(res) => tracing::debug!(index = ticket.index, ?res, "fetch ended after stall"),
                    Err(e) => tracing::warn!(index = ticket.index, "fetch task failed after abort: {}", e),
                }
                Outcome::Failure(FailureReason::Stalled { size })
            }
        };

        if let Outcome::Failure(reason) = &outcome {
            tracing::warn!(index = ticket.index, url = %ticket.url, %reason, "transfer failed");
            storage::remove_partial(&ticket.path).await;
        }
        outcome
    }
}

/// Raises the abort flag when dropped.
struct AbortOnDrop(Arc<AtomicBool>);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

fn fetch_outcome(joined: Result<Result<u64, FetchError>, tokio::task::JoinError>) -> Outcome {
    match joined {
        Ok(Ok(bytes)) => Outcome::Success { bytes },
        Ok(Err(e)) => Outcome::Failure(FailureReason::Transport(e.to_string())),
        Err(e) => Outcome::Failure(FailureReason::Crashed(e.to_string())),
    }
}
