//! Stall detection by periodic size sampling of a transfer's output file.
//!
//! A transfer is stalled when two consecutive samples, one interval apart,
//! report the same size. A missing file samples as 0 bytes. The first sample
//! only establishes a baseline, so the earliest possible stall is at the end
//! of the second interval.

use std::path::PathBuf;
use std::time::Duration;

use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::storage;

/// Shortest sampling period; a zero interval is raised to this.
pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

/// Result of feeding one size sample to a [`StallWatch`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sample {
    /// First sample; nothing to compare against yet.
    Baseline,
    /// Size differs from the previous sample.
    Progressed,
    /// Size equals the previous sample.
    Unchanged,
}

/// Per-ticket watcher. Owns the last observed size; nothing is shared between tickets.
///
/// Dropping the future returned by [`StallWatch::wait_for_stall`] cancels the
/// watch and its timer.
#[derive(Debug)]
pub struct StallWatch {
    path: PathBuf,
    index: usize,
    interval: Duration,
    last_observed_size: Option<u64>,
}

impl StallWatch {
    pub fn new(path: PathBuf, index: usize, interval: Duration) -> Self {
        Self {
            path,
            index,
            interval: interval.max(MIN_INTERVAL),
            last_observed_size: None,
        }
    }

    #[cfg(test)]
    pub(crate) fn last_observed_size(&self) -> Option<u64> {
        self.last_observed_size
    }

    /// Records `size` and compares it with the previous sample.
    pub fn observe(&mut self, size: u64) -> Sample {
        match self.last_observed_size.replace(size) {
            None => Sample::Baseline,
            Some(prev) if prev == size => Sample::Unchanged,
            Some(_) => Sample::Progressed,
        }
    }

    /// Samples the file every interval and resolves with the repeated size once
    /// the transfer is stalled. Never resolves for a transfer that keeps growing.
    pub async fn wait_for_stall(mut self) -> u64 {
        let mut ticker = interval_at(Instant::now() + self.interval, self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            let size = storage::file_size(&self.path).await.unwrap_or(0);
            let sample = self.observe(size);
            tracing::debug!(index = self.index, size, ?sample, "stall check");
            if sample == Sample::Unchanged {
                return size;
            }
        }
    }
}
