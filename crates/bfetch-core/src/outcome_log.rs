//! Durable per-run record of outcomes: one append-only file for completed URLs
//! and one for failed URLs, one URL per line in completion order.

use std::io;
use std::path::PathBuf;

use tokio::io::AsyncWriteExt;

use crate::outcome::Outcome;
use crate::storage;

#[derive(Debug, Clone)]
pub struct OutcomeLogger {
    completed: PathBuf,
    failed: PathBuf,
}

impl OutcomeLogger {
    pub fn new(completed: impl Into<PathBuf>, failed: impl Into<PathBuf>) -> Self {
        Self {
            completed: completed.into(),
            failed: failed.into(),
        }
    }

    #[cfg(test)]
    pub(crate) fn completed_path(&self) -> &std::path::Path {
        &self.completed
    }

    #[cfg(test)]
    pub(crate) fn failed_path(&self) -> &std::path::Path {
        &self.failed
    }

    /// Creates the directories holding both log files.
    pub async fn prepare(&self) -> io::Result<()> {
        storage::ensure_parent_dir(&self.completed).await?;
        storage::ensure_parent_dir(&self.failed).await
    }

    /// Appends `url` to the log matching `outcome`.
    ///
    /// Callers must serialize calls; lines are written with a single append
    /// each but nothing here orders concurrent writers.
    pub async fn record(&self, outcome: &Outcome, url: &str) -> io::Result<()> {
        let path = if outcome.is_success() {
            &self.completed
        } else {
            &self.failed
        };
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .await?;
        let mut line = String::with_capacity(url.len() + 1);
        line.push_str(url);
        line.push('\n');
        file.write_all(line.as_bytes()).await?;
        file.flush().await
    }
}
