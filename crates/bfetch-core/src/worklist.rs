//! The ordered, immutable list of URLs a run works through.

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WorkListError {
    #[error("cannot read URL list {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// URLs in list order, 0-indexed. Never contains blank entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorkList {
    urls: Vec<String>,
}

impl WorkList {
    /// Parses newline-delimited text, trimming each line and dropping blanks.
    pub fn parse(text: &str) -> Self {
        let urls = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect();
        Self { urls }
    }

    /// Reads and parses the list at `path`. An unreadable list is fatal for the run.
    pub async fn load(path: &Path) -> Result<Self, WorkListError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| WorkListError::Read {
                path: path.to_path_buf(),
                source,
            })?;
        let list = Self::parse(&text);
        tracing::debug!(path = %path.display(), count = list.len(), "loaded URL list");
        Ok(list)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.urls.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for WorkList {
    /// Builds a list from already-split entries; blanks are still dropped.
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let urls = iter
            .into_iter()
            .map(Into::into)
            .filter(|u: &String| !u.trim().is_empty())
            .collect();
        Self { urls }
    }
}
