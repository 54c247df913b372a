//! Terminal classification of a work item.

use std::fmt;

/// Why an item ended up in the failure log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// The fetch itself reported an error (transport, HTTP status, local write).
    Transport(String),
    /// The output file stopped growing; `size` is the size seen on both samples.
    Stalled { size: u64 },
    /// The blocking fetch task panicked or was cancelled by the runtime.
    Crashed(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::Transport(msg) => write!(f, "{}", msg),
            FailureReason::Stalled { size } => write!(f, "stalled at {} bytes", size),
            FailureReason::Crashed(msg) => write!(f, "fetch task failed: {}", msg),
        }
    }
}

/// Success or failure of one item. Failures are never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Success { bytes: u64 },
    Failure(FailureReason),
}

impl Outcome {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success { .. })
    }
}
