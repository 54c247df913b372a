//! Progress reporting from the coordinator to its caller.
//!
//! Events are emitted in the order the coordinator handles them, so a
//! consumer sees `Started` for index `k` before `Started` for `k + 1`, and
//! exactly one `Finished` as the last event of a run.

use crate::outcome::Outcome;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchedulerEvent {
    /// Item `index` was dispatched.
    Started { index: usize, url: String },
    /// Item `index` reached a terminal outcome and has been logged.
    Completed {
        index: usize,
        url: String,
        outcome: Outcome,
    },
    /// All items are accounted for.
    Finished(RunSummary),
}

/// Tally of one run; `completed() == total` once the run has finished.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl RunSummary {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            ..Self::default()
        }
    }

    pub fn record(&mut self, outcome: &Outcome) {
        if outcome.is_success() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }

    /// Items with a terminal outcome so far.
    pub fn completed(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn is_complete(&self) -> bool {
        self.completed() == self.total
    }
}
