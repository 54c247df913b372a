//! Active-window accounting over the work list.
//!
//! Pure bookkeeping: which index to dispatch next and when the run is done.
//! Only the coordinator touches it, one completion at a time.

use std::ops::Range;

/// What the coordinator does after an item completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// A slot freed up and `index` is the next item in list order.
    Dispatch(usize),
    /// The list is exhausted; other items are still in flight.
    Drain,
    /// Every item has a terminal outcome.
    Finished,
}

#[derive(Debug, Clone)]
pub struct WindowState {
    total: usize,
    active_count: usize,
    next_index: usize,
    completed_count: usize,
    in_flight: usize,
}

impl WindowState {
    /// Window of `min(concurrency, total)` slots; a concurrency of 0 counts as 1.
    pub fn new(concurrency: usize, total: usize) -> Self {
        Self {
            total,
            active_count: concurrency.max(1).min(total),
            next_index: 0,
            completed_count: 0,
            in_flight: 0,
        }
    }

    /// Claims the initial window `0..active_count`. Empty for an empty list.
    pub fn initial_dispatch(&mut self) -> Range<usize> {
        debug_assert_eq!(self.next_index, 0, "initial window claimed twice");
        self.next_index = self.active_count;
        self.in_flight = self.active_count;
        0..self.active_count
    }

    /// Records one terminal outcome and decides what happens to the freed slot.
    pub fn complete(&mut self) -> Advance {
        if self.is_finished() {
            return Advance::Finished;
        }
        self.completed_count += 1;
        self.in_flight = self.in_flight.saturating_sub(1);

        if self.next_index < self.total {
            let index = self.next_index;
            self.next_index += 1;
            self.in_flight += 1;
            Advance::Dispatch(index)
        } else if self.is_finished() {
            Advance::Finished
        } else {
            Advance::Drain
        }
    }

    pub fn is_finished(&self) -> bool {
        self.completed_count == self.total
    }

    #[cfg(test)]
    pub(crate) fn total(&self) -> usize {
        self.total
    }

    pub fn active_count(&self) -> usize {
        self.active_count
    }

    #[cfg(test)]
    pub(crate) fn next_index(&self) -> usize {
        self.next_index
    }

    #[cfg(test)]
    pub(crate) fn completed_count(&self) -> usize {
        self.completed_count
    }

    #[cfg(test)]
    pub(crate) fn in_flight(&self) -> usize {
        self.in_flight
    }
}
