//! Queue scheduler: a fixed-size active window over the work list.
//!
//! One coordinator task dispatches transfers in list order, receives their
//! outcomes over a channel one at a time, logs each outcome, and refills the
//! freed slot until every item is accounted for.

mod progress;
mod run;
mod window;

pub use progress::{RunSummary, SchedulerEvent};
pub use run::Scheduler;
pub use window::{Advance, WindowState};
