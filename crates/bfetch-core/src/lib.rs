pub mod config;
pub mod logging;

pub mod fetch;
pub mod outcome;
pub mod outcome_log;
pub mod scheduler;
pub mod stall;
pub mod storage;
pub mod transfer;
pub mod url_model;
pub mod worklist;

#[cfg(test)]
pub(crate) mod testing;
