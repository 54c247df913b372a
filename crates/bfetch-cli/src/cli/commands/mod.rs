//! CLI command handlers, one per file.

mod list;
mod run;

pub use list::run_list;
pub use run::run_batch;
