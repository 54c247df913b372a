//! CLI for bfetch.

mod commands;

use anyhow::Result;
use bfetch_core::config::{self, BfetchConfig};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_batch, run_list};

/// Top-level CLI for bfetch.
#[derive(Debug, Parser)]
#[command(name = "bfetch")]
#[command(about = "bfetch: bounded concurrent bulk downloader with stall detection", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/bfetch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Download every URL in the list, logging each outcome.
    Run {
        /// Newline-delimited URL list (default from config: links.txt).
        #[arg(long, value_name = "PATH")]
        links: Option<PathBuf>,
        /// Maximum simultaneous downloads.
        #[arg(short = 'n', long, value_name = "N")]
        threads: Option<usize>,
        /// Stall-check interval in milliseconds; a file that does not grow between two checks is abandoned.
        #[arg(long, value_name = "MS")]
        stall_ms: Option<u64>,
        /// Directory to save files into.
        #[arg(short = 'o', long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
        /// Log of successfully downloaded URLs.
        #[arg(long, value_name = "PATH")]
        completed_log: Option<PathBuf>,
        /// Log of failed or stalled URLs.
        #[arg(long, value_name = "PATH")]
        failed_log: Option<PathBuf>,
    },

    /// Show the work list and where each URL would be saved, without downloading.
    List {
        /// Newline-delimited URL list (default from config: links.txt).
        #[arg(long, value_name = "PATH")]
        links: Option<PathBuf>,
        /// Directory files would be saved into.
        #[arg(short = 'o', long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = match &cli.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        cli.command.apply_overrides(&mut cfg);
        tracing::debug!("effective config: {:?}", cfg);

        match cli.command {
            CliCommand::Run { .. } => run_batch(&cfg).await?,
            CliCommand::List { .. } => run_list(&cfg).await?,
        }
        Ok(())
    }

    /// Command-line flags win over the config file for this invocation.
    pub fn apply_overrides(&self, cfg: &mut BfetchConfig) {
        match self {
            CliCommand::Run {
                links,
                threads,
                stall_ms,
                output_dir,
                completed_log,
                failed_log,
            } => {
                if let Some(p) = links {
                    cfg.links_file = p.clone();
                }
                if let Some(n) = threads {
                    cfg.threads = *n;
                }
                if let Some(ms) = stall_ms {
                    cfg.stall_interval_ms = *ms;
                }
                if let Some(p) = output_dir {
                    cfg.output_dir = p.clone();
                }
                if let Some(p) = completed_log {
                    cfg.completed_log = p.clone();
                }
                if let Some(p) = failed_log {
                    cfg.failed_log = p.clone();
                }
            }
            CliCommand::List { links, output_dir } => {
                if let Some(p) = links {
                    cfg.links_file = p.clone();
                }
                if let Some(p) = output_dir {
                    cfg.output_dir = p.clone();
                }
            }
        }
    }
}

#[cfg(test)]
mod tests;
