//! Tests for the run subcommand and its config overrides.

use super::parse;
use crate::cli::{Cli, CliCommand};
use bfetch_core::config::BfetchConfig;
use clap::Parser;
use std::path::{Path, PathBuf};

#[test]
fn cli_parse_run_defaults() {
    match parse(&["bfetch", "run"]) {
        CliCommand::Run {
            links,
            threads,
            stall_ms,
            output_dir,
            completed_log,
            failed_log,
        } => {
            assert!(links.is_none());
            assert!(threads.is_none());
            assert!(stall_ms.is_none());
            assert!(output_dir.is_none());
            assert!(completed_log.is_none());
            assert!(failed_log.is_none());
        }
        _ => panic!("expected Run"),
    }
}

#[test]
fn cli_parse_run_flags() {
    match parse(&[
        "bfetch",
        "run",
        "--links",
        "urls.txt",
        "-n",
        "8",
        "--stall-ms",
        "5000",
        "-o",
        "/tmp/out",
    ]) {
        CliCommand::Run {
            links,
            threads,
            stall_ms,
            output_dir,
            ..
        } => {
            assert_eq!(links.as_deref(), Some(Path::new("urls.txt")));
            assert_eq!(threads, Some(8));
            assert_eq!(stall_ms, Some(5000));
            assert_eq!(output_dir.as_deref(), Some(Path::new("/tmp/out")));
        }
        _ => panic!("expected Run with flags"),
    }
}

#[test]
fn cli_parse_global_config_after_subcommand() {
    let cli = Cli::try_parse_from(["bfetch", "run", "--config", "/etc/bfetch.toml"]).unwrap();
    assert_eq!(cli.config.as_deref(), Some(Path::new("/etc/bfetch.toml")));
}

#[test]
fn cli_rejects_non_numeric_threads() {
    assert!(Cli::try_parse_from(["bfetch", "run", "--threads", "many"]).is_err());
}

#[test]
fn run_overrides_replace_only_given_fields() {
    let mut cfg = BfetchConfig::default();
    parse(&[
        "bfetch",
        "run",
        "--threads",
        "2",
        "--failed-log",
        "bad.txt",
    ])
    .apply_overrides(&mut cfg);

    assert_eq!(cfg.threads, 2);
    assert_eq!(cfg.failed_log, PathBuf::from("bad.txt"));
    assert_eq!(cfg.stall_interval_ms, 120_000);
    assert_eq!(cfg.links_file, PathBuf::from("links.txt"));
    assert_eq!(cfg.completed_log, PathBuf::from("logs/completed.txt"));
}
