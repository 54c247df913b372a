use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Default number of simultaneous transfers.
pub const DEFAULT_THREADS: usize = 4;
/// Default stall-check interval: two minutes.
pub const DEFAULT_STALL_INTERVAL_MS: u64 = 120_000;

/// Global configuration loaded from `~/.config/bfetch/config.toml`.
///
/// Relative paths are resolved against the working directory of the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BfetchConfig {
    /// Maximum number of transfers in flight at once (clamped to at least 1).
    pub threads: usize,
    /// Interval between two file-size samples of a transfer, in milliseconds.
    pub stall_interval_ms: u64,
    /// Newline-delimited list of URLs to fetch.
    pub links_file: PathBuf,
    /// Directory downloaded files are written to.
    pub output_dir: PathBuf,
    /// Append-only log of URLs that downloaded successfully.
    pub completed_log: PathBuf,
    /// Append-only log of URLs that failed or stalled.
    pub failed_log: PathBuf,
    /// Optional TCP connect timeout for each transfer (None = 30s).
    #[serde(default)]
    pub connect_timeout_secs: Option<u64>,
}

impl Default for BfetchConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            stall_interval_ms: DEFAULT_STALL_INTERVAL_MS,
            links_file: PathBuf::from("links.txt"),
            output_dir: PathBuf::from("downloads"),
            completed_log: PathBuf::from("logs/completed.txt"),
            failed_log: PathBuf::from("logs/errors.txt"),
            connect_timeout_secs: None,
        }
    }
}

impl BfetchConfig {
    /// Concurrency cap; a configured 0 still allows one transfer.
    pub fn concurrency(&self) -> usize {
        self.threads.max(1)
    }

    pub fn stall_interval(&self) -> Duration {
        Duration::from_millis(self.stall_interval_ms.max(1))
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs.unwrap_or(30))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bfetch")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<BfetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = BfetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file (e.g. `--config`).
pub fn load_from_path(path: &Path) -> Result<BfetchConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: BfetchConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
