//! `bfetch list` – dry run: show each URL and its output path.

use anyhow::{Context, Result};
use bfetch_core::config::BfetchConfig;
use bfetch_core::url_model;
use bfetch_core::worklist::WorkList;

pub async fn run_list(cfg: &BfetchConfig) -> Result<()> {
    let work = WorkList::load(&cfg.links_file)
        .await
        .context("could not load URL list")?;

    if work.is_empty() {
        println!("No URLs in {}.", cfg.links_file.display());
        return Ok(());
    }

    for (index, url) in work.iter().enumerate() {
        let path = url_model::output_path(&cfg.output_dir, url);
        println!("{:>5}  {} -> {}", index, url, path.display());
    }
    println!(
        "{} URL(s), up to {} at a time.",
        work.len(),
        cfg.concurrency().min(work.len())
    );
    Ok(())
}
