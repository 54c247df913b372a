//! `bfetch run` – download the whole list through the scheduler.

use anyhow::{Context, Result};
use bfetch_core::config::BfetchConfig;
use bfetch_core::fetch::CurlFetcher;
use bfetch_core::outcome::Outcome;
use bfetch_core::scheduler::{RunSummary, Scheduler, SchedulerEvent};
use bfetch_core::worklist::WorkList;
use std::sync::Arc;

pub async fn run_batch(cfg: &BfetchConfig) -> Result<()> {
    let work = WorkList::load(&cfg.links_file)
        .await
        .context("could not load URL list; nothing was downloaded")?;
    tracing::info!(
        count = work.len(),
        links = %cfg.links_file.display(),
        "starting run"
    );

    let fetcher = Arc::new(CurlFetcher::new(cfg.connect_timeout()));
    let (events_tx, mut events_rx) = tokio::sync::mpsc::unbounded_channel::<SchedulerEvent>();
    let printer = tokio::spawn(async move {
        while let Some(event) = events_rx.recv().await {
            print_event(&event);
        }
    });

    let summary = Scheduler::from_config(cfg, work, fetcher)
        .with_events(events_tx)
        .run()
        .await;
    printer.await.context("progress printer join")?;

    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "run completed"
    );
    Ok(())
}

fn print_event(event: &SchedulerEvent) {
    match event {
        SchedulerEvent::Started { url, .. } => println!("Downloading {}...", url),
        SchedulerEvent::Completed { url, outcome, .. } => match outcome {
            Outcome::Success { .. } => println!("Completed {}", url),
            Outcome::Failure(reason) => println!("Failed {}: {}", url, reason),
        },
        SchedulerEvent::Finished(summary) => println!("{}", completion_line(summary)),
    }
}

fn completion_line(summary: &RunSummary) -> String {
    if summary.total == 0 {
        return "Process completed (no URLs to download)".to_string();
    }
    format!(
        "Process completed ({} succeeded, {} failed)",
        summary.succeeded, summary.failed
    )
}
