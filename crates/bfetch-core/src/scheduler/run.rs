//! The coordinator loop.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::config::BfetchConfig;
use crate::fetch::Fetcher;
use crate::outcome::{FailureReason, Outcome};
use crate::outcome_log::OutcomeLogger;
use crate::storage;
use crate::transfer::{TransferRunner, TransferTicket};
use crate::url_model;
use crate::worklist::WorkList;

use super::progress::{RunSummary, SchedulerEvent};
use super::window::{Advance, WindowState};

/// Message from a transfer task back to the coordinator.
#[derive(Debug)]
struct Completion {
    index: usize,
    url: String,
    outcome: Outcome,
}

/// Drives one run over a work list.
///
/// Dispatches at most `concurrency` transfers at once in list order, logs every
/// outcome before refilling the slot it freed, and finishes once each item has
/// exactly one outcome. Per-item failures never stop the run.
pub struct Scheduler {
    work: WorkList,
    window: WindowState,
    runner: TransferRunner,
    logger: OutcomeLogger,
    output_dir: PathBuf,
    events: Option<mpsc::UnboundedSender<SchedulerEvent>>,
}

impl Scheduler {
    pub fn new(
        concurrency: usize,
        work: WorkList,
        runner: TransferRunner,
        logger: OutcomeLogger,
        output_dir: impl Into<PathBuf>,
    ) -> Self {
        let window = WindowState::new(concurrency, work.len());
        Self {
            work,
            window,
            runner,
            logger,
            output_dir: output_dir.into(),
            events: None,
        }
    }

    /// Builds a scheduler from configuration: concurrency, stall interval,
    /// output directory and both log paths.
    pub fn from_config(cfg: &BfetchConfig, work: WorkList, fetcher: Arc<dyn Fetcher>) -> Self {
        Self::new(
            cfg.concurrency(),
            work,
            TransferRunner::new(fetcher, cfg.stall_interval()),
            OutcomeLogger::new(&cfg.completed_log, &cfg.failed_log),
            &cfg.output_dir,
        )
    }

    /// Sends progress events to `tx` for the rest of the run.
    ///
    /// Events are best-effort: sending never waits on the receiver, and a
    /// dropped receiver only silences them. The run advances either way.
    pub fn with_events(mut self, tx: mpsc::UnboundedSender<SchedulerEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    /// Number of slots in the active window.
    pub fn concurrency(&self) -> usize {
        self.window.active_count()
    }

    /// Runs until every item has a terminal outcome and returns the tally.
    ///
    /// The returned summary (and the final `Finished` event) is the run's only
    /// completion signal. An empty work list finishes at once without
    /// dispatching, creating directories, or writing logs.
    pub async fn run(mut self) -> RunSummary {
        let mut summary = RunSummary::new(self.work.len());
        if self.window.is_finished() {
            tracing::info!("work list is empty, nothing to do");
            self.emit(SchedulerEvent::Finished(summary.clone()));
            return summary;
        }

        self.prepare_dirs().await;
        for (index, first) in url_model::shared_filenames(self.work.iter()) {
            tracing::warn!(
                index,
                first,
                url = self.work.get(index).unwrap_or_default(),
                "output filename already used by an earlier URL; files will overwrite each other"
            );
        }
        tracing::info!(
            total = self.work.len(),
            concurrency = self.window.active_count(),
            stall_interval_ms = self.runner.stall_interval().as_millis() as u64,
            "run started"
        );

        let (done_tx, mut done_rx) = mpsc::channel::<Completion>(self.window.active_count());
        for index in self.window.initial_dispatch() {
            self.dispatch(index, &done_tx);
        }

        while let Some(done) = done_rx.recv().await {
            // Logged before the slot is reused so the window never moves past an unlogged item.
            if let Err(e) = self.logger.record(&done.outcome, &done.url).await {
                tracing::warn!(index = done.index, url = %done.url, "could not append outcome log: {}", e);
            }
            summary.record(&done.outcome);
            tracing::info!(
                index = done.index,
                success = done.outcome.is_success(),
                completed = summary.completed(),
                total = summary.total,
                "item finished"
            );
            self.emit(SchedulerEvent::Completed {
                index: done.index,
                url: done.url,
                outcome: done.outcome,
            });

            match self.window.complete() {
                Advance::Dispatch(next) => self.dispatch(next, &done_tx),
                Advance::Drain => {}
                Advance::Finished => break,
            }
        }

        tracing::info!(
            succeeded = summary.succeeded,
            failed = summary.failed,
            "run finished"
        );
        self.emit(SchedulerEvent::Finished(summary.clone()));
        summary
    }

    async fn prepare_dirs(&self) {
        if let Err(e) = storage::ensure_dir(&self.output_dir).await {
            tracing::warn!(dir = %self.output_dir.display(), "could not create output directory: {}", e);
        }
        if let Err(e) = self.logger.prepare().await {
            tracing::warn!("could not create log directory: {}", e);
        }
    }

    /// Starts the transfer for `index` on its own task. The task always reports
    /// back exactly once, even if the transfer future panics.
    fn dispatch(&self, index: usize, done_tx: &mpsc::Sender<Completion>) {
        let Some(url) = self.work.get(index) else {
            return;
        };
        let ticket = TransferTicket {
            index,
            url: url.to_string(),
            path: url_model::output_path(&self.output_dir, url),
        };
        tracing::debug!(index, url = %ticket.url, path = %ticket.path.display(), "dispatch");
        self.emit(SchedulerEvent::Started {
            index,
            url: ticket.url.clone(),
        });

        let runner = self.runner.clone();
        let url = ticket.url.clone();
        let transfer = tokio::spawn(async move { runner.run(&ticket).await });
        let done_tx = done_tx.clone();
        tokio::spawn(async move {
            let outcome = transfer
                .await
                .unwrap_or_else(|e| Outcome::Failure(FailureReason::Crashed(e.to_string())));
            let _ = done_tx.send(Completion { index, url, outcome }).await;
        });
    }

    fn emit(&self, event: SchedulerEvent) {
        if let Some(tx) = &self.events {
            if tx.send(event).is_err() {
                tracing::debug!("progress receiver dropped, event discarded");
            }
        }
    }
}
