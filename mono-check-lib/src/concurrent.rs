//! Concurrent fan-out of site probes.
//!
//! Every qualifying file gets its own task. Tasks hand their report to a
//! single consumer over a capacity-1 channel, so a producer parks until the
//! previous report has been taken. A supervisor owns the task set and closes
//! the channel only after the last task has finished.

use crate::prober::SiteProber;
use crate::types::SiteStatusReport;
use crate::utils::extract_domain;
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, warn};

/// Closest tokio equivalent of an unbuffered rendezvous channel.
const RESULT_CHANNEL_CAPACITY: usize = 1;

/// Spawns one probe per site config file and streams the reports back.
#[derive(Clone, Debug)]
pub struct ConcurrentDispatcher {
    prober: SiteProber,
    prefix: Arc<str>,
    suffix: Arc<str>,
    /// Probes allowed in flight at once; `None` means one per file
    concurrency: Option<usize>,
}

impl ConcurrentDispatcher {
    /// Create a dispatcher stripping the given markers from file names.
    pub fn new(prober: SiteProber, prefix: &str, suffix: &str) -> Self {
        Self {
            prober,
            prefix: Arc::from(prefix),
            suffix: Arc::from(suffix),
            concurrency: None,
        }
    }

    /// Cap the number of probes in flight. Zero is clamped to one.
    pub fn with_concurrency(mut self, concurrency: Option<usize>) -> Self {
        self.concurrency = concurrency.map(|n| n.max(1));
        self
    }

    /// Probe every file concurrently.
    ///
    /// Returns the receiving end of the result channel. Exactly one report
    /// arrives per file, in completion order, and the channel closes once
    /// all probes are done. Must be called from within a Tokio runtime.
    pub fn dispatch(&self, files: Vec<String>) -> mpsc::Receiver<SiteStatusReport> {
        let (tx, rx) = mpsc::channel(RESULT_CHANNEL_CAPACITY);
        let limiter = self.concurrency.map(|n| Arc::new(Semaphore::new(n)));
        let mut tasks = JoinSet::new();

        debug!(
            files = files.len(),
            concurrency = ?self.concurrency,
            "dispatching site probes"
        );

        for file in files {
            let tx = tx.clone();
            let prober = self.prober.clone();
            let prefix = Arc::clone(&self.prefix);
            let suffix = Arc::clone(&self.suffix);
            let limiter = limiter.clone();

            tasks.spawn(async move {
                let _permit = match limiter {
                    Some(semaphore) => semaphore.acquire_owned().await.ok(),
                    None => None,
                };

                let domain = extract_domain(&file, &prefix, &suffix);
                debug!(file = %file, domain = %domain, "probing site");
                let report = prober.probe(&domain).await;

                // Only fails when the consumer has gone away
                let _ = tx.send(report).await;
            });
        }

        tokio::spawn(async move {
            while let Some(joined) = tasks.join_next().await {
                if let Err(e) = joined {
                    warn!(error = %e, "site probe task did not complete");
                }
            }
            // Last sender; dropping it closes the channel
            drop(tx);
        });

        rx
    }
}

/// Drain a result channel into arrival order.
///
/// Returns once the channel has been closed by the dispatcher.
pub async fn collect_reports(mut rx: mpsc::Receiver<SiteStatusReport>) -> Vec<SiteStatusReport> {
    let mut reports = Vec::new();
    while let Some(report) = rx.recv().await {
        reports.push(report);
    }
    reports
}
