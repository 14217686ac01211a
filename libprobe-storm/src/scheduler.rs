use crate::domain::{extract_domain, DomainError};
use crate::ledger::Ledger;
use crate::prober::Prober;
use crate::report;
use crate::types::{Endpoint, ProbeConfig};
use futures::StreamExt;
use std::future::Future;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Drives probe cycles over a fixed endpoint set until shutdown.
///
/// One cycle probes every endpoint, folds the results into the ledger and
/// prints the availability report. All results are folded where the stream
/// is consumed, so the ledger needs no locking even though probes run
/// concurrently.
pub struct Watcher {
    endpoints: Vec<Endpoint>,
    prober: Prober,
    ledger: Ledger,
}

impl Watcher {
    pub fn new(endpoints: Vec<Endpoint>) -> Result<Self, DomainError> {
        Self::with_config(endpoints, ProbeConfig::default())
    }

    /// Build the watcher and register every endpoint's domain in the
    /// ledger. A URL without a usable host is startup-fatal here, before
    /// any probing begins.
    pub fn with_config(endpoints: Vec<Endpoint>, config: ProbeConfig) -> Result<Self, DomainError> {
        let ledger = Ledger::for_endpoints(&endpoints)?;
        Ok(Self {
            endpoints,
            prober: Prober::with_config(config),
            ledger,
        })
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Probe every endpoint once and record the outcomes. Returns only
    /// after each probe has completed or definitively failed.
    pub async fn run_cycle(&mut self) {
        let mut results = self.prober.probe_stream(&self.endpoints);

        while let Some(result) = results.next().await {
            let up = result.status.is_up();
            let recorded = match extract_domain(&result.url) {
                Ok(domain) => self.ledger.record(&domain, up).map_err(|e| e.to_string()),
                Err(e) => Err(e.to_string()),
            };
            if let Err(error) = recorded {
                // Never guess a counter; drop the result instead.
                warn!(url = %result.url, %error, "probe result dropped");
            }
        }
    }

    /// Run cycles until the shutdown future resolves: one immediately,
    /// then one per interval tick. Shutdown wins whenever both events are
    /// ready, and a shutdown mid-cycle abandons the in-flight probes and
    /// suppresses that cycle's report.
    pub async fn run<F>(&mut self, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(self.prober.config().interval);
        // A cycle running past the interval skips the missed ticks rather
        // than bursting to catch up.
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
        tokio::pin!(shutdown);

        info!(
            endpoints = self.endpoints.len(),
            domains = self.ledger.domain_count(),
            interval_secs = self.prober.config().interval.as_secs(),
            "watcher started"
        );

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    debug!("interrupt received, stopping");
                    return;
                }
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                _ = &mut shutdown => {
                    debug!("interrupt received mid-cycle, abandoning in-flight probes");
                    return;
                }
                _ = self.run_cycle() => {
                    report::print(&self.ledger);
                }
            }
        }
    }
}
