mod domain;
mod http;
mod ledger;
mod prober;
pub mod report;
mod scheduler;
mod types;

pub use domain::{extract_domain, DomainError};
pub use ledger::{DomainStats, Ledger, LedgerError};
pub use prober::Prober;
pub use scheduler::Watcher;
pub use types::{Endpoint, ProbeConfig, ProbeResult, ProbeStatus};

use futures::StreamExt;

/// Probe a single endpoint once with the default configuration.
pub async fn probe(endpoint: &Endpoint) -> ProbeResult {
    Prober::new().probe_one(endpoint).await
}

/// Probe every endpoint once, with bounded concurrency. Results are in
/// completion order.
pub async fn probe_all(endpoints: &[Endpoint]) -> Vec<ProbeResult> {
    Prober::new().probe_stream(endpoints).collect().await
}
