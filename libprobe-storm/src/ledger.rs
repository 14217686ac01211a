use crate::domain::{extract_domain, DomainError};
use crate::types::Endpoint;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Domain not registered: {0}")]
    UnknownDomain(String),
}

/// Cumulative probe counters for one domain, since process start.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DomainStats {
    pub total_requests: u64,
    pub up_requests: u64,
}

impl DomainStats {
    /// Availability percentage, rounded half away from zero.
    pub fn percentage(&self) -> u8 {
        if self.total_requests == 0 {
            return 0;
        }
        (self.up_requests as f64 / self.total_requests as f64 * 100.0).round() as u8
    }
}

/// Per-domain availability counters with a key set fixed at construction.
///
/// The keys are derived from the configured endpoints exactly once, before
/// the first cycle. Recording against a domain outside that set is an
/// error; entries are never inserted or removed mid-run.
#[derive(Debug)]
pub struct Ledger {
    stats: BTreeMap<String, DomainStats>,
}

impl Ledger {
    /// Register one zero-valued entry per distinct domain. A URL that does
    /// not yield a domain is startup-fatal and propagates.
    pub fn for_endpoints(endpoints: &[Endpoint]) -> Result<Self, DomainError> {
        let mut stats = BTreeMap::new();
        for endpoint in endpoints {
            stats.entry(extract_domain(&endpoint.url)?).or_default();
        }
        Ok(Self { stats })
    }

    pub fn record(&mut self, domain: &str, up: bool) -> Result<(), LedgerError> {
        let stat = self
            .stats
            .get_mut(domain)
            .ok_or_else(|| LedgerError::UnknownDomain(domain.to_string()))?;
        stat.total_requests += 1;
        if up {
            stat.up_requests += 1;
        }
        Ok(())
    }

    pub fn get(&self, domain: &str) -> Option<DomainStats> {
        self.stats.get(domain).copied()
    }

    pub fn domain_count(&self) -> usize {
        self.stats.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Current `(domain, percentage)` pairs. BTreeMap iteration yields the
    /// lexicographic order the report requires.
    pub fn snapshot(&self) -> Vec<(String, u8)> {
        self.stats
            .iter()
            .map(|(domain, stat)| (domain.clone(), stat.percentage()))
            .collect()
    }
}
