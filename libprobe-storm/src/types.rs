use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// One HTTP probe target, as declared in the endpoint file.
///
/// Immutable after loading. `method` falls back to GET when the record
/// omits it; no other field is defaulted or validated.
#[derive(Debug, Clone, Deserialize)]
pub struct Endpoint {
    pub name: String,
    pub url: String,
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub headers: HashMap<String, String>,
    #[serde(default)]
    pub body: String,
}

fn default_method() -> String {
    "GET".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeStatus {
    Up,
    Down { reason: String },
}

impl ProbeStatus {
    pub fn is_up(&self) -> bool {
        matches!(self, ProbeStatus::Up)
    }

    pub fn is_down(&self) -> bool {
        matches!(self, ProbeStatus::Down { .. })
    }
}

#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub name: String,
    pub url: String,
    pub status: ProbeStatus,
    pub latency: Duration,
}

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// Per-request timeout.
    pub timeout: Duration,
    /// A probe is UP only if the response headers arrive under this bound.
    pub latency_threshold: Duration,
    /// Period between cycles.
    pub interval: Duration,
    /// In-flight probe bound within a cycle.
    pub max_concurrent: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(1),
            latency_threshold: Duration::from_millis(500),
            interval: Duration::from_secs(15),
            max_concurrent: 10,
        }
    }
}
