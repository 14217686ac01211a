use reqwest::Client;
use std::time::Duration;

/// Shared client for all probes. The configured timeout bounds every
/// request issued through it; connections are pooled per host across
/// cycles.
pub fn create_http_client(timeout: Duration) -> Client {
    Client::builder()
        .timeout(timeout)
        .pool_max_idle_per_host(10)
        .tcp_nodelay(true)
        .use_rustls_tls()
        .build()
        .expect("Failed to create HTTP client")
}
