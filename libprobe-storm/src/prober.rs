use crate::http::create_http_client;
use crate::types::{Endpoint, ProbeConfig, ProbeResult, ProbeStatus};
use futures::stream::{self, Stream, StreamExt};
use reqwest::{Client, Method};
use std::time::Instant;
use tracing::debug;

pub struct Prober {
    client: Client,
    config: ProbeConfig,
}

impl Prober {
    pub fn new() -> Self {
        Self::with_config(ProbeConfig::default())
    }

    pub fn with_config(config: ProbeConfig) -> Self {
        let client = create_http_client(config.timeout);
        Self { client, config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Issue one probe and classify it.
    ///
    /// UP requires a status in [200, 300) and header latency under the
    /// configured threshold. Request construction failures, transport
    /// errors and timeouts all classify as DOWN; nothing escapes the cycle
    /// as an error.
    pub async fn probe_one(&self, endpoint: &Endpoint) -> ProbeResult {
        let start = Instant::now();
        let outcome = self.dispatch(endpoint).await;
        // Dispatch resolves when the response headers arrive, so this is
        // the latency the classification rule is defined over.
        let latency = start.elapsed();

        let status = match outcome {
            Ok(Ok(response)) => {
                let code = response.status();
                if !code.is_success() {
                    ProbeStatus::Down {
                        reason: format!("HTTP {}", code.as_u16()),
                    }
                } else if latency >= self.config.latency_threshold {
                    ProbeStatus::Down {
                        reason: format!("Latency {}ms over threshold", latency.as_millis()),
                    }
                } else {
                    ProbeStatus::Up
                }
            }
            Ok(Err(reason)) => ProbeStatus::Down { reason },
            Err(_) => ProbeStatus::Down {
                reason: "Timeout".to_string(),
            },
        };

        debug!(
            name = %endpoint.name,
            url = %endpoint.url,
            latency_ms = latency.as_millis() as u64,
            up = status.is_up(),
            "probe finished"
        );

        ProbeResult {
            name: endpoint.name.clone(),
            url: endpoint.url.clone(),
            status,
            latency,
        }
    }

    async fn dispatch(
        &self,
        endpoint: &Endpoint,
    ) -> Result<Result<reqwest::Response, String>, tokio::time::error::Elapsed> {
        let method = match Method::from_bytes(endpoint.method.as_bytes()) {
            Ok(method) => method,
            Err(_) => {
                return Ok(Err(format!("Invalid method: {}", endpoint.method)));
            }
        };

        let mut request = self.client.request(method, &endpoint.url);
        for (key, value) in &endpoint.headers {
            request = request.header(key, value);
        }
        if !endpoint.body.is_empty() {
            request = request.body(endpoint.body.clone());
        }

        tokio::time::timeout(self.config.timeout, request.send())
            .await
            .map(|sent| sent.map_err(|e| format!("Request failed: {e}")))
    }

    /// Probe every endpoint with a bounded number in flight. Results
    /// arrive in completion order.
    pub fn probe_stream<'a>(
        &'a self,
        endpoints: &'a [Endpoint],
    ) -> impl Stream<Item = ProbeResult> + 'a {
        stream::iter(endpoints)
            .map(move |endpoint| self.probe_one(endpoint))
            .buffer_unordered(self.config.max_concurrent)
    }
}

impl Default for Prober {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for Prober {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            config: self.config.clone(),
        }
    }
}
