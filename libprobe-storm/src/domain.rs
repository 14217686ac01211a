use reqwest::Url;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Malformed URL: {0}")]
    Malformed(String),
    #[error("URL has no host: {0}")]
    NoHost(String),
}

/// Extract the host component of an endpoint URL, the key statistics are
/// grouped under. An explicit non-default port stays part of the key, so
/// `a.com:8080` and `a.com` are tracked separately.
///
/// Endpoint URLs are validated at startup, so a failure here after that
/// point indicates a logic error upstream; it is surfaced, never defaulted.
pub fn extract_domain(target: &str) -> Result<String, DomainError> {
    let url = Url::parse(target).map_err(|_| DomainError::Malformed(target.to_string()))?;
    let host = url
        .host_str()
        .ok_or_else(|| DomainError::NoHost(target.to_string()))?;
    Ok(match url.port() {
        Some(port) => format!("{host}:{port}"),
        None => host.to_string(),
    })
}
