//! Abstractions for device HTTP access to enable testing and mocking.
//!
//! The `HttpFetch` trait lets the collector run against real devices
//! through [`ReqwestFetcher`] or against an in-memory [`MockHttp`]
//! implementation in tests.
//!
//! [`MockHttp`]: crate::collector::mock::MockHttp

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use url::Url;

/// Error type for a single device fetch.
///
/// Fetch errors and value-conversion errors are deliberately separate
/// kinds: a fetch failure on a configured path is expected on models
/// that lack the endpoint and does not degrade the device's result
/// code, while a conversion failure does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// The request could not be constructed.
    RequestBuild(String),
    /// The network call itself failed (connect, TLS, timeout, ...).
    Transport(String),
    /// The device answered with a non-OK HTTP status.
    Status(u16),
    /// The response body could not be read in full.
    BodyRead(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::RequestBuild(msg) => write!(f, "request: {}", msg),
            FetchError::Transport(msg) => write!(f, "response: {}", msg),
            FetchError::Status(code) => write!(f, "status: {}", code),
            FetchError::BodyRead(msg) => write!(f, "read body: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}

/// Abstraction for issuing a GET to a fully-formed device URL.
///
/// Implementations must be shareable across the per-device collection
/// threads; the collector never retries through this trait.
pub trait HttpFetch: Send + Sync {
    /// Performs a GET and returns the raw response body bytes.
    fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError>;
}

/// Real HTTP fetcher backed by a shared `reqwest` blocking client.
///
/// TLS certificate verification is disabled: Lightware devices ship
/// with self-signed certificates and operators rarely replace them.
/// That trade-off is accepted here once, explicitly, instead of being
/// configurable per device.
#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: Client,
}

impl ReqwestFetcher {
    /// Creates a fetcher with the given per-request timeout.
    pub fn new(timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(timeout)
            .danger_accept_invalid_certs(true)
            .build()
            .map_err(|e| FetchError::RequestBuild(e.to_string()))?;
        Ok(Self { client })
    }
}

impl HttpFetch for ReqwestFetcher {
    fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        // Credentials ride in the device URL's user-info component;
        // send them as a Basic header and strip them from the target.
        let username = url.username().to_string();
        let password = url.password().map(str::to_string);

        let mut target = url.clone();
        if !username.is_empty() || password.is_some() {
            target
                .set_username("")
                .map_err(|_| FetchError::RequestBuild("cannot clear username".to_string()))?;
            target
                .set_password(None)
                .map_err(|_| FetchError::RequestBuild("cannot clear password".to_string()))?;
        }

        let mut request = self.client.get(target);
        if !username.is_empty() || password.is_some() {
            request = request.basic_auth(username, password);
        }

        let response = request
            .send()
            .map_err(|e| FetchError::Transport(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(FetchError::Status(response.status().as_u16()));
        }

        let body = response
            .bytes()
            .map_err(|e| FetchError::BodyRead(e.to_string()))?;
        Ok(body.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        assert_eq!(FetchError::Status(404).to_string(), "status: 404");
        assert_eq!(
            FetchError::Transport("connection refused".to_string()).to_string(),
            "response: connection refused"
        );
    }

    #[test]
    fn test_fetcher_builds_with_timeout() {
        let fetcher = ReqwestFetcher::new(Duration::from_secs(5));
        assert!(fetcher.is_ok());
    }
}
