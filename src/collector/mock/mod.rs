//! In-memory mock device for testing collectors without real hardware.
//!
//! `MockHttp` answers fetches from a canned table keyed by host and
//! path, records every request it sees, and can delay all responses
//! for a given host to simulate a slow device.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use url::Url;

use crate::collector::traits::{FetchError, HttpFetch};

/// In-memory HTTP responder for tests.
///
/// Unknown host/path combinations answer 404, which mirrors how a real
/// device reacts to a path its model does not expose.
#[derive(Debug, Default)]
pub struct MockHttp {
    /// (host, path) -> canned response.
    responses: HashMap<(String, String), Result<Vec<u8>, FetchError>>,
    /// host -> artificial latency applied to every response.
    delays: HashMap<String, Duration>,
    /// Every request seen, as "host path", in arrival order.
    requests: Mutex<Vec<String>>,
}

impl MockHttp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a 200 response with the given body.
    pub fn with_body(mut self, host: &str, path: &str, body: &str) -> Self {
        self.responses.insert(
            (host.to_string(), path.to_string()),
            Ok(body.as_bytes().to_vec()),
        );
        self
    }

    /// Adds a non-OK status response.
    pub fn with_status(mut self, host: &str, path: &str, status: u16) -> Self {
        self.responses.insert(
            (host.to_string(), path.to_string()),
            Err(FetchError::Status(status)),
        );
        self
    }

    /// Adds a transport-level failure.
    pub fn with_transport_error(mut self, host: &str, path: &str) -> Self {
        self.responses.insert(
            (host.to_string(), path.to_string()),
            Err(FetchError::Transport("connection refused".to_string())),
        );
        self
    }

    /// Adds the three well-known identity endpoints for a host.
    pub fn with_identity(self, host: &str, product: &str, mac: &str, label: &str) -> Self {
        self.with_body(host, "/api/ProductName", product)
            .with_body(host, "/api/V1/MANAGEMENT/UID/MACADDRESS/Main", mac)
            .with_body(host, "/api/V1/MANAGEMENT/LABEL/DeviceLabel", label)
    }

    /// Delays every response from the given host.
    pub fn with_delay(mut self, host: &str, delay: Duration) -> Self {
        self.delays.insert(host.to_string(), delay);
        self
    }

    /// Returns every request seen so far, as "host path" strings.
    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().expect("mock lock poisoned").clone()
    }

    /// Returns the requests seen for one host, paths only.
    pub fn requests_for(&self, host: &str) -> Vec<String> {
        let prefix = format!("{} ", host);
        self.requests()
            .into_iter()
            .filter_map(|r| r.strip_prefix(&prefix).map(str::to_string))
            .collect()
    }
}

impl HttpFetch for MockHttp {
    fn get(&self, url: &Url) -> Result<Vec<u8>, FetchError> {
        let host = url.host_str().unwrap_or_default().to_string();
        let path = url.path().to_string();

        self.requests
            .lock()
            .expect("mock lock poisoned")
            .push(format!("{} {}", host, path));

        if let Some(delay) = self.delays.get(&host) {
            std::thread::sleep(*delay);
        }

        match self.responses.get(&(host, path)) {
            Some(response) => response.clone(),
            None => Err(FetchError::Status(404)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_answers_canned_bodies() {
        let mock = MockHttp::new().with_body("10.0.0.2", "/api/ProductName", "MX2-8x8");
        let url = Url::parse("http://10.0.0.2/api/ProductName").unwrap();

        assert_eq!(mock.get(&url), Ok(b"MX2-8x8".to_vec()));
        assert_eq!(mock.requests(), vec!["10.0.0.2 /api/ProductName"]);
    }

    #[test]
    fn test_mock_defaults_to_404() {
        let mock = MockHttp::new();
        let url = Url::parse("http://10.0.0.2/api/Nope").unwrap();

        assert_eq!(mock.get(&url), Err(FetchError::Status(404)));
    }
}
