//! Content fetch capability
//!
//! Resolving a CID is the only operation in a call that can block on
//! external I/O, and its result is not deterministic. Handlers therefore
//! never open connections themselves: the host injects a [`ContentFetcher`],
//! and every implementation is bounded by a deadline.
//!
//! - [`HttpFetcher`]: live gateway requests (feature `http`)
//! - [`RecordedFetcher`]: fixed url → body map for replay and tests
//! - [`RecordingFetcher`]: wraps another fetcher and keeps what it returned
//! - [`DisabledFetcher`]: refuses every request

use crate::error::{GatewayError, GatewayResult};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Instant;

/// Resolves a target URL to its body
pub trait ContentFetcher: Send + Sync {
    /// Fetch `url`, giving up once `deadline` has passed
    fn fetch(&self, url: &str, deadline: Instant) -> GatewayResult<Vec<u8>>;
}

/// Fetcher that fails every request
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledFetcher;

impl ContentFetcher for DisabledFetcher {
    fn fetch(&self, url: &str, _deadline: Instant) -> GatewayResult<Vec<u8>> {
        Err(GatewayError::FetchFailed(format!(
            "content resolution disabled: {}",
            url
        )))
    }
}

/// Deterministic fetcher backed by a fixed set of responses
#[derive(Debug, Clone, Default)]
pub struct RecordedFetcher {
    responses: HashMap<String, Vec<u8>>,
}

impl RecordedFetcher {
    /// Create an empty fetcher
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a response (builder style)
    pub fn with_response(mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) -> Self {
        self.insert(url, body);
        self
    }

    /// Add or replace a response
    pub fn insert(&mut self, url: impl Into<String>, body: impl Into<Vec<u8>>) {
        self.responses.insert(url.into(), body.into());
    }

    /// Number of recorded responses
    pub fn len(&self) -> usize {
        self.responses.len()
    }

    /// Check if no responses are recorded
    pub fn is_empty(&self) -> bool {
        self.responses.is_empty()
    }
}

impl ContentFetcher for RecordedFetcher {
    fn fetch(&self, url: &str, _deadline: Instant) -> GatewayResult<Vec<u8>> {
        self.responses
            .get(url)
            .cloned()
            .ok_or_else(|| GatewayError::FetchFailed(format!("no recorded response for {}", url)))
    }
}

/// Fetcher that records the successful responses of an inner fetcher, so a
/// later replay can run against a [`RecordedFetcher`] with the same content.
pub struct RecordingFetcher<F> {
    inner: F,
    recorded: Mutex<RecordedFetcher>,
}

impl<F: ContentFetcher> RecordingFetcher<F> {
    /// Wrap `inner`
    pub fn new(inner: F) -> Self {
        Self {
            inner,
            recorded: Mutex::new(RecordedFetcher::new()),
        }
    }

    /// Responses seen so far
    pub fn recorded(&self) -> RecordedFetcher {
        self.recorded.lock().clone()
    }
}

impl<F: ContentFetcher> ContentFetcher for RecordingFetcher<F> {
    fn fetch(&self, url: &str, deadline: Instant) -> GatewayResult<Vec<u8>> {
        let body = self.inner.fetch(url, deadline)?;
        self.recorded.lock().insert(url, body.clone());
        Ok(body)
    }
}

#[cfg(feature = "http")]
pub use http::HttpFetcher;

#[cfg(feature = "http")]
mod http {
    use super::ContentFetcher;
    use crate::error::{GatewayError, GatewayResult};
    use std::io::Read;
    use std::time::Instant;

    /// Blocking HTTP fetcher for a web gateway
    #[derive(Debug, Clone)]
    pub struct HttpFetcher {
        client: reqwest::blocking::Client,
        max_response_bytes: usize,
    }

    impl HttpFetcher {
        /// Create a fetcher that rejects bodies over `max_response_bytes`
        pub fn new(max_response_bytes: usize) -> GatewayResult<Self> {
            let client = reqwest::blocking::Client::builder()
                .build()
                .map_err(|e| GatewayError::FetchFailed(format!("client setup: {}", e)))?;
            Ok(Self {
                client,
                max_response_bytes,
            })
        }

        /// Body size limit in bytes
        pub fn max_response_bytes(&self) -> usize {
            self.max_response_bytes
        }
    }

    impl ContentFetcher for HttpFetcher {
        fn fetch(&self, url: &str, deadline: Instant) -> GatewayResult<Vec<u8>> {
            let timeout = deadline
                .checked_duration_since(Instant::now())
                .filter(|remaining| !remaining.is_zero())
                .ok_or_else(|| GatewayError::FetchFailed("deadline elapsed".to_string()))?;

            let response = self
                .client
                .get(url)
                .timeout(timeout)
                .send()
                .map_err(|e| GatewayError::FetchFailed(format!("GET {}: {}", url, e)))?;

            let status = response.status();
            if !status.is_success() {
                return Err(GatewayError::FetchFailed(format!(
                    "GET {}: status {}",
                    url, status
                )));
            }

            let limit = self.max_response_bytes as u64;
            if response.content_length().is_some_and(|len| len > limit) {
                return Err(GatewayError::FetchFailed(format!(
                    "GET {}: body exceeds {} bytes",
                    url, limit
                )));
            }

            read_limited(response, limit)
                .map_err(|e| GatewayError::FetchFailed(format!("GET {}: {}", url, e)))
        }
    }

    /// Read at most `limit` bytes, failing if the reader holds more.
    fn read_limited<R: Read>(reader: R, limit: u64) -> Result<Vec<u8>, String> {
        let mut body = Vec::new();
        reader
            .take(limit.saturating_add(1))
            .read_to_end(&mut body)
            .map_err(|e| format!("read body: {}", e))?;
        if body.len() as u64 > limit {
            return Err(format!("body exceeds {} bytes", limit));
        }
        Ok(body)
    }

}
