//! Mock HTTP client for testing.
//!
//! Responses can be configured per URL either as a standing answer
//! (`set_response`) or as a one-shot queue (`push_response`) that is
//! drained before the standing answer is used. Every request is recorded.

use async_trait::async_trait;
use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use crate::traits::{HttpClient, HttpError, Response};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedRequest {
    /// HTTP method (always GET for polling sources)
    pub method: String,
    /// Request URL
    pub url: String,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Return a response (any status)
    Success(Response),
    /// Return a transport error
    Error(HttpError),
    /// Wait before producing the inner response
    Delayed(Duration, Box<MockResponse>),
}

impl MockResponse {
    /// `200 OK` with the given body.
    pub fn ok(body: impl Into<bytes::Bytes>) -> Self {
        MockResponse::Success(Response::ok(body))
    }

    /// Any status with the given body.
    pub fn status(status: u16, body: impl Into<bytes::Bytes>) -> Self {
        MockResponse::Success(Response::new(status, body))
    }

    /// Wrap this response so it is produced after `delay`.
    pub fn after(self, delay: Duration) -> Self {
        MockResponse::Delayed(delay, Box::new(self))
    }
}

#[derive(Debug, Default)]
struct Script {
    standing: HashMap<String, MockResponse>,
    queued: HashMap<String, VecDeque<MockResponse>>,
    default_response: Option<MockResponse>,
}

/// Mock HTTP client for testing.
///
/// Clones share the same script and request log.
///
/// # Example
///
/// ```ignore
/// use fleetdash::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response("http://fleet/map.txt", MockResponse::ok("A\nB"));
/// let response = client.get("http://fleet/map.txt").await?;
/// assert_eq!(client.get_requests().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    script: Arc<Mutex<Script>>,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the standing response for a URL (matched exactly).
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut script = self.script.lock().unwrap();
        script.standing.insert(url.to_string(), response);
    }

    /// Queue a one-shot response for a URL. Queued responses are used in
    /// FIFO order before the standing response.
    pub fn push_response(&self, url: &str, response: MockResponse) {
        let mut script = self.script.lock().unwrap();
        script
            .queued
            .entry(url.to_string())
            .or_default()
            .push_back(response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        self.script.lock().unwrap().default_response = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests issued for `url`.
    pub fn request_count(&self, url: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.url == url)
            .count()
    }

    /// Clear all recorded requests.
    pub fn clear_requests(&self) {
        self.requests.lock().unwrap().clear();
    }

    fn record_request(&self, url: &str) {
        self.requests.lock().unwrap().push(RecordedRequest {
            method: "GET".to_string(),
            url: url.to_string(),
        });
    }

    fn next_response(&self, url: &str) -> Option<MockResponse> {
        let mut script = self.script.lock().unwrap();
        if let Some(response) = script.queued.get_mut(url).and_then(VecDeque::pop_front) {
            return Some(response);
        }
        script
            .standing
            .get(url)
            .cloned()
            .or_else(|| script.default_response.clone())
    }
}

async fn resolve(mut response: MockResponse) -> Result<Response, HttpError> {
    loop {
        match response {
            MockResponse::Success(r) => return Ok(r),
            MockResponse::Error(e) => return Err(e),
            MockResponse::Delayed(delay, inner) => {
                tokio::time::sleep(delay).await;
                response = *inner;
            }
        }
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get(&self, url: &str) -> Result<Response, HttpError> {
        self.record_request(url);

        match self.next_response(url) {
            Some(response) => resolve(response).await,
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}
