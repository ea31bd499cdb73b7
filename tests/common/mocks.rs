//! Test doubles beyond the scripted `MockHttpClient`.

pub use fleetdash::adapters::mock::{MockHttpClient, MockResponse};
pub use fleetdash::traits::{HttpClient, HttpError, Response};

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio::sync::oneshot;

pub type GateResult = Result<Response, HttpError>;

/// An HTTP client whose responses are released by the test.
///
/// The n-th `get` call waits on the n-th gate, so a test can complete
/// requests in any order it likes.
pub struct GatedHttpClient {
    gates: Mutex<VecDeque<oneshot::Receiver<GateResult>>>,
    calls: AtomicUsize,
}

/// Release side of one gate.
pub struct Gate(oneshot::Sender<GateResult>);

impl Gate {
    pub fn ok(self, body: &str) {
        let _ = self.0.send(Ok(Response::ok(body.to_string())));
    }

    pub fn status(self, status: u16, body: &str) {
        let _ = self.0.send(Ok(Response::new(status, body.to_string())));
    }
}

impl GatedHttpClient {
    pub fn new(count: usize) -> (Self, Vec<Gate>) {
        let mut receivers = VecDeque::with_capacity(count);
        let mut gates = Vec::with_capacity(count);
        for _ in 0..count {
            let (tx, rx) = oneshot::channel();
            receivers.push_back(rx);
            gates.push(Gate(tx));
        }
        let client = Self {
            gates: Mutex::new(receivers),
            calls: AtomicUsize::new(0),
        };
        (client, gates)
    }

    /// Number of `get` calls issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl HttpClient for GatedHttpClient {
    async fn get(&self, _url: &str) -> Result<Response, HttpError> {
        let gate = self.gates.lock().unwrap().pop_front();
        self.calls.fetch_add(1, Ordering::SeqCst);
        match gate {
            Some(rx) => rx
                .await
                .unwrap_or_else(|_| Err(HttpError::Other("gate dropped".to_string()))),
            None => Err(HttpError::Other("no gate left".to_string())),
        }
    }
}
