//! Scripted transport for testing without a live store

use super::{Request, Response, Transport};
use crate::error::{Error, Result};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Transport that replays scripted responses and records every request.
///
/// Responses are consumed in FIFO order; sending with an empty script is an
/// error, so tests catch unexpected extra requests.
#[derive(Default)]
pub struct MockTransport {
    script: Mutex<VecDeque<Result<Response>>>,
    requests: Mutex<Vec<Request>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script a 200 response with the given JSON body
    pub fn enqueue_json(&self, body: serde_json::Value) {
        let body = serde_json::to_vec(&body).expect("scripted body serializes");
        self.script
            .lock()
            .unwrap()
            .push_back(Ok(Response { status: 200, body }));
    }

    /// Script a failure
    pub fn enqueue_error(&self, error: Error) {
        self.script.lock().unwrap().push_back(Err(error));
    }

    /// Requests sent so far, in order
    pub fn requests(&self) -> Vec<Request> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of requests sent so far
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, request: Request) -> Result<Response> {
        self.requests.lock().unwrap().push(request.clone());
        self.script
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(Error::Transport(format!(
                    "MockTransport has no scripted response for {} {}",
                    request.method, request.path
                )))
            })
    }
}
