//! Scripted [`Transport`] for unit tests.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use super::http::{ApiError, ApiRequest, ApiResponse, Transport};

/// Replays queued responses in order and records every request it sees.
/// Clones share the queue and the request log.
#[derive(Clone, Debug, Default)]
pub(crate) struct MockTransport {
    responses: Arc<Mutex<VecDeque<Result<ApiResponse, ApiError>>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl MockTransport {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(&self, status: u16, body: serde_json::Value) -> &Self {
        self.push(Ok(ApiResponse { status, body: body.to_string() }))
    }

    pub(crate) fn respond_raw(&self, status: u16, body: &str) -> &Self {
        self.push(Ok(ApiResponse { status, body: body.to_owned() }))
    }

    pub(crate) fn fail(&self, message: &str) -> &Self {
        self.push(Err(ApiError::Transport(message.to_owned())))
    }

    pub(crate) fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn push(&self, response: Result<ApiResponse, ApiError>) -> &Self {
        self.responses.lock().unwrap_or_else(PoisonError::into_inner).push_back(response);
        self
    }
}

impl Transport for MockTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        self.requests.lock().unwrap_or_else(PoisonError::into_inner).push(request);
        self.responses
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Transport("no scripted response".to_owned())))
    }
}
