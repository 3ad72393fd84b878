//! HTTP client with process-wide default headers.
//!
//! Client-side (csr): requests go out through `gloo-net`.
//! Elsewhere: [`BrowserTransport`] fails every request, since these endpoints
//! are only meaningful in the browser.
//!
//! ERROR HANDLING
//! ==============
//! Every failure is an [`ApiError`]; non-2xx responses keep the server's
//! `detail` message so callers can show it verbatim.

#[cfg(test)]
#[path = "http_test.rs"]
mod http_test;

use std::collections::BTreeMap;
use std::future::Future;
use std::sync::{PoisonError, RwLock};

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::types::ErrorBody;

pub const AUTHORIZATION: &str = "Authorization";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(String),
    #[error("server responded with status {status}")]
    Status { status: u16, detail: Option<String> },
    #[error("failed to decode response: {0}")]
    Decode(String),
    #[error("failed to encode request body: {0}")]
    Encode(String),
}

impl ApiError {
    /// Message suitable for the UI: the server's `detail` when it sent one,
    /// otherwise `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            Self::Status { detail: Some(detail), .. } => detail.clone(),
            _ => fallback.to_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends one request and returns the raw response.
pub trait Transport {
    fn send(&self, request: ApiRequest) -> impl Future<Output = Result<ApiResponse, ApiError>>;
}

/// `fetch` via `gloo-net`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserTransport;

impl Transport for BrowserTransport {
    #[allow(clippy::unused_async)]
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        #[cfg(feature = "csr")]
        {
            use gloo_net::http::Request;

            let mut builder = match request.method {
                Method::Get => Request::get(&request.url),
                Method::Post => Request::post(&request.url),
            };
            for (name, value) in &request.headers {
                builder = builder.header(name, value);
            }
            let resp = match &request.body {
                Some(body) => builder
                    .json(body)
                    .map_err(|e| ApiError::Transport(e.to_string()))?
                    .send()
                    .await,
                None => builder.send().await,
            }
            .map_err(|e| ApiError::Transport(e.to_string()))?;
            let status = resp.status();
            let body = resp.text().await.map_err(|e| ApiError::Transport(e.to_string()))?;
            Ok(ApiResponse { status, body })
        }
        #[cfg(not(feature = "csr"))]
        {
            let _ = request;
            Err(ApiError::Transport("not available outside the browser".to_owned()))
        }
    }
}

/// Transport plus the default headers attached to every request.
#[derive(Debug, Default)]
pub struct ApiClient<T> {
    transport: T,
    default_headers: RwLock<BTreeMap<String, String>>,
}

impl<T: Transport> ApiClient<T> {
    pub fn new(transport: T) -> Self {
        Self { transport, default_headers: RwLock::new(BTreeMap::new()) }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn set_default_header(&self, name: &str, value: &str) {
        self.default_headers
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_owned(), value.to_owned());
    }

    pub fn remove_default_header(&self, name: &str) {
        self.default_headers.write().unwrap_or_else(PoisonError::into_inner).remove(name);
    }

    pub fn default_header(&self, name: &str) -> Option<String> {
        self.default_headers.read().unwrap_or_else(PoisonError::into_inner).get(name).cloned()
    }

    /// `GET url` and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] on transport failure, non-2xx status or an
    /// undecodable body.
    pub async fn get_json<R: DeserializeOwned>(&self, url: &str) -> Result<R, ApiError> {
        self.execute(Method::Get, url, None).await
    }

    /// `POST url` with a JSON body and decode the JSON response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Encode`] if the body cannot be encoded, otherwise an
    /// [`ApiError`] on transport failure, non-2xx status or an undecodable
    /// response.
    pub async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, ApiError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body).map_err(|e| ApiError::Encode(e.to_string()))?;
        self.execute(Method::Post, url, Some(body)).await
    }

    async fn execute<R: DeserializeOwned>(
        &self,
        method: Method,
        url: &str,
        body: Option<serde_json::Value>,
    ) -> Result<R, ApiError> {
        let mut headers = self.header_snapshot();
        if body.is_some() {
            headers.push(("Content-Type".to_owned(), "application/json".to_owned()));
        }
        let request = ApiRequest { method, url: url.to_owned(), headers, body };
        let resp = self.transport.send(request).await?;
        if !resp.ok() {
            return Err(ApiError::Status { status: resp.status, detail: error_detail(&resp.body) });
        }
        serde_json::from_str(&resp.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    fn header_snapshot(&self) -> Vec<(String, String)> {
        self.default_headers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

/// Extract the backend's `detail` message from an error body.
///
/// Only string details are surfaced; structured validation payloads fall
/// through so callers use their generic message.
pub fn error_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail? {
        serde_json::Value::String(detail) if !detail.trim().is_empty() => Some(detail),
        _ => None,
    }
}

pub fn bearer(token: &str) -> String {
    format!("Bearer {token}")
}
