//! Transport boundary to the remote store
//!
//! Provides a unified interface for issuing authenticated HTTP requests,
//! so query services can be exercised against a real store or a scripted
//! mock interchangeably.

mod auth;
mod http;
#[cfg(any(test, feature = "mock-transport"))]
mod mock;
mod verbosity;

pub use auth::ClientCredentials;
pub use http::HttpTransport;
#[cfg(any(test, feature = "mock-transport"))]
pub use mock::MockTransport;
pub use verbosity::VerbosityTransport;

use crate::error::{Error, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;

pub use reqwest::Method;

/// An outgoing request against the store
#[derive(Debug, Clone)]
pub struct Request {
    pub method: Method,
    /// Path relative to the store's base resource, e.g. `api/v1/Tenants/...`
    pub path: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
}

impl Request {
    /// Create a GET request for the given store path
    pub fn get(path: impl Into<String>) -> Self {
        Self {
            method: Method::GET,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
        }
    }

    /// Append a query parameter
    pub fn query(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((name.into(), value.into()));
        self
    }

    /// Append a header
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Whether a header with this name is already set (case-insensitive)
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|(n, _)| n.eq_ignore_ascii_case(name))
    }
}

/// A response from the store
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    /// Deserialize the response body as JSON
    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(Error::from)
    }
}

/// A transport capable of issuing requests against the store.
///
/// Decorators such as [`VerbosityTransport`] wrap any implementation; the
/// query services are generic over this trait.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request) -> Result<Response>;
}

#[async_trait]
impl<T: Transport + ?Sized> Transport for std::sync::Arc<T> {
    async fn send(&self, request: Request) -> Result<Response> {
        (**self).send(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = Request::get("api/v1/Tenants/t/Namespaces/n/Streams/s/Data")
            .query("startIndex", "2025-06-01T00:00:00Z")
            .query("endIndex", "2025-06-02T00:00:00Z")
            .header("accept-verbosity", "verbose");

        assert_eq!(request.method, Method::GET);
        assert_eq!(request.query.len(), 2);
        assert!(request.has_header("Accept-Verbosity"));
        assert!(!request.has_header("authorization"));
    }

    #[test]
    fn test_response_json() {
        let response = Response {
            status: 200,
            body: br#"{"Id": "s1", "TypeId": "t1"}"#.to_vec(),
        };

        let stream: crate::model::Stream = response.json().unwrap();
        assert_eq!(stream.id, "s1");
    }

    #[test]
    fn test_response_json_malformed() {
        let response = Response {
            status: 200,
            body: b"not json".to_vec(),
        };

        let result: Result<crate::model::Stream> = response.json();
        assert!(matches!(result, Err(Error::Serialization(_))));
    }
}
