//! HTTP transport layer.
//!
//! Services build [`HttpRequest`] / [`MultipartRequest`] values and hand them
//! to an [`HttpTransport`]; the default implementation is backed by reqwest.

mod http_transport;
mod multipart;
mod response_parser;

pub use http_transport::ReqwestTransport;
pub use multipart::{MultipartPart, MultipartRequest};
pub use response_parser::ResponseParser;

use crate::errors::OpenAIResult;
use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use std::collections::HashMap;

/// HTTP request representation.
#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    /// Path relative to the configured base URL.
    pub path: String,
    pub headers: HashMap<String, String>,
    pub body: Option<Bytes>,
}

impl HttpRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    pub fn with_body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        lookup_header(&self.headers, name)
    }
}

/// HTTP response representation.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl HttpResponse {
    /// Returns true if the status indicates success (2xx).
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        lookup_header(&self.headers, name)
    }
}

pub(crate) fn lookup_header<'a>(headers: &'a HashMap<String, String>, name: &str) -> Option<&'a str> {
    headers
        .iter()
        .find(|(key, _)| key.eq_ignore_ascii_case(name))
        .map(|(_, value)| value.as_str())
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends a request with an optional pre-encoded body.
    async fn send(&self, request: HttpRequest) -> OpenAIResult<HttpResponse>;

    /// Sends a multipart/form-data request. The transport owns the boundary
    /// and therefore the `Content-Type` header.
    async fn send_multipart(&self, request: MultipartRequest) -> OpenAIResult<HttpResponse>;
}
