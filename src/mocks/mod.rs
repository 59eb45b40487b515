//! Mock transport for testing.
//!
//! Records every request (JSON or multipart) and replays queued responses,
//! so services and the node can be exercised without a network.

use async_trait::async_trait;
use bytes::Bytes;
use http::Method;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use crate::errors::{NetworkError, OpenAIError, OpenAIResult};
use crate::transport::{
    lookup_header, HttpRequest, HttpResponse, HttpTransport, MultipartPart, MultipartRequest,
};

/// A recorded request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    pub path: String,
    pub headers: HashMap<String, String>,
    /// Body of a JSON request.
    pub body: Option<Bytes>,
    /// Parts of a multipart request; empty for JSON requests.
    pub parts: Vec<MultipartPart>,
}

impl RecordedRequest {
    pub fn header(&self, name: &str) -> Option<&str> {
        lookup_header(&self.headers, name)
    }

    /// Decodes the JSON body.
    pub fn json(&self) -> Option<serde_json::Value> {
        self.body
            .as_ref()
            .and_then(|body| serde_json::from_slice(body).ok())
    }

    pub fn is_multipart(&self) -> bool {
        !self.parts.is_empty()
    }

    pub fn part(&self, name: &str) -> Option<&MultipartPart> {
        self.parts.iter().find(|part| part.name() == name)
    }

    pub fn text_part(&self, name: &str) -> Option<&str> {
        match self.part(name) {
            Some(MultipartPart::Text { value, .. }) => Some(value),
            _ => None,
        }
    }
}

/// A mock response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    pub status: u16,
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl MockResponse {
    /// Creates a successful JSON response.
    pub fn json<T: serde::Serialize>(value: &T) -> Self {
        let body = serde_json::to_vec(value).unwrap_or_default();
        let mut headers = HashMap::new();
        headers.insert("content-type".to_string(), "application/json".to_string());

        Self {
            status: 200,
            headers,
            body: Bytes::from(body),
        }
    }

    /// Creates an error response in the provider's envelope.
    pub fn error(status: u16, message: &str) -> Self {
        let error = serde_json::json!({
            "error": {
                "message": message,
                "type": "invalid_request_error",
                "param": null,
                "code": null
            }
        });

        Self::json(&error).with_status(status)
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = status;
        self
    }

    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }
}

#[derive(Debug, Clone)]
enum MockReply {
    Response(MockResponse),
    Failure(NetworkError),
}

/// Mock HTTP transport. Replies are served in the order they were queued.
pub struct MockTransport {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<RecordedRequest>>,
    default_response: Mutex<Option<MockResponse>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            default_response: Mutex::new(None),
        }
    }

    pub fn queue(&self, response: MockResponse) {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Response(response));
    }

    pub fn queue_json<T: serde::Serialize>(&self, value: &T) {
        self.queue(MockResponse::json(value));
    }

    pub fn queue_error(&self, status: u16, message: &str) {
        self.queue(MockResponse::error(status, message));
    }

    /// Queues a transport-level failure (no HTTP response at all).
    pub fn queue_network_error(&self, message: &str) {
        self.replies
            .lock()
            .unwrap()
            .push_back(MockReply::Failure(NetworkError::ConnectionFailed(
                message.to_string(),
            )));
    }

    /// Response served once the queue is empty.
    pub fn set_default(&self, response: MockResponse) {
        *self.default_response.lock().unwrap() = Some(response);
    }

    pub fn with_default(self, response: MockResponse) -> Self {
        self.set_default(response);
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    fn next_reply(&self) -> OpenAIResult<HttpResponse> {
        let reply = self.replies.lock().unwrap().pop_front();
        let reply = match reply {
            Some(reply) => reply,
            None => MockReply::Response(
                self.default_response
                    .lock()
                    .unwrap()
                    .clone()
                    .unwrap_or_else(|| MockResponse::error(500, "No mock response configured")),
            ),
        };

        match reply {
            MockReply::Response(response) => Ok(HttpResponse {
                status: response.status,
                headers: response.headers,
                body: response.body,
            }),
            MockReply::Failure(error) => Err(OpenAIError::Network(error)),
        }
    }

    fn record(&self, request: RecordedRequest) {
        self.requests.lock().unwrap().push(request);
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> OpenAIResult<HttpResponse> {
        self.record(RecordedRequest {
            method: request.method,
            path: request.path,
            headers: request.headers,
            body: request.body,
            parts: Vec::new(),
        });

        self.next_reply()
    }

    async fn send_multipart(&self, request: MultipartRequest) -> OpenAIResult<HttpResponse> {
        self.record(RecordedRequest {
            method: Method::POST,
            path: request.path,
            headers: request.headers,
            body: None,
            parts: request.parts,
        });

        self.next_reply()
    }
}
