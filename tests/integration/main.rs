//! Integration tests using WireMock
//!
//! These drive the real reqwest transport against a local mock server and
//! check the wire contract: paths, headers, JSON and multipart bodies.

mod images;
mod node;

use integrations_openai_images::prelude::*;
use std::sync::Arc;
use wiremock::{MockServer, ResponseTemplate};

pub const TEST_API_KEY: &str = "sk-test-api-key";

pub async fn setup_mock_server() -> MockServer {
    MockServer::start().await
}

/// Client pointed at the mock server, keeping the `/v1` prefix.
pub fn client_for(server: &MockServer) -> Arc<dyn OpenAIClient> {
    let config = OpenAIConfig::new()
        .with_base_url_str(&format!("{}/v1", server.uri()))
        .expect("mock server URI is valid");

    OpenAIClientBuilder::new()
        .with_config(config)
        .build()
        .expect("Failed to build client")
}

pub fn credentials() -> Credentials {
    Credentials::new(TEST_API_KEY)
}

pub fn success_response(body: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(body)
}

pub fn error_response(status: u16, message: &str) -> ResponseTemplate {
    ResponseTemplate::new(status).set_body_json(serde_json::json!({
        "error": {
            "message": message,
            "type": "invalid_request_error",
            "param": null,
            "code": null
        }
    }))
}

pub fn image_response(url: &str) -> serde_json::Value {
    serde_json::json!({
        "created": 1700000000,
        "data": [{ "url": url }]
    })
}

pub fn png_bytes() -> Vec<u8> {
    vec![0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D]
}
