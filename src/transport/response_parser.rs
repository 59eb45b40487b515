use super::HttpResponse;
use crate::errors::{ErrorMapper, OpenAIError, OpenAIResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Upper bound on how much of an undecodable body ends up in an error message.
const BODY_SNIPPET_LEN: usize = 512;

pub struct ResponseParser;

impl ResponseParser {
    /// Returns the decoded JSON body of a successful response, or the mapped
    /// API error otherwise.
    pub fn parse_json(response: &HttpResponse) -> OpenAIResult<Value> {
        Self::parse(response)
    }

    /// Like [`ResponseParser::parse_json`] but into a concrete type.
    pub fn parse<T: DeserializeOwned>(response: &HttpResponse) -> OpenAIResult<T> {
        if !response.is_success() {
            return Err(ErrorMapper::from_response(
                response.status,
                &response.headers,
                &response.body,
            ));
        }

        serde_json::from_slice(&response.body).map_err(|e| {
            OpenAIError::Deserialization(format!(
                "Failed to deserialize response: {}. Body: {}",
                e,
                snippet(&response.body)
            ))
        })
    }
}

fn snippet(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(BODY_SNIPPET_LEN) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.into_owned(),
    }
}
