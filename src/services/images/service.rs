use crate::auth::{AuthProvider, Credentials};
use crate::errors::OpenAIResult;
use crate::services::images::{ImageGenerationRequest, ImageRequestValidator, ImageVariationRequest};
use crate::transport::{HttpRequest, HttpTransport, MultipartRequest, ResponseParser};
use async_trait::async_trait;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

pub const GENERATIONS_PATH: &str = "images/generations";
pub const VARIATIONS_PATH: &str = "images/variations";

/// The two image operations. Each call issues exactly one HTTP request and
/// returns the provider's JSON body untouched.
#[async_trait]
pub trait ImageService: Send + Sync {
    async fn generate(
        &self,
        request: &ImageGenerationRequest,
        credentials: &Credentials,
    ) -> OpenAIResult<Value>;

    async fn create_variation(
        &self,
        request: &ImageVariationRequest,
        credentials: &Credentials,
    ) -> OpenAIResult<Value>;
}

pub struct ImageServiceImpl {
    transport: Arc<dyn HttpTransport>,
}

impl ImageServiceImpl {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    fn auth_headers(credentials: &Credentials) -> OpenAIResult<HashMap<String, String>> {
        let mut headers = HashMap::new();
        credentials.apply_auth(&mut headers)?;
        Ok(headers)
    }
}

#[async_trait]
impl ImageService for ImageServiceImpl {
    #[instrument(
        skip(self, request, credentials),
        fields(model = %request.model, size = %request.size, n = request.n)
    )]
    async fn generate(
        &self,
        request: &ImageGenerationRequest,
        credentials: &Credentials,
    ) -> OpenAIResult<Value> {
        ImageRequestValidator::validate_generation(request)?;

        let headers = Self::auth_headers(credentials)?;
        let body = serde_json::to_vec(&request.body())?;

        let http_request = HttpRequest::post(GENERATIONS_PATH)
            .with_headers(headers)
            .with_header(
                http::header::CONTENT_TYPE.as_str(),
                mime::APPLICATION_JSON.as_ref(),
            )
            .with_body(body);

        let response = self.transport.send(http_request).await?;
        debug!(status = response.status, "Image generation response");

        ResponseParser::parse_json(&response)
    }

    #[instrument(
        skip(self, request, credentials),
        fields(size = %request.size, n = request.n, file_name = %request.file_name)
    )]
    async fn create_variation(
        &self,
        request: &ImageVariationRequest,
        credentials: &Credentials,
    ) -> OpenAIResult<Value> {
        ImageRequestValidator::validate_variation(request)?;

        let headers = Self::auth_headers(credentials)?;

        let multipart = MultipartRequest::new(VARIATIONS_PATH)
            .with_headers(headers)
            .file(
                "image",
                request.file_name.clone(),
                request.mime_type.clone(),
                request.image.clone(),
            )
            .text("n", request.n.to_string())
            .text("size", request.size.as_str())
            .text("response_format", request.response_format.as_str());

        let response = self.transport.send_multipart(multipart).await?;
        debug!(status = response.status, "Image variation response");

        ResponseParser::parse_json(&response)
    }
}
