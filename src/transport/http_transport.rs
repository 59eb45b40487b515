use super::{HttpRequest, HttpResponse, HttpTransport, MultipartRequest};
use crate::client::OpenAIConfig;
use crate::errors::{ConfigurationError, NetworkError, OpenAIError, OpenAIResult};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, instrument};
use url::Url;

/// [`HttpTransport`] backed by a pooled reqwest client.
pub struct ReqwestTransport {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(config: &OpenAIConfig) -> OpenAIResult<Self> {
        config.validate()?;

        let mut builder = Client::builder()
            .timeout(config.timeout)
            .pool_max_idle_per_host(config.max_connections)
            .tcp_keepalive(Duration::from_secs(60))
            .user_agent(config.user_agent.clone());

        if let Some(proxy) = &config.proxy {
            let proxy = reqwest::Proxy::all(proxy.as_str()).map_err(|e| {
                OpenAIError::Configuration(ConfigurationError::HttpClient(format!(
                    "Invalid proxy: {}",
                    e
                )))
            })?;
            builder = builder.proxy(proxy);
        }

        let client = builder.build().map_err(|e| {
            OpenAIError::Configuration(ConfigurationError::HttpClient(e.to_string()))
        })?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            timeout: config.timeout,
        })
    }

    /// Joins a relative path onto the base URL, keeping any base path
    /// such as `/v1`.
    fn build_url(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    fn map_send_error(&self, err: reqwest::Error) -> OpenAIError {
        if err.is_timeout() {
            OpenAIError::Timeout {
                timeout_ms: self.timeout.as_millis() as u64,
            }
        } else {
            OpenAIError::from(err)
        }
    }

    async fn execute(&self, builder: RequestBuilder) -> OpenAIResult<HttpResponse> {
        let response = builder
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;

        let status = response.status().as_u16();
        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
            .collect();
        let body = response.bytes().await.map_err(|e| {
            if e.is_timeout() {
                self.map_send_error(e)
            } else {
                OpenAIError::Network(NetworkError::RequestFailed(format!(
                    "Failed to read response body: {}",
                    e
                )))
            }
        })?;

        debug!(status, bytes = body.len(), "Received response");

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    async fn send(&self, request: HttpRequest) -> OpenAIResult<HttpResponse> {
        let url = self.build_url(&request.path);
        let mut builder = self.client.request(request.method, &url);

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        self.execute(builder).await
    }

    #[instrument(skip(self, request), fields(path = %request.path, parts = request.parts.len()))]
    async fn send_multipart(&self, request: MultipartRequest) -> OpenAIResult<HttpResponse> {
        let url = self.build_url(&request.path);
        let mut builder = self.client.post(&url);

        for (name, value) in &request.headers {
            // reqwest sets the boundary-carrying content type itself
            if name.eq_ignore_ascii_case(http::header::CONTENT_TYPE.as_str()) {
                continue;
            }
            builder = builder.header(name, value);
        }

        let form = request.into_form()?;
        self.execute(builder.multipart(form)).await
    }
}
