use crate::errors::{ConfigurationError, OpenAIError, OpenAIResult};
use std::time::Duration;
use url::Url;

/// Default base URL for the OpenAI API.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default request timeout (60 seconds).
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// Transport settings shared by every request the client makes.
///
/// Credentials are deliberately not part of this struct: they are supplied
/// per invocation by the host.
#[derive(Debug, Clone)]
pub struct OpenAIConfig {
    pub base_url: Url,
    pub timeout: Duration,
    pub max_connections: usize,
    pub proxy: Option<Url>,
    pub user_agent: String,
}

impl Default for OpenAIConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout: DEFAULT_TIMEOUT,
            max_connections: default_max_connections(),
            proxy: None,
            user_agent: default_user_agent(),
        }
    }
}

impl OpenAIConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new OpenAIConfig from environment variables
    ///
    /// Reads the following environment variables:
    /// - OPENAI_BASE_URL (optional, defaults to https://api.openai.com/v1)
    /// - OPENAI_TIMEOUT_SECS (optional, defaults to 60)
    pub fn from_env() -> OpenAIResult<Self> {
        let mut config = Self::default();

        if let Ok(base_url) = std::env::var("OPENAI_BASE_URL") {
            config.base_url = Url::parse(&base_url).map_err(|e| {
                OpenAIError::Configuration(ConfigurationError::InvalidBaseUrl(format!(
                    "Invalid OPENAI_BASE_URL: {}",
                    e
                )))
            })?;
        }

        if let Ok(timeout) = std::env::var("OPENAI_TIMEOUT_SECS") {
            let secs = timeout.trim().parse::<u64>().map_err(|e| {
                OpenAIError::Configuration(ConfigurationError::InvalidTimeout(format!(
                    "Invalid OPENAI_TIMEOUT_SECS: {}",
                    e
                )))
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> OpenAIResult<()> {
        if self.timeout.is_zero() {
            return Err(OpenAIError::Configuration(ConfigurationError::InvalidTimeout(
                "Timeout must be greater than 0".to_string(),
            )));
        }

        if !matches!(self.base_url.scheme(), "http" | "https") {
            return Err(OpenAIError::Configuration(ConfigurationError::InvalidBaseUrl(
                format!("Unsupported scheme: {}", self.base_url.scheme()),
            )));
        }

        Ok(())
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }

    /// Parses and sets the base URL.
    pub fn with_base_url_str(self, base_url: &str) -> OpenAIResult<Self> {
        Ok(self.with_base_url(Url::parse(base_url)?))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_proxy(mut self, proxy: Url) -> Self {
        self.proxy = Some(proxy);
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("DEFAULT_BASE_URL is a valid URL")
}

fn default_max_connections() -> usize {
    10
}

fn default_user_agent() -> String {
    format!("integrations-openai-images/{}", env!("CARGO_PKG_VERSION"))
}
