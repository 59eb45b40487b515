use crate::errors::categories::{
    AuthenticationError, ConfigurationError, NetworkError, RateLimitError, ServerError,
    ValidationError,
};
use thiserror::Error;

pub type OpenAIResult<T> = Result<T, OpenAIError>;

#[derive(Error, Debug)]
pub enum OpenAIError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("{0}")]
    Validation(#[from] ValidationError),

    #[error("Authentication error: {0}")]
    Authentication(#[from] AuthenticationError),

    #[error("Rate limit error: {0}")]
    RateLimit(#[from] RateLimitError),

    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Server error: {0}")]
    Server(#[from] ServerError),

    #[error("Request error: {status_code} - {message}")]
    Request {
        status_code: u16,
        message: String,
        error_type: Option<String>,
        error_code: Option<String>,
    },

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Timeout error: operation timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },
}

/// Coarse classification used by the batch driver to decide whether an error
/// may be captured per item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing or invalid credentials and settings; always aborts the batch.
    Configuration,
    /// Item-level precondition failures detected before any network call.
    Validation,
    /// Transport failures and non-success provider responses.
    Request,
}

impl OpenAIError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OpenAIError::Configuration(_) => ErrorKind::Configuration,
            OpenAIError::Validation(_) => ErrorKind::Validation,
            _ => ErrorKind::Request,
        }
    }

    /// Whether failure isolation may turn this error into an error record.
    pub fn is_isolatable(&self) -> bool {
        self.kind() != ErrorKind::Configuration
    }

    pub fn is_authentication_error(&self) -> bool {
        matches!(self, OpenAIError::Authentication(_))
    }

    pub fn is_rate_limit_error(&self) -> bool {
        matches!(self, OpenAIError::RateLimit(_))
    }

    pub fn error_code(&self) -> Option<&str> {
        match self {
            OpenAIError::Request { error_code, .. } => error_code.as_deref(),
            _ => None,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            OpenAIError::Request { status_code, .. } => Some(*status_code),
            OpenAIError::Authentication(AuthenticationError::InsufficientPermissions(_))
            | OpenAIError::Authentication(AuthenticationError::Unauthorized(_)) => Some(403),
            OpenAIError::Authentication(_) => Some(401),
            OpenAIError::RateLimit(_) => Some(429),
            OpenAIError::Server(ServerError::InternalError(_)) => Some(500),
            OpenAIError::Server(ServerError::BadGateway(_)) => Some(502),
            OpenAIError::Server(ServerError::ServiceUnavailable(_)) => Some(503),
            OpenAIError::Server(ServerError::GatewayTimeout(_)) => Some(504),
            _ => None,
        }
    }

    pub(crate) fn invalid_parameter(parameter: impl Into<String>, reason: impl Into<String>) -> Self {
        OpenAIError::Validation(ValidationError::InvalidParameter {
            parameter: parameter.into(),
            reason: reason.into(),
        })
    }
}

impl From<reqwest::Error> for OpenAIError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_connect() {
            OpenAIError::Network(NetworkError::ConnectionFailed(err.to_string()))
        } else {
            OpenAIError::Network(NetworkError::RequestFailed(err.to_string()))
        }
    }
}

impl From<serde_json::Error> for OpenAIError {
    fn from(err: serde_json::Error) -> Self {
        if err.is_data() || err.is_syntax() || err.is_eof() {
            OpenAIError::Deserialization(err.to_string())
        } else {
            OpenAIError::Serialization(err.to_string())
        }
    }
}

impl From<url::ParseError> for OpenAIError {
    fn from(err: url::ParseError) -> Self {
        OpenAIError::Configuration(ConfigurationError::InvalidBaseUrl(err.to_string()))
    }
}
