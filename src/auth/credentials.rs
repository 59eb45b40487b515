use crate::auth::AuthProvider;
use crate::errors::{ConfigurationError, OpenAIError, OpenAIResult};
use http::header::{AUTHORIZATION, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::collections::HashMap;

/// Name under which the host stores this credential type.
pub const CREDENTIAL_NAME: &str = "openAIApi";

/// Human readable credential name.
pub const CREDENTIAL_DISPLAY_NAME: &str = "OpenAI API";

pub const CREDENTIAL_DOCUMENTATION_URL: &str =
    "https://platform.openai.com/docs/api-reference/authentication";

pub const ORGANIZATION_HEADER: &str = "OpenAI-Organization";

/// OpenAI API credentials as supplied by the host.
///
/// Deserializes from the host credential record
/// (`{"apiKey": "...", "organizationId": "..."}`). The key is held as a
/// [`SecretString`] and never printed.
#[derive(Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    api_key: SecretString,
    #[serde(default)]
    organization_id: Option<String>,
}

impl Credentials {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: SecretString::new(api_key.into()),
            organization_id: None,
        }
    }

    pub fn with_organization_id(mut self, organization_id: impl Into<String>) -> Self {
        self.organization_id = Some(organization_id.into());
        self
    }

    /// Decodes the host credential record.
    pub fn from_json(value: serde_json::Value) -> OpenAIResult<Self> {
        serde_json::from_value(value).map_err(|e| {
            OpenAIError::Configuration(ConfigurationError::InvalidCredentials(e.to_string()))
        })
    }

    /// Reads `OPENAI_API_KEY` and, when set, `OPENAI_ORGANIZATION_ID`.
    pub fn from_env() -> OpenAIResult<Self> {
        let api_key = std::env::var("OPENAI_API_KEY").map_err(|_| {
            OpenAIError::Configuration(ConfigurationError::MissingApiKey(
                "OPENAI_API_KEY environment variable not found".to_string(),
            ))
        })?;

        let mut credentials = Self::new(api_key);
        if let Ok(org_id) = std::env::var("OPENAI_ORGANIZATION_ID") {
            credentials.organization_id = Some(org_id);
        }

        Ok(credentials)
    }

    pub fn api_key(&self) -> &str {
        self.api_key.expose_secret()
    }

    /// The organization ID, treating an empty value as absent.
    pub fn organization_id(&self) -> Option<&str> {
        self.organization_id
            .as_deref()
            .map(str::trim)
            .filter(|id| !id.is_empty())
    }

    /// Last four characters of the key, for log lines.
    pub fn key_hint(&self) -> String {
        let key = self.api_key.expose_secret();
        let len = key.chars().count();
        if len > 4 {
            format!("...{}", key.chars().skip(len - 4).collect::<String>())
        } else {
            "****".to_string()
        }
    }

    /// Checks the required fields. Called once per batch.
    pub fn validate(&self) -> OpenAIResult<()> {
        let key = self.api_key.expose_secret();

        if key.trim().is_empty() {
            return Err(OpenAIError::Configuration(
                ConfigurationError::MissingApiKey("API key is empty".to_string()),
            ));
        }

        if HeaderValue::from_str(&format!("Bearer {}", key)).is_err() {
            return Err(OpenAIError::Configuration(
                ConfigurationError::InvalidApiKeyFormat(
                    "API key contains characters that are not valid in a header".to_string(),
                ),
            ));
        }

        if let Some(org_id) = self.organization_id() {
            if HeaderValue::from_str(org_id).is_err() {
                return Err(OpenAIError::Configuration(
                    ConfigurationError::InvalidOrganizationId(
                        "Invalid organization ID format".to_string(),
                    ),
                ));
            }
        }

        if !key.starts_with("sk-") {
            tracing::warn!(
                key_hint = %self.key_hint(),
                "API key does not match expected OpenAI format (sk-*)"
            );
        }

        Ok(())
    }
}

impl AuthProvider for Credentials {
    fn apply_auth(&self, headers: &mut HashMap<String, String>) -> OpenAIResult<()> {
        self.validate()?;

        headers.insert(
            AUTHORIZATION.as_str().to_string(),
            format!("Bearer {}", self.api_key.expose_secret()),
        );

        if let Some(org_id) = self.organization_id() {
            headers.insert(ORGANIZATION_HEADER.to_string(), org_id.to_string());
        }

        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"[REDACTED]")
            .field("key_hint", &self.key_hint())
            .field("organization_id", &self.organization_id)
            .finish()
    }
}
