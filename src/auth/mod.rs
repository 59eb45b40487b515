mod credentials;

pub use credentials::{
    Credentials, CREDENTIAL_DISPLAY_NAME, CREDENTIAL_DOCUMENTATION_URL, CREDENTIAL_NAME,
    ORGANIZATION_HEADER,
};

use crate::errors::OpenAIResult;
use std::collections::HashMap;

/// Trait for authentication providers
pub trait AuthProvider: Send + Sync {
    /// Authenticates the request by adding appropriate headers
    fn apply_auth(&self, headers: &mut HashMap<String, String>) -> OpenAIResult<()>;
}
