use crate::client::{OpenAIClient, OpenAIClientImpl, OpenAIConfig};
use crate::errors::OpenAIResult;
use crate::transport::{HttpTransport, ReqwestTransport};
use std::sync::Arc;

pub struct OpenAIClientBuilder {
    config: Option<OpenAIConfig>,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl OpenAIClientBuilder {
    pub fn new() -> Self {
        Self {
            config: None,
            transport: None,
        }
    }

    /// Starts from [`OpenAIConfig::from_env`].
    pub fn from_env() -> OpenAIResult<Self> {
        Ok(Self::new().with_config(OpenAIConfig::from_env()?))
    }

    pub fn with_config(mut self, config: OpenAIConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Overrides the transport; the config's base URL and timeout are then
    /// up to the supplied transport.
    pub fn with_transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    pub fn build(self) -> OpenAIResult<Arc<dyn OpenAIClient>> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(ReqwestTransport::new(&config)?),
        };

        Ok(Arc::new(OpenAIClientImpl::new(config, transport)))
    }
}

impl Default for OpenAIClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
