use crate::client::{OpenAIClient, OpenAIConfig};
use crate::services::images::{ImageService, ImageServiceImpl};
use crate::transport::HttpTransport;
use std::sync::Arc;

pub struct OpenAIClientImpl {
    config: OpenAIConfig,
    images_service: Arc<ImageServiceImpl>,
}

impl OpenAIClientImpl {
    pub fn new(config: OpenAIConfig, transport: Arc<dyn HttpTransport>) -> Self {
        Self {
            config,
            images_service: Arc::new(ImageServiceImpl::new(transport)),
        }
    }
}

impl OpenAIClient for OpenAIClientImpl {
    fn config(&self) -> &OpenAIConfig {
        &self.config
    }

    fn images(&self) -> Arc<dyn ImageService> {
        self.images_service.clone()
    }
}
