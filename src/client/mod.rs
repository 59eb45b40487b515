mod client_impl;
mod config;
mod factory;

pub use client_impl::OpenAIClientImpl;
pub use config::{OpenAIConfig, DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
pub use factory::OpenAIClientBuilder;

use crate::node::{ImageGeneratorNode, NodeSettings};
use crate::services::images::ImageService;
use std::sync::Arc;

/// Entry point tying a transport to the image service and the node.
pub trait OpenAIClient: Send + Sync {
    fn config(&self) -> &OpenAIConfig;

    fn images(&self) -> Arc<dyn ImageService>;

    /// A node that runs batches through this client's image service.
    fn image_node(&self, settings: NodeSettings) -> ImageGeneratorNode {
        ImageGeneratorNode::new(self.images(), settings)
    }
}
