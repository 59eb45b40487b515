//! OpenAI image generation node for workflow automation hosts.
//!
//! The node takes a batch of host items, resolves parameters per item, and
//! issues one `images/generations` or `images/variations` request per item,
//! strictly in order. Failures either abort the batch or, with
//! `continue_on_fail`, become `{error}` records in the failing item's slot.

pub mod auth;
pub mod client;
pub mod errors;
pub mod node;
pub mod observability;
pub mod services;
pub mod transport;

#[cfg(any(test, feature = "mocks"))]
pub mod mocks;
#[cfg(test)]
pub mod fixtures;

pub use auth::{Credentials, CREDENTIAL_DISPLAY_NAME, CREDENTIAL_NAME};
pub use client::{OpenAIClient, OpenAIClientBuilder, OpenAIClientImpl, OpenAIConfig};
pub use errors::{ErrorKind, OpenAIError, OpenAIResult};
pub use node::{
    BinaryData, ImageGeneratorNode, Item, NodeOutputItem, NodeParameters, NodeSettings,
    Operation, StaticParameters, NODE_DISPLAY_NAME, NODE_NAME,
};

pub use services::images::{
    ImageData, ImageGenerationRequest, ImageModel, ImageQuality, ImageResponse,
    ImageResponseFormat, ImageService, ImageSize, ImageStyle, ImageVariationRequest,
};

pub mod prelude {
    pub use crate::auth::Credentials;
    pub use crate::client::{OpenAIClient, OpenAIClientBuilder, OpenAIConfig};
    pub use crate::errors::{OpenAIError, OpenAIResult};
    pub use crate::node::{ImageGeneratorNode, Item, NodeParameters, NodeSettings, StaticParameters};
    pub use crate::services::images::{ImageGenerationRequest, ImageService, ImageVariationRequest};
}
