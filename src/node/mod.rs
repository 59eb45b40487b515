//! The workflow node: host item shapes, per-item parameter resolution and
//! the sequential batch driver.

mod executor;
mod item;
mod operation;
mod parameters;

pub use executor::{ImageGeneratorNode, NodeSettings};
pub use item::{BinaryData, ErrorRecord, Item, NodeOutputItem, PairedItem};
pub use operation::{Operation, OperationRequest};
pub use parameters::{defaults, names, FnParameters, NodeParameters, StaticParameters};

/// Name the host registers the node under.
pub const NODE_NAME: &str = "openAiImageGenerator";

pub const NODE_DISPLAY_NAME: &str = "OpenAI Image Generator";

pub const NODE_DESCRIPTION: &str = "Generate images using OpenAI's DALL-E models";

pub const NODE_VERSION: u32 = 1;
