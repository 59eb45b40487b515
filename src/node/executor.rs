use crate::auth::Credentials;
use crate::errors::OpenAIResult;
use crate::node::item::{ErrorRecord, Item, NodeOutputItem};
use crate::node::operation::{Operation, OperationRequest};
use crate::node::parameters::NodeParameters;
use crate::services::images::ImageService;
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Batch-level policy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NodeSettings {
    /// Capture per-item failures as `{error}` records instead of aborting.
    pub continue_on_fail: bool,
}

impl NodeSettings {
    pub fn continue_on_fail() -> Self {
        Self {
            continue_on_fail: true,
        }
    }
}

/// Runs one of the image operations over a batch of items.
///
/// Items are processed strictly in order, one request in flight at a time.
/// Output record `i` (or records, when the provider returns an array) always
/// carries `pairedItem.item == i`.
pub struct ImageGeneratorNode {
    images: Arc<dyn ImageService>,
    settings: NodeSettings,
}

impl ImageGeneratorNode {
    pub fn new(images: Arc<dyn ImageService>, settings: NodeSettings) -> Self {
        Self { images, settings }
    }

    pub fn settings(&self) -> NodeSettings {
        self.settings
    }

    /// Executes the batch.
    ///
    /// Credentials and the operation selector are checked once up front;
    /// problems there always abort. Per-item failures abort too unless
    /// `continue_on_fail` is set, in which case they become error records.
    #[instrument(skip_all, fields(items = items.len(), continue_on_fail = self.settings.continue_on_fail))]
    pub async fn execute(
        &self,
        items: &[Item],
        parameters: &dyn NodeParameters,
        credentials: &Credentials,
    ) -> OpenAIResult<Vec<NodeOutputItem>> {
        credentials.validate()?;
        let operation = Operation::resolve(parameters)?;
        info!(%operation, key = %credentials.key_hint(), "Executing image operation");

        let mut output = Vec::with_capacity(items.len());

        for (index, item) in items.iter().enumerate() {
            match self
                .execute_item(operation, parameters, item, index, credentials)
                .await
            {
                Ok(records) => {
                    debug!(item_index = index, records = records.len(), "Item completed");
                    output.extend(records);
                }
                Err(err) if self.settings.continue_on_fail && err.is_isolatable() => {
                    warn!(item_index = index, error = %err, "Item failed, continuing");
                    output.push(NodeOutputItem::from_error(
                        ErrorRecord::new(err.to_string()),
                        index,
                    ));
                }
                Err(err) => {
                    error!(item_index = index, error = %err, "Item failed, aborting batch");
                    return Err(err);
                }
            }
        }

        Ok(output)
    }

    async fn execute_item(
        &self,
        operation: Operation,
        parameters: &dyn NodeParameters,
        item: &Item,
        index: usize,
        credentials: &Credentials,
    ) -> OpenAIResult<Vec<NodeOutputItem>> {
        let request = OperationRequest::resolve(operation, parameters, item, index)?;

        let response = match &request {
            OperationRequest::GenerateImage(request) => {
                self.images.generate(request, credentials).await?
            }
            OperationRequest::CreateVariation(request) => {
                self.images.create_variation(request, credentials).await?
            }
        };

        Ok(NodeOutputItem::from_response(response, index))
    }
}
