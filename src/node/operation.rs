use crate::errors::{ConfigurationError, OpenAIError, OpenAIResult, ValidationError};
use crate::node::item::Item;
use crate::node::parameters::{defaults, names, NodeParameters, ParameterReader};
use crate::services::images::{
    ImageGenerationRequest, ImageModel, ImageQuality, ImageResponseFormat, ImageSize, ImageStyle,
    ImageVariationRequest,
};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    GenerateImage,
    CreateVariation,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::GenerateImage => "generateImage",
            Operation::CreateVariation => "createVariation",
        }
    }

    /// Reads the operation selector. It is read once per batch, from item 0,
    /// and any failure here aborts the batch.
    pub fn resolve(parameters: &dyn NodeParameters) -> OpenAIResult<Self> {
        ParameterReader::new(parameters, 0)
            .string(names::OPERATION, defaults::OPERATION)?
            .parse()
    }
}

impl FromStr for Operation {
    type Err = OpenAIError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generateImage" => Ok(Operation::GenerateImage),
            "createVariation" => Ok(Operation::CreateVariation),
            other => Err(OpenAIError::Configuration(
                ConfigurationError::UnsupportedOperation(other.to_string()),
            )),
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fully resolved request for one item.
#[derive(Debug, Clone, PartialEq)]
pub enum OperationRequest {
    GenerateImage(ImageGenerationRequest),
    CreateVariation(ImageVariationRequest),
}

impl OperationRequest {
    /// Resolves every per-item parameter for `item` and, for variations,
    /// checks the binary attachment. Nothing here touches the network.
    pub fn resolve(
        operation: Operation,
        parameters: &dyn NodeParameters,
        item: &Item,
        item_index: usize,
    ) -> OpenAIResult<Self> {
        let reader = ParameterReader::new(parameters, item_index);

        match operation {
            Operation::GenerateImage => {
                let prompt = reader.required_string(names::PROMPT)?;
                let model: ImageModel = reader.parse(names::MODEL, defaults::MODEL)?;
                let size: ImageSize = reader.parse(names::SIZE, defaults::SIZE)?;
                let n = reader.u32(names::N, defaults::N)?;
                let response_format: ImageResponseFormat =
                    reader.parse(names::RESPONSE_FORMAT, defaults::RESPONSE_FORMAT)?;

                let mut request = ImageGenerationRequest::new(prompt)
                    .with_model(model)
                    .with_size(size)
                    .with_n(n)
                    .with_response_format(response_format);

                // quality and style only exist for dall-e-3 and are not read otherwise
                if model.supports_quality_and_style() {
                    let quality: ImageQuality = reader.parse(names::QUALITY, defaults::QUALITY)?;
                    let style: ImageStyle = reader.parse(names::STYLE, defaults::STYLE)?;
                    request = request.with_quality(quality).with_style(style);
                }

                Ok(OperationRequest::GenerateImage(request))
            }
            Operation::CreateVariation => {
                let property = reader.string(
                    names::BINARY_PROPERTY_NAME,
                    defaults::BINARY_PROPERTY_NAME,
                )?;
                let n = reader.u32(names::N, defaults::N)?;
                let size: ImageSize = reader.parse(names::SIZE, defaults::SIZE)?;
                let response_format: ImageResponseFormat =
                    reader.parse(names::RESPONSE_FORMAT, defaults::RESPONSE_FORMAT)?;

                let binary = item
                    .binary
                    .as_ref()
                    .ok_or(OpenAIError::Validation(ValidationError::MissingBinaryData))?;
                let data = binary.get(&property).ok_or_else(|| {
                    OpenAIError::Validation(ValidationError::MissingBinaryProperty(
                        property.clone(),
                    ))
                })?;

                let mut request = ImageVariationRequest::new(data.data.clone())
                    .with_file_name(data.file_name.clone())
                    .with_n(n)
                    .with_size(size)
                    .with_response_format(response_format);
                if !data.mime_type.is_empty() {
                    request = request.with_mime_type(data.mime_type.clone());
                }

                Ok(OperationRequest::CreateVariation(request))
            }
        }
    }

    pub fn operation(&self) -> Operation {
        match self {
            OperationRequest::GenerateImage(_) => Operation::GenerateImage,
            OperationRequest::CreateVariation(_) => Operation::CreateVariation,
        }
    }
}
