use crate::errors::{OpenAIError, OpenAIResult, ValidationError};
use crate::services::images::{ImageGenerationRequest, ImageModel, ImageVariationRequest};

const MIN_IMAGES: u32 = 1;
const MAX_IMAGES: u32 = 10;

/// Rejects requests the API would refuse, before anything goes on the wire.
pub struct ImageRequestValidator;

impl ImageRequestValidator {
    pub fn validate_generation(request: &ImageGenerationRequest) -> OpenAIResult<()> {
        if request.prompt.trim().is_empty() {
            return Err(OpenAIError::Validation(
                ValidationError::MissingRequiredField("prompt".to_string()),
            ));
        }

        Self::validate_n(request.n)?;

        if request.model == ImageModel::DallE2 {
            if request.quality.is_some() {
                return Err(OpenAIError::invalid_parameter(
                    "quality",
                    "only supported by dall-e-3",
                ));
            }
            if request.style.is_some() {
                return Err(OpenAIError::invalid_parameter(
                    "style",
                    "only supported by dall-e-3",
                ));
            }
        }

        Ok(())
    }

    pub fn validate_variation(request: &ImageVariationRequest) -> OpenAIResult<()> {
        Self::validate_n(request.n)?;

        if !request.size.is_variation_size() {
            return Err(OpenAIError::invalid_parameter(
                "size",
                format!(
                    "\"{}\" is not available for variations (use 256x256, 512x512 or 1024x1024)",
                    request.size
                ),
            ));
        }

        request.mime_type.parse::<mime::Mime>().map_err(|e| {
            OpenAIError::invalid_parameter(
                "mimeType",
                format!("\"{}\" is not a valid MIME type: {}", request.mime_type, e),
            )
        })?;

        Ok(())
    }

    fn validate_n(n: u32) -> OpenAIResult<()> {
        if !(MIN_IMAGES..=MAX_IMAGES).contains(&n) {
            return Err(OpenAIError::Validation(ValidationError::ValueOutOfRange {
                field: "n".to_string(),
                min: MIN_IMAGES.to_string(),
                max: MAX_IMAGES.to_string(),
                value: n.to_string(),
            }));
        }
        Ok(())
    }
}
