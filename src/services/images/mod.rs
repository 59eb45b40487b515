mod service;
mod types;
mod validation;


pub use service::{ImageService, ImageServiceImpl, GENERATIONS_PATH, VARIATIONS_PATH};
pub use types::{
    ImageData, ImageGenerationRequest, ImageModel, ImageQuality, ImageResponse,
    ImageResponseFormat, ImageSize, ImageStyle, ImageVariationRequest, DEFAULT_IMAGE_FILE_NAME,
};
pub use validation::ImageRequestValidator;
