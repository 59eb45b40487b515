use crate::errors::{OpenAIError, OpenAIResult, ValidationError};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// Default filename for variation uploads whose source has none.
pub const DEFAULT_IMAGE_FILE_NAME: &str = "image.png";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageModel {
    #[serde(rename = "dall-e-2")]
    DallE2,
    #[default]
    #[serde(rename = "dall-e-3")]
    DallE3,
}

impl ImageModel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageModel::DallE2 => "dall-e-2",
            ImageModel::DallE3 => "dall-e-3",
        }
    }

    /// Only dall-e-3 understands `quality` and `style`.
    pub fn supports_quality_and_style(&self) -> bool {
        matches!(self, ImageModel::DallE3)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ImageSize {
    #[serde(rename = "256x256")]
    Size256,
    #[serde(rename = "512x512")]
    Size512,
    #[default]
    #[serde(rename = "1024x1024")]
    Size1024,
    #[serde(rename = "1792x1024")]
    Size1792x1024,
    #[serde(rename = "1024x1792")]
    Size1024x1792,
}

impl ImageSize {
    pub const ALL: [ImageSize; 5] = [
        ImageSize::Size256,
        ImageSize::Size512,
        ImageSize::Size1024,
        ImageSize::Size1792x1024,
        ImageSize::Size1024x1792,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSize::Size256 => "256x256",
            ImageSize::Size512 => "512x512",
            ImageSize::Size1024 => "1024x1024",
            ImageSize::Size1792x1024 => "1792x1024",
            ImageSize::Size1024x1792 => "1024x1792",
        }
    }

    /// Variations only come in square sizes up to 1024x1024.
    pub fn is_variation_size(&self) -> bool {
        matches!(
            self,
            ImageSize::Size256 | ImageSize::Size512 | ImageSize::Size1024
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageQuality {
    #[default]
    Standard,
    Hd,
}

impl ImageQuality {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageQuality::Standard => "standard",
            ImageQuality::Hd => "hd",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStyle {
    #[default]
    Vivid,
    Natural,
}

impl ImageStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageStyle::Vivid => "vivid",
            ImageStyle::Natural => "natural",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ImageResponseFormat {
    #[default]
    Url,
    B64Json,
}

impl ImageResponseFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageResponseFormat::Url => "url",
            ImageResponseFormat::B64Json => "b64_json",
        }
    }
}

macro_rules! impl_wire_enum {
    ($ty:ty, $param:literal, [$($variant:expr),+ $(,)?]) => {
        impl FromStr for $ty {
            type Err = OpenAIError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                [$($variant),+]
                    .into_iter()
                    .find(|v: &$ty| v.as_str() == s)
                    .ok_or_else(|| {
                        OpenAIError::invalid_parameter($param, format!("unsupported value \"{}\"", s))
                    })
            }
        }

        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

impl_wire_enum!(ImageModel, "model", [ImageModel::DallE2, ImageModel::DallE3]);
impl_wire_enum!(
    ImageSize,
    "size",
    [
        ImageSize::Size256,
        ImageSize::Size512,
        ImageSize::Size1024,
        ImageSize::Size1792x1024,
        ImageSize::Size1024x1792,
    ]
);
impl_wire_enum!(ImageQuality, "quality", [ImageQuality::Standard, ImageQuality::Hd]);
impl_wire_enum!(ImageStyle, "style", [ImageStyle::Vivid, ImageStyle::Natural]);
impl_wire_enum!(
    ImageResponseFormat,
    "responseFormat",
    [ImageResponseFormat::Url, ImageResponseFormat::B64Json]
);

/// Request for `POST /images/generations`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageGenerationRequest {
    pub prompt: String,
    pub model: ImageModel,
    pub n: u32,
    pub size: ImageSize,
    pub response_format: ImageResponseFormat,
    pub quality: Option<ImageQuality>,
    pub style: Option<ImageStyle>,
}

/// JSON body actually sent to the API.
#[derive(Debug, Serialize)]
pub(crate) struct ImageGenerationBody<'a> {
    prompt: &'a str,
    model: ImageModel,
    n: u32,
    size: ImageSize,
    response_format: ImageResponseFormat,
    #[serde(skip_serializing_if = "Option::is_none")]
    quality: Option<ImageQuality>,
    #[serde(skip_serializing_if = "Option::is_none")]
    style: Option<ImageStyle>,
}

impl ImageGenerationRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: ImageModel::default(),
            n: 1,
            size: ImageSize::default(),
            response_format: ImageResponseFormat::default(),
            quality: None,
            style: None,
        }
    }

    pub fn with_model(mut self, model: ImageModel) -> Self {
        self.model = model;
        self
    }

    pub fn with_n(mut self, n: u32) -> Self {
        self.n = n;
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_response_format(mut self, response_format: ImageResponseFormat) -> Self {
        self.response_format = response_format;
        self
    }

    pub fn with_quality(mut self, quality: ImageQuality) -> Self {
        self.quality = Some(quality);
        self
    }

    pub fn with_style(mut self, style: ImageStyle) -> Self {
        self.style = Some(style);
        self
    }

    /// Wire body. `quality` and `style` are dropped unless the model is
    /// dall-e-3.
    pub(crate) fn body(&self) -> ImageGenerationBody<'_> {
        let dalle3 = self.model.supports_quality_and_style();
        ImageGenerationBody {
            prompt: &self.prompt,
            model: self.model,
            n: self.n,
            size: self.size,
            response_format: self.response_format,
            quality: self.quality.filter(|_| dalle3),
            style: self.style.filter(|_| dalle3),
        }
    }
}

/// Request for `POST /images/variations`.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageVariationRequest {
    pub image: Bytes,
    pub file_name: String,
    pub mime_type: String,
    pub n: u32,
    pub size: ImageSize,
    pub response_format: ImageResponseFormat,
}

impl ImageVariationRequest {
    pub fn new(image: impl Into<Bytes>) -> Self {
        Self {
            image: image.into(),
            file_name: DEFAULT_IMAGE_FILE_NAME.to_string(),
            mime_type: mime::IMAGE_PNG.to_string(),
            n: 1,
            size: ImageSize::default(),
            response_format: ImageResponseFormat::default(),
        }
    }

    /// Sets the upload filename; `None` or an empty name keeps `image.png`.
    pub fn with_file_name(mut self, file_name: Option<impl Into<String>>) -> Self {
        self.file_name = file_name
            .map(Into::into)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_IMAGE_FILE_NAME.to_string());
        self
    }

    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = mime_type.into();
        self
    }

    pub fn with_n(mut self, n: u32) -> Self {
        self.n = n;
        self
    }

    pub fn with_size(mut self, size: ImageSize) -> Self {
        self.size = size;
        self
    }

    pub fn with_response_format(mut self, response_format: ImageResponseFormat) -> Self {
        self.response_format = response_format;
        self
    }
}

/// Typed view of an images API response.
///
/// The node itself passes the provider JSON through untouched; this is for
/// callers that want to work with the result directly.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ImageResponse {
    pub created: i64,
    pub data: Vec<ImageData>,
}

impl ImageResponse {
    pub fn decode(value: &Value) -> OpenAIResult<Self> {
        Self::deserialize(value).map_err(|e| {
            OpenAIError::Deserialization(format!("Failed to decode image response: {}", e))
        })
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ImageData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub b64_json: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revised_prompt: Option<String>,
}

impl ImageData {
    /// Decodes the `b64_json` payload into raw image bytes.
    pub fn decode_b64(&self) -> OpenAIResult<Bytes> {
        let encoded = self.b64_json.as_deref().ok_or_else(|| {
            OpenAIError::Validation(ValidationError::MissingRequiredField(
                "b64_json".to_string(),
            ))
        })?;

        STANDARD
            .decode(encoded)
            .map(Bytes::from)
            .map_err(|e| OpenAIError::Deserialization(format!("Invalid b64_json payload: {}", e)))
    }
}
