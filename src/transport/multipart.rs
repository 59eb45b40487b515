use crate::errors::{OpenAIError, OpenAIResult};
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use std::collections::HashMap;

/// A part of a multipart form.
#[derive(Debug, Clone)]
pub enum MultipartPart {
    Text {
        name: String,
        value: String,
    },
    File {
        name: String,
        filename: String,
        content_type: String,
        data: Bytes,
    },
}

impl MultipartPart {
    pub fn name(&self) -> &str {
        match self {
            MultipartPart::Text { name, .. } | MultipartPart::File { name, .. } => name,
        }
    }
}

/// Multipart request for file uploads.
#[derive(Debug, Clone)]
pub struct MultipartRequest {
    /// Path relative to the configured base URL.
    pub path: String,
    pub headers: HashMap<String, String>,
    pub parts: Vec<MultipartPart>,
}

impl MultipartRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            headers: HashMap::new(),
            parts: Vec::new(),
        }
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Adds a text field to the form
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.parts.push(MultipartPart::Text {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Adds a file field to the form
    pub fn file(
        mut self,
        name: impl Into<String>,
        filename: impl Into<String>,
        content_type: impl Into<String>,
        data: Bytes,
    ) -> Self {
        self.parts.push(MultipartPart::File {
            name: name.into(),
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        });
        self
    }

    pub fn part(&self, name: &str) -> Option<&MultipartPart> {
        self.parts.iter().find(|part| part.name() == name)
    }

    /// Value of a text field, if present.
    pub fn text_value(&self, name: &str) -> Option<&str> {
        match self.part(name) {
            Some(MultipartPart::Text { value, .. }) => Some(value),
            _ => None,
        }
    }

    /// Converts the parts into a reqwest form.
    pub fn into_form(self) -> OpenAIResult<Form> {
        let mut form = Form::new();

        for part in self.parts {
            form = match part {
                MultipartPart::Text { name, value } => form.text(name, value),
                MultipartPart::File {
                    name,
                    filename,
                    content_type,
                    data,
                } => {
                    let part = Part::bytes(data.to_vec())
                        .file_name(filename)
                        .mime_str(&content_type)
                        .map_err(|e| {
                            OpenAIError::Serialization(format!(
                                "Invalid content type '{}' for part '{}': {}",
                                content_type, name, e
                            ))
                        })?;
                    form.part(name, part)
                }
            };
        }

        Ok(form)
    }
}
