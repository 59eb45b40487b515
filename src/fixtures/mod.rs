//! Test fixtures for OpenAI image API responses

mod error_fixtures;
mod image_fixtures;

pub use error_fixtures::*;
pub use image_fixtures::*;
