//! Image API fixtures

use serde_json::json;

/// Sample image generation response with URLs
pub fn image_generation_response() -> serde_json::Value {
    json!({
        "created": 1677610602,
        "data": [{
            "url": "https://example.com/image1.png",
            "revised_prompt": "A white siamese cat sitting on a windowsill"
        }]
    })
}

/// Sample image generation response with base64 data (a 1x1 PNG)
pub fn image_generation_response_b64() -> serde_json::Value {
    json!({
        "created": 1677610602,
        "data": [{
            "b64_json": "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mNk+M9QDwADhgGAWjR9awAAAABJRU5ErkJggg=="
        }]
    })
}

/// Sample image variation response with two images
pub fn image_variation_response() -> serde_json::Value {
    json!({
        "created": 1677610602,
        "data": [
            { "url": "https://example.com/variation1.png" },
            { "url": "https://example.com/variation2.png" }
        ]
    })
}

/// Raw bytes of a 1x1 PNG, used as variation input
pub fn png_bytes() -> Vec<u8> {
    vec![
        0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00, 0x00, 0x0D, 0x49, 0x48, 0x44,
        0x52, 0x00, 0x00, 0x00, 0x01, 0x00, 0x00, 0x00, 0x01,
    ]
}
