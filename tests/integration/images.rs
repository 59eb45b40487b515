//! Integration tests for the image service

use super::*;
use integrations_openai_images::{
    ImageModel, ImageQuality, ImageResponse, ImageResponseFormat, ImageSize, ImageStyle,
    OpenAIError,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::Mock;

#[tokio::test]
async fn test_generation_sends_json_with_auth() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .and(header("Authorization", "Bearer sk-test-api-key"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(json!({
            "prompt": "A lighthouse at dusk",
            "model": "dall-e-3",
            "n": 1,
            "size": "1792x1024",
            "response_format": "url",
            "quality": "hd",
            "style": "natural"
        })))
        .respond_with(success_response(image_response("https://example.com/a.png")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = ImageGenerationRequest::new("A lighthouse at dusk")
        .with_size(ImageSize::Size1792x1024)
        .with_quality(ImageQuality::Hd)
        .with_style(ImageStyle::Natural);

    let result = client
        .images()
        .generate(&request, &credentials())
        .await
        .expect("generation should succeed");

    assert_eq!(result, image_response("https://example.com/a.png"));

    let typed = ImageResponse::decode(&result).unwrap();
    assert_eq!(typed.data[0].url.as_deref(), Some("https://example.com/a.png"));
}

#[tokio::test]
async fn test_generation_dalle2_body_has_no_quality_or_style() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .and(body_json(json!({
            "prompt": "A fox",
            "model": "dall-e-2",
            "n": 2,
            "size": "256x256",
            "response_format": "b64_json"
        })))
        .respond_with(success_response(json!({"created": 1, "data": []})))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = ImageGenerationRequest::new("A fox")
        .with_model(ImageModel::DallE2)
        .with_n(2)
        .with_size(ImageSize::Size256)
        .with_response_format(ImageResponseFormat::B64Json);

    client
        .images()
        .generate(&request, &credentials())
        .await
        .expect("generation should succeed");
}

#[tokio::test]
async fn test_organization_header() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(success_response(image_response("https://example.com/x.png")))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = ImageGenerationRequest::new("A cat");

    client
        .images()
        .generate(&request, &credentials())
        .await
        .unwrap();
    client
        .images()
        .generate(&request, &credentials().with_organization_id(""))
        .await
        .unwrap();
    client
        .images()
        .generate(&request, &credentials().with_organization_id("org-abc"))
        .await
        .unwrap();
    client
        .images()
        .create_variation(
            &ImageVariationRequest::new(png_bytes()),
            &credentials().with_organization_id("org-abc"),
        )
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 4);

    let org_headers: Vec<Option<String>> = requests
        .iter()
        .map(|r| {
            r.headers
                .get("openai-organization")
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        })
        .collect();

    assert_eq!(
        org_headers,
        vec![
            None,
            None,
            Some("org-abc".to_string()),
            Some("org-abc".to_string())
        ]
    );
}

#[tokio::test]
async fn test_variation_sends_multipart() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/v1/images/variations"))
        .and(header("Authorization", "Bearer sk-test-api-key"))
        .respond_with(success_response(image_response("https://example.com/v.png")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = ImageVariationRequest::new(png_bytes())
        .with_file_name(Some("photo.png"))
        .with_mime_type("image/png")
        .with_n(2)
        .with_size(ImageSize::Size512);

    client
        .images()
        .create_variation(&request, &credentials())
        .await
        .expect("variation should succeed");

    let requests = mock_server.received_requests().await.unwrap();
    let received = &requests[0];

    let content_type = received
        .headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&received.body);
    assert!(body.contains("name=\"image\"; filename=\"photo.png\""));
    assert!(body.contains("Content-Type: image/png"));
    assert!(body.contains("name=\"n\"\r\n\r\n2\r\n"));
    assert!(body.contains("name=\"size\"\r\n\r\n512x512\r\n"));
    assert!(body.contains("name=\"response_format\"\r\n\r\nurl\r\n"));
}

#[tokio::test]
async fn test_variation_default_file_name() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/v1/images/variations"))
        .respond_with(success_response(image_response("https://example.com/v.png")))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    client
        .images()
        .create_variation(&ImageVariationRequest::new(png_bytes()), &credentials())
        .await
        .unwrap();

    let requests = mock_server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&requests[0].body);
    assert!(body.contains("filename=\"image.png\""));
}

#[tokio::test]
async fn test_variation_wide_size_rejected_locally() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(success_response(json!({})))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let request = ImageVariationRequest::new(png_bytes()).with_size(ImageSize::Size1792x1024);

    let result = client.images().create_variation(&request, &credentials()).await;
    assert!(matches!(result, Err(OpenAIError::Validation(_))));
}

#[tokio::test]
async fn test_provider_error_is_mapped() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(error_response(
            400,
            "Your request was rejected as a result of our safety system.",
        ))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let error = client
        .images()
        .generate(&ImageGenerationRequest::new("A cat"), &credentials())
        .await
        .unwrap_err();

    assert_eq!(error.status_code(), Some(400));
    assert!(error.to_string().contains("safety system"));
}

#[tokio::test]
async fn test_rate_limit_with_retry_after() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(error_response(429, "Rate limit reached").insert_header("Retry-After", "12"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let error = client
        .images()
        .generate(&ImageGenerationRequest::new("A cat"), &credentials())
        .await
        .unwrap_err();

    match error {
        OpenAIError::RateLimit(rate_limit) => assert_eq!(rate_limit.retry_after(), Some(12)),
        other => panic!("expected rate limit error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_timeout_is_reported() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .respond_with(
            success_response(json!({})).set_delay(std::time::Duration::from_millis(500)),
        )
        .mount(&mock_server)
        .await;

    let config = OpenAIConfig::new()
        .with_base_url_str(&format!("{}/v1", mock_server.uri()))
        .unwrap()
        .with_timeout(std::time::Duration::from_millis(50));
    let client = OpenAIClientBuilder::new().with_config(config).build().unwrap();

    let error = client
        .images()
        .generate(&ImageGenerationRequest::new("A cat"), &credentials())
        .await
        .unwrap_err();

    assert!(matches!(error, OpenAIError::Timeout { timeout_ms: 50 }));
}
