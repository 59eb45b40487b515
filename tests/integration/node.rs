//! Integration tests for the batch driver

use super::*;
use integrations_openai_images::node::{BinaryData, FnParameters, PairedItem};
use integrations_openai_images::{ErrorKind, NodeOutputItem};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::Mock;

fn items(count: usize) -> Vec<Item> {
    (0..count).map(|_| Item::default()).collect()
}

/// Prompts `p0`, `p1`, ... resolved per item through a closure, the way a
/// host expression would be.
fn indexed_prompts(operation: &'static str) -> impl NodeParameters {
    FnParameters(move |name: &str, index: usize| -> Result<Option<Value>, String> {
        Ok(match name {
            "operation" => Some(json!(operation)),
            "prompt" => Some(json!(format!("p{}", index))),
            _ => None,
        })
    })
}

async fn mount_generation_mocks(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .and(body_partial_json(json!({"prompt": "p2"})))
        .respond_with(error_response(400, "Invalid prompt"))
        .with_priority(1)
        .mount(server)
        .await;

    Mock::given(method("POST"))
        .and(path("/v1/images/generations"))
        .respond_with(success_response(image_response("https://example.com/ok.png")))
        .with_priority(2)
        .mount(server)
        .await;
}

fn received_prompts(requests: &[wiremock::Request]) -> Vec<Value> {
    requests
        .iter()
        .map(|r| serde_json::from_slice::<Value>(&r.body).unwrap()["prompt"].clone())
        .collect()
}

#[tokio::test]
async fn test_third_item_fails_without_isolation() {
    let mock_server = setup_mock_server().await;
    mount_generation_mocks(&mock_server).await;

    let node = client_for(&mock_server).image_node(NodeSettings::default());
    let result = node
        .execute(&items(3), &indexed_prompts("generateImage"), &credentials())
        .await;

    let error = result.unwrap_err();
    assert_eq!(error.kind(), ErrorKind::Request);
    assert!(error.to_string().contains("Invalid prompt"));

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(received_prompts(&requests), vec![json!("p0"), json!("p1"), json!("p2")]);
}

#[tokio::test]
async fn test_third_item_isolated_with_continue_on_fail() {
    let mock_server = setup_mock_server().await;
    mount_generation_mocks(&mock_server).await;

    let node = client_for(&mock_server).image_node(NodeSettings::continue_on_fail());
    let output = node
        .execute(&items(3), &indexed_prompts("generateImage"), &credentials())
        .await
        .expect("batch should complete");

    assert_eq!(output.len(), 3);
    assert_eq!(output[0].json, image_response("https://example.com/ok.png"));
    assert_eq!(output[1].json, image_response("https://example.com/ok.png"));
    assert!(output[2]
        .error_message()
        .expect("third record is an error record")
        .contains("Invalid prompt"));

    let paired: Vec<PairedItem> = output.iter().map(|r| r.paired_item).collect();
    assert_eq!(
        paired,
        vec![PairedItem { item: 0 }, PairedItem { item: 1 }, PairedItem { item: 2 }]
    );
}

#[tokio::test]
async fn test_variation_batch_with_missing_binary() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/v1/images/variations"))
        .respond_with(success_response(image_response("https://example.com/v.png")))
        .expect(2)
        .mount(&mock_server)
        .await;

    let with_image = |name: Option<&str>| {
        let mut binary = BinaryData::new(png_bytes(), "image/png");
        if let Some(name) = name {
            binary = binary.with_file_name(name);
        }
        Item::default().with_binary("data", binary)
    };

    let batch = vec![with_image(Some("first.png")), Item::default(), with_image(None)];
    let params = StaticParameters::new()
        .set("operation", "createVariation")
        .set("size", "256x256");

    let node = client_for(&mock_server).image_node(NodeSettings::continue_on_fail());
    let output = node.execute(&batch, &params, &credentials()).await.unwrap();

    assert_eq!(output.len(), 3);
    assert_eq!(
        output[1],
        NodeOutputItem {
            json: json!({"error": "No binary data exists on item!"}),
            paired_item: PairedItem { item: 1 },
        }
    );

    let requests = mock_server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    assert!(String::from_utf8_lossy(&requests[0].body).contains("filename=\"first.png\""));
    assert!(String::from_utf8_lossy(&requests[1].body).contains("filename=\"image.png\""));
    assert!(String::from_utf8_lossy(&requests[1].body).contains("256x256"));
}

#[tokio::test]
async fn test_items_from_host_json() {
    let mock_server = setup_mock_server().await;

    Mock::given(method("POST"))
        .and(path("/v1/images/variations"))
        .respond_with(success_response(image_response("https://example.com/v.png")))
        .mount(&mock_server)
        .await;

    let batch: Vec<Item> = serde_json::from_value(json!([
        {
            "json": {},
            "binary": {
                "picture": { "data": "iVBORw0KGgo=", "mimeType": "image/png", "fileName": "pic.png" }
            }
        },
        {
            "json": {},
            "binary": {
                "data": { "data": "iVBORw0KGgo=", "mimeType": "image/png" }
            }
        }
    ]))
    .unwrap();

    let params = StaticParameters::new()
        .set("operation", "createVariation")
        .set("binaryPropertyName", "picture");

    let node = client_for(&mock_server).image_node(NodeSettings::continue_on_fail());
    let output = node.execute(&batch, &params, &credentials()).await.unwrap();

    assert_eq!(output[0].json, image_response("https://example.com/v.png"));
    assert_eq!(
        output[1].error_message(),
        Some("No binary data property \"picture\" exists on item!")
    );
}
