//! Example: generate a small batch of images through the node
//!
//! Each input item carries a `subject`; the prompt is built per item, the
//! way a host expression would resolve it.
//!
//! ## Usage
//!
//! ```bash
//! export OPENAI_API_KEY=sk-...
//! cargo run --example generate_batch
//! ```

use integrations_openai_images::node::FnParameters;
use integrations_openai_images::observability::LoggingConfig;
use integrations_openai_images::prelude::*;
use serde_json::{json, Map, Value};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    LoggingConfig::from_env().init()?;

    let client = OpenAIClientBuilder::from_env()?.build()?;
    let credentials = Credentials::from_env()?;

    let subjects = ["a lighthouse at dusk", "a red fox in snow", "a paper boat"];
    let items: Vec<Item> = subjects
        .iter()
        .map(|subject| {
            let mut json = Map::new();
            json.insert("subject".to_string(), json!(subject));
            Item::new(json)
        })
        .collect();

    let parameters = FnParameters(|name: &str, index: usize| -> Result<Option<Value>, String> {
        Ok(match name {
            "operation" => Some(json!("generateImage")),
            "model" => Some(json!("dall-e-2")),
            "size" => Some(json!("256x256")),
            "prompt" => subjects
                .get(index)
                .map(|subject| json!(format!("A watercolor painting of {}", subject))),
            _ => None,
        })
    });

    let node = client.image_node(NodeSettings::continue_on_fail());
    let output = node.execute(&items, &parameters, &credentials).await?;

    for record in &output {
        match record.error_message() {
            Some(error) => println!("item {}: failed: {}", record.paired_item.item, error),
            None => println!(
                "item {}: {}",
                record.paired_item.item,
                record.json["data"][0]["url"].as_str().unwrap_or("<no url>")
            ),
        }
    }

    Ok(())
}
