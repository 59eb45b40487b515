use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::HashMap;

/// One input item as handed over by the host.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Item {
    #[serde(default)]
    pub json: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary: Option<HashMap<String, BinaryData>>,
}

impl Item {
    pub fn new(json: Map<String, Value>) -> Self {
        Self { json, binary: None }
    }

    /// Attaches a binary property, creating the binary map if needed.
    pub fn with_binary(mut self, property: impl Into<String>, data: BinaryData) -> Self {
        self.binary
            .get_or_insert_with(HashMap::new)
            .insert(property.into(), data);
        self
    }

    pub fn binary(&self, property: &str) -> Option<&BinaryData> {
        self.binary.as_ref().and_then(|binary| binary.get(property))
    }
}

/// A binary attachment. On the wire the payload is base64 in `data`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BinaryData {
    #[serde(with = "base64_bytes")]
    pub data: Bytes,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
}

impl BinaryData {
    pub fn new(data: impl Into<Bytes>, mime_type: impl Into<String>) -> Self {
        Self {
            data: data.into(),
            mime_type: mime_type.into(),
            file_name: None,
        }
    }

    pub fn with_file_name(mut self, file_name: impl Into<String>) -> Self {
        self.file_name = Some(file_name.into());
        self
    }
}

mod base64_bytes {
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use bytes::Bytes;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(data: &Bytes, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(data))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Bytes, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.trim())
            .map(Bytes::from)
            .map_err(serde::de::Error::custom)
    }
}

/// Links an output record back to the input item it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PairedItem {
    pub item: usize,
}

/// One output record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeOutputItem {
    pub json: Value,
    pub paired_item: PairedItem,
}

impl NodeOutputItem {
    /// Turns a provider response into output records for item `item_index`.
    /// An array fans out into one record per element; anything else becomes
    /// a single record.
    pub fn from_response(response: Value, item_index: usize) -> Vec<Self> {
        let paired_item = PairedItem { item: item_index };
        match response {
            Value::Array(values) => values
                .into_iter()
                .map(|json| Self { json, paired_item })
                .collect(),
            json => vec![Self { json, paired_item }],
        }
    }

    /// Record that takes the place of a failed item.
    pub fn from_error(record: ErrorRecord, item_index: usize) -> Self {
        Self {
            json: record.into_json(),
            paired_item: PairedItem { item: item_index },
        }
    }

    /// The error message if this is an error record.
    pub fn error_message(&self) -> Option<&str> {
        match &self.json {
            Value::Object(map) if map.len() == 1 => map.get("error").and_then(Value::as_str),
            _ => None,
        }
    }
}

/// `{ "error": <message> }`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub error: String,
}

impl ErrorRecord {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }

    fn into_json(self) -> Value {
        let mut map = Map::new();
        map.insert("error".to_string(), Value::String(self.error));
        Value::Object(map)
    }
}
