use crate::errors::{OpenAIError, OpenAIResult, ValidationError};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::str::FromStr;

/// Parameter names understood by the node.
pub mod names {
    pub const OPERATION: &str = "operation";
    pub const PROMPT: &str = "prompt";
    pub const MODEL: &str = "model";
    pub const SIZE: &str = "size";
    pub const N: &str = "n";
    pub const RESPONSE_FORMAT: &str = "responseFormat";
    pub const QUALITY: &str = "quality";
    pub const STYLE: &str = "style";
    pub const BINARY_PROPERTY_NAME: &str = "binaryPropertyName";
}

/// Defaults applied when the host has no value for a parameter.
pub mod defaults {
    pub const OPERATION: &str = "generateImage";
    pub const MODEL: &str = "dall-e-3";
    pub const SIZE: &str = "1024x1024";
    pub const N: u32 = 1;
    pub const RESPONSE_FORMAT: &str = "url";
    pub const QUALITY: &str = "standard";
    pub const STYLE: &str = "vivid";
    pub const BINARY_PROPERTY_NAME: &str = "data";
}

/// Host-side parameter resolution.
///
/// Values may be expressions evaluated against the item at `item_index`, so
/// callers must ask again for every item. `Ok(None)` means "not set";
/// `Err` carries the host's evaluation failure.
pub trait NodeParameters: Send + Sync {
    fn get(&self, name: &str, item_index: usize) -> Result<Option<Value>, String>;
}

/// Fixed parameter values with optional per-item overrides.
#[derive(Debug, Clone, Default)]
pub struct StaticParameters {
    values: Map<String, Value>,
    overrides: HashMap<(usize, String), Value>,
}

impl StaticParameters {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Value used only for the item at `item_index`.
    pub fn set_for_item(
        mut self,
        item_index: usize,
        name: impl Into<String>,
        value: impl Into<Value>,
    ) -> Self {
        self.overrides
            .insert((item_index, name.into()), value.into());
        self
    }
}

impl From<Map<String, Value>> for StaticParameters {
    fn from(values: Map<String, Value>) -> Self {
        Self {
            values,
            overrides: HashMap::new(),
        }
    }
}

impl NodeParameters for StaticParameters {
    fn get(&self, name: &str, item_index: usize) -> Result<Option<Value>, String> {
        Ok(self
            .overrides
            .get(&(item_index, name.to_string()))
            .or_else(|| self.values.get(name))
            .cloned())
    }
}

/// Adapts a closure into [`NodeParameters`].
pub struct FnParameters<F>(pub F);

impl<F> NodeParameters for FnParameters<F>
where
    F: Fn(&str, usize) -> Result<Option<Value>, String> + Send + Sync,
{
    fn get(&self, name: &str, item_index: usize) -> Result<Option<Value>, String> {
        (self.0)(name, item_index)
    }
}

/// Typed reads for one item.
pub(crate) struct ParameterReader<'a> {
    parameters: &'a dyn NodeParameters,
    item_index: usize,
}

impl<'a> ParameterReader<'a> {
    pub(crate) fn new(parameters: &'a dyn NodeParameters, item_index: usize) -> Self {
        Self {
            parameters,
            item_index,
        }
    }

    fn raw(&self, name: &str) -> OpenAIResult<Option<Value>> {
        self.parameters
            .get(name, self.item_index)
            .map(|value| value.filter(|v| !v.is_null()))
            .map_err(|reason| {
                OpenAIError::Validation(ValidationError::ParameterEvaluation {
                    name: name.to_string(),
                    item_index: self.item_index,
                    reason,
                })
            })
    }

    pub(crate) fn string(&self, name: &str, default: &str) -> OpenAIResult<String> {
        match self.raw(name)? {
            None => Ok(default.to_string()),
            Some(Value::String(s)) => Ok(s),
            Some(other) => Err(OpenAIError::invalid_parameter(
                name,
                format!("expected a string, got {}", other),
            )),
        }
    }

    /// Required string; absent counts as empty.
    pub(crate) fn required_string(&self, name: &str) -> OpenAIResult<String> {
        self.string(name, "")
    }

    /// Parses a string parameter into one of the wire enums.
    pub(crate) fn parse<T>(&self, name: &str, default: &str) -> OpenAIResult<T>
    where
        T: FromStr<Err = OpenAIError>,
    {
        self.string(name, default)?.parse()
    }

    /// Positive integer. Whole floats (`2.0`) and numeric strings are
    /// accepted since hosts often hand numbers over that way.
    pub(crate) fn u32(&self, name: &str, default: u32) -> OpenAIResult<u32> {
        let value = match self.raw(name)? {
            None => return Ok(default),
            Some(value) => value,
        };

        let parsed = match &value {
            Value::Number(number) => number.as_u64().or_else(|| {
                number
                    .as_f64()
                    .filter(|f| f.fract() == 0.0 && *f >= 0.0)
                    .map(|f| f as u64)
            }),
            Value::String(s) => s.trim().parse::<u64>().ok(),
            _ => None,
        };

        parsed
            .and_then(|n| u32::try_from(n).ok())
            .ok_or_else(|| {
                OpenAIError::invalid_parameter(
                    name,
                    format!("expected a non-negative integer, got {}", value),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::images::ImageSize;
    use serde_json::json;
    use test_case::test_case;

    #[test]
    fn test_static_parameters_with_override() {
        let params = StaticParameters::new()
            .set("prompt", "A cat")
            .set_for_item(1, "prompt", "A dog");

        assert_eq!(params.get("prompt", 0).unwrap(), Some(json!("A cat")));
        assert_eq!(params.get("prompt", 1).unwrap(), Some(json!("A dog")));
        assert_eq!(params.get("missing", 0).unwrap(), None);
    }

    #[test]
    fn test_reader_defaults() {
        let params = StaticParameters::new();
        let reader = ParameterReader::new(&params, 0);

        assert_eq!(reader.string(names::MODEL, defaults::MODEL).unwrap(), "dall-e-3");
        assert_eq!(reader.u32(names::N, defaults::N).unwrap(), 1);
        assert_eq!(
            reader.parse::<ImageSize>(names::SIZE, defaults::SIZE).unwrap(),
            ImageSize::Size1024
        );
    }

    #[test]
    fn test_reader_null_is_default() {
        let params = StaticParameters::new().set("model", Value::Null);
        let reader = ParameterReader::new(&params, 0);
        assert_eq!(reader.string("model", "dall-e-3").unwrap(), "dall-e-3");
    }

    #[test_case(json!(4), Some(4); "integer")]
    #[test_case(json!(4.0), Some(4); "whole float")]
    #[test_case(json!("7"), Some(7); "numeric string")]
    #[test_case(json!(2.5), None; "fractional")]
    #[test_case(json!(-1), None; "negative")]
    #[test_case(json!(true), None; "boolean")]
    fn test_reader_u32(value: Value, expected: Option<u32>) {
        let params = StaticParameters::new().set("n", value);
        let reader = ParameterReader::new(&params, 0);
        assert_eq!(reader.u32("n", 1).ok(), expected);
    }

    #[test]
    fn test_reader_wrong_type() {
        let params = StaticParameters::new().set("prompt", 42);
        let reader = ParameterReader::new(&params, 0);
        assert!(reader.required_string("prompt").is_err());
    }

    #[test]
    fn test_evaluation_failure_names_item() {
        let params = FnParameters(|name: &str, index: usize| {
            if name == "prompt" && index == 3 {
                Err("Referenced node is unexecuted".to_string())
            } else {
                Ok(None)
            }
        });
        let reader = ParameterReader::new(&params, 3);

        match reader.required_string("prompt").unwrap_err() {
            OpenAIError::Validation(ValidationError::ParameterEvaluation {
                name,
                item_index,
                reason,
            }) => {
                assert_eq!(name, "prompt");
                assert_eq!(item_index, 3);
                assert_eq!(reason, "Referenced node is unexecuted");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
