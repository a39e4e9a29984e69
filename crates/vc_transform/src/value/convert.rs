use alloc::string::String;
use alloc::vec::Vec;

use serde::ser::{Error as _, Serialize, SerializeMap, SerializeSeq, Serializer};
use serde_json::{Map, Value as JsonValue};

use crate::transformer::TransformError;
use crate::value::{Dictionary, Value};

// -----------------------------------------------------------------------------
// serde_json::Value -> Value

impl From<JsonValue> for Value {
    fn from(value: JsonValue) -> Self {
        match value {
            JsonValue::Null => Value::Null,
            JsonValue::Bool(value) => Value::Bool(value),
            JsonValue::Number(value) => Value::Number(value),
            JsonValue::String(value) => Value::String(value),
            JsonValue::Array(values) => Value::Array(values.into_iter().map(Value::from).collect()),
            JsonValue::Object(entries) => Value::Dictionary(
                entries
                    .into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

// -----------------------------------------------------------------------------
// Value -> serde_json::Value

impl Value {
    /// Converts to a JSON value.
    ///
    /// Fails with [`TransformError::UnexpectedInput`] if a model is found
    /// anywhere inside, models must be turned into dictionaries first.
    pub fn to_json(&self) -> Result<JsonValue, TransformError> {
        Ok(match self {
            Value::Null => JsonValue::Null,
            Value::Bool(value) => JsonValue::Bool(*value),
            Value::Number(value) => JsonValue::Number(value.clone()),
            Value::String(value) => JsonValue::String(value.clone()),
            Value::Array(values) => {
                JsonValue::Array(values.iter().map(Value::to_json).collect::<Result<Vec<_>, _>>()?)
            }
            Value::Dictionary(entries) => JsonValue::Object(dictionary_to_json(entries)?),
            Value::Model(_) => {
                return Err(TransformError::UnexpectedInput {
                    expected: "a JSON value",
                    found: "model",
                });
            }
        })
    }
}

fn dictionary_to_json(entries: &Dictionary) -> Result<Map<String, JsonValue>, TransformError> {
    entries
        .iter()
        .map(|(key, value)| Ok((key.clone(), value.to_json()?)))
        .collect()
}

impl TryFrom<Value> for JsonValue {
    type Error = TransformError;

    #[inline]
    fn try_from(value: Value) -> Result<Self, Self::Error> {
        value.to_json()
    }
}

impl TryFrom<&Value> for JsonValue {
    type Error = TransformError;

    #[inline]
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        value.to_json()
    }
}

// -----------------------------------------------------------------------------
// Serialize

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(value) => serializer.serialize_bool(*value),
            Value::Number(value) => value.serialize(serializer),
            Value::String(value) => serializer.serialize_str(value),
            Value::Array(values) => {
                let mut seq = serializer.serialize_seq(Some(values.len()))?;
                for value in values {
                    seq.serialize_element(value)?;
                }
                seq.end()
            }
            Value::Dictionary(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Value::Model(model) => Err(S::Error::custom(format_args!(
                "model `{}` cannot be serialized directly",
                model.class().path()
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::{String, ToString};
    use alloc::sync::Arc;

    use serde_json::json;

    use crate::adapter::{ModelObject, ModelRef};
    use crate::transformer::TransformError;
    use crate::value::Value;
    use vc_model::class::{ClassInfo, Model};
    use vc_model::derive::Model;

    #[derive(Model)]
    struct Opaque;

    impl ModelObject for Opaque {
        fn class(&self) -> &'static ClassInfo {
            Self::class_info()
        }

        fn value_for_key(&self, _key: &str) -> Option<Value> {
            None
        }
    }

    #[test]
    fn json_round_trip_keeps_tags() {
        let json = json!({ "flag": true, "count": 1, "ratio": 0.5, "list": [null, "x"] });
        let value = Value::from(json.clone());
        assert_eq!(value.as_dictionary().unwrap()["flag"], Value::Bool(true));
        assert_eq!(value.to_json().unwrap(), json);
        assert_eq!(serde_json::to_string(&value).unwrap(), json.to_string());
    }

    #[test]
    fn models_do_not_convert() {
        let model: ModelRef = Arc::new(Opaque);
        let value = Value::Array(alloc::vec![Value::Model(model)]);

        assert!(matches!(
            serde_json::Value::try_from(&value),
            Err(TransformError::UnexpectedInput { found: "model", .. })
        ));

        let message: String = serde_json::to_string(&value).unwrap_err().to_string();
        assert!(message.contains("Opaque"));
    }
}
