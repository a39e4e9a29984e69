use alloc::string::ToString;
use alloc::sync::Arc;
use alloc::vec::Vec;

use ::url::Url;
use vc_model::class::ClassInfo;

use crate::adapter::{JsonAdapter, ModelAdapter};
use crate::transformer::{BOOLEAN_VALUE_TRANSFORMER_NAME, TransformError, URL_VALUE_TRANSFORMER_NAME, ValueTransformer};
use crate::value::{Number, Value};

// -----------------------------------------------------------------------------
// Boolean

/// Normalizes numbers to booleans, in both directions.
///
/// Booleans and null pass unchanged, a number becomes `true` unless it is
/// zero. Anything else fails with [`TransformError::UnexpectedInput`].
///
/// ```
/// use vc_transform::transformer::boolean;
/// use vc_transform::value::Value;
///
/// let t = boolean();
/// assert_eq!(t.apply(Value::from(1)).unwrap(), Value::Bool(true));
/// assert_eq!(t.apply(Value::from(0.0)).unwrap(), Value::Bool(false));
/// assert_eq!(t.apply_reverse(Value::Bool(true)).unwrap(), Value::Bool(true));
/// ```
pub fn boolean() -> ValueTransformer {
    ValueTransformer::reversible(normalize_bool).with_name(BOOLEAN_VALUE_TRANSFORMER_NAME)
}

fn normalize_bool(value: Value) -> Result<Value, TransformError> {
    match value {
        Value::Null | Value::Bool(_) => Ok(value),
        Value::Number(number) => Ok(Value::Bool(!is_zero(&number))),
        other => Err(TransformError::unexpected("bool or number", &other)),
    }
}

#[inline]
fn is_zero(number: &Number) -> bool {
    number.as_f64() == Some(0.0)
}

// -----------------------------------------------------------------------------
// URL

/// Checks URL strings, in both directions.
///
/// A string is parsed as an absolute [`Url`] and returned in its normalized
/// form. Null passes unchanged. Anything else fails with
/// [`TransformError::UnexpectedInput`].
///
/// The [`JsonAdapter`] uses it for `url::Url` properties.
///
/// ```
/// use vc_transform::transformer::{TransformError, url};
/// use vc_transform::value::Value;
///
/// let t = url();
/// assert_eq!(t.apply(Value::from("HTTPS://example.com")).unwrap(), Value::from("https://example.com/"));
/// assert!(matches!(
///     t.apply_reverse(Value::from("not a url")),
///     Err(TransformError::UnexpectedInput { expected: "URL", .. })
/// ));
/// ```
pub fn url() -> ValueTransformer {
    ValueTransformer::reversible(normalize_url).with_name(URL_VALUE_TRANSFORMER_NAME)
}

fn normalize_url(value: Value) -> Result<Value, TransformError> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::String(text) => match Url::parse(&text) {
            Ok(url) => Ok(Value::String(url.into())),
            Err(error) => {
                log::debug!("`{text}` is not a URL: {error}");
                Err(TransformError::unexpected("URL", &Value::String(text)))
            }
        },
        other => Err(TransformError::unexpected("URL", &other)),
    }
}

// -----------------------------------------------------------------------------
// Models

/// Converts dictionaries to models of `class` with the default [`JsonAdapter`].
///
/// See [`model_dictionary_with`].
pub fn model_dictionary(class: &'static ClassInfo) -> Result<ValueTransformer, TransformError> {
    model_dictionary_with(Arc::new(JsonAdapter::new()), class)
}

/// Converts dictionaries to models of `class`, and models back.
///
/// Null passes unchanged in both directions. Adapter failures are returned
/// as [`TransformError::Adapter`].
///
/// # Errors
///
/// [`TransformError::NotSerializing`] if `adapter` does not support `class`.
pub fn model_dictionary_with(
    adapter: Arc<dyn ModelAdapter>,
    class: &'static ClassInfo,
) -> Result<ValueTransformer, TransformError> {
    if !adapter.supports_class(class) {
        return Err(TransformError::NotSerializing(class.path()));
    }

    let reverse_adapter = adapter.clone();
    Ok(ValueTransformer::reversible_with(
        move |value| match value {
            Value::Null => Ok(Value::Null),
            Value::Dictionary(dictionary) => Ok(Value::Model(adapter.model_from_dictionary(class, &dictionary)?)),
            other => Err(TransformError::unexpected("dictionary", &other)),
        },
        move |value| match value {
            Value::Null => Ok(Value::Null),
            Value::Model(model) => Ok(Value::Dictionary(reverse_adapter.dictionary_from_model(&*model)?)),
            other => Err(TransformError::unexpected("model", &other)),
        },
    ))
}

/// Converts arrays of dictionaries to arrays of models of `class` with the
/// default [`JsonAdapter`].
///
/// See [`model_array_with`].
pub fn model_array(class: &'static ClassInfo) -> Result<ValueTransformer, TransformError> {
    model_array_with(Arc::new(JsonAdapter::new()), class)
}

/// Applies [`model_dictionary_with`] to each element of an array.
///
/// Null passes unchanged. The first failing element fails the whole call.
pub fn model_array_with(
    adapter: Arc<dyn ModelAdapter>,
    class: &'static ClassInfo,
) -> Result<ValueTransformer, TransformError> {
    let element = model_dictionary_with(adapter, class)?;
    let reverse_element = element.clone();

    Ok(ValueTransformer::reversible_with(
        move |value| each(value, |item| element.apply(item)),
        move |value| each(value, |item| reverse_element.apply_reverse(item)),
    ))
}

fn each(
    value: Value,
    transform: impl FnMut(Value) -> Result<Value, TransformError>,
) -> Result<Value, TransformError> {
    match value {
        Value::Null => Ok(Value::Null),
        Value::Array(items) => items
            .into_iter()
            .map(transform)
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array),
        other => Err(TransformError::unexpected("array", &other)),
    }
}

// -----------------------------------------------------------------------------
// Value mapping

/// Maps keys to values through a fixed table.
///
/// The reverse looks the value up and fails unless exactly one key maps to
/// it. A key given twice keeps its last value. Numbers match by numeric
/// value, so `1` and `1.0` are the same key.
///
/// ```
/// use vc_transform::transformer::{TransformError, value_mapping};
/// use vc_transform::value::Value;
///
/// let t = value_mapping([("foo", 1), ("bar", 2)]);
/// assert_eq!(t.apply(Value::from("foo")).unwrap(), Value::from(1));
/// assert_eq!(t.apply_reverse(Value::from(2)).unwrap(), Value::from("bar"));
///
/// let t = value_mapping([("foo", 1), ("bar", 1)]);
/// assert!(matches!(
///     t.apply_reverse(Value::from(1)),
///     Err(TransformError::AmbiguousReverseMapping { count: 2, .. })
/// ));
/// ```
pub fn value_mapping<K, V>(pairs: impl IntoIterator<Item = (K, V)>) -> ValueTransformer
where
    K: Into<Value>,
    V: Into<Value>,
{
    let mut table: Vec<(Value, Value)> = Vec::new();
    for (key, value) in pairs {
        let (key, value) = (key.into(), value.into());
        match table.iter_mut().find(|(k, _)| same_entry(k, &key)) {
            Some(entry) => entry.1 = value,
            None => table.push((key, value)),
        }
    }

    let table: Arc<[(Value, Value)]> = table.into();
    let reverse_table = table.clone();

    ValueTransformer::reversible_with(
        move |key| {
            table
                .iter()
                .find(|(k, _)| same_entry(k, &key))
                .map(|(_, value)| value.clone())
                .ok_or_else(|| TransformError::UnmappedKey(key.to_string()))
        },
        move |value| {
            let mut keys = reverse_table.iter().filter(|(_, v)| same_entry(v, &value)).map(|(k, _)| k);
            match (keys.next(), keys.count()) {
                (Some(key), 0) => Ok(key.clone()),
                (Some(_), rest) => Err(TransformError::AmbiguousReverseMapping {
                    value: value.to_string(),
                    count: rest + 1,
                }),
                (None, _) => Err(TransformError::UnmappedValue(value.to_string())),
            }
        },
    )
}

fn same_entry(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(a), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(x), Some(y)) => x == y,
            _ => a == b,
        },
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec;

    use vc_model::class::{ClassInfo, Model};
    use vc_model::derive::Model;

    use super::{boolean, model_array_with, model_dictionary_with, url, value_mapping};
    use crate::adapter::{AdapterError, ModelAdapter, ModelError, ModelObject, ModelRef};
    use crate::transformer::TransformError;
    use crate::value::{Dictionary, Value};

    #[derive(Model)]
    struct Point {
        x: i64,
    }

    impl ModelObject for Point {
        fn class(&self) -> &'static ClassInfo {
            Self::class_info()
        }

        fn value_for_key(&self, key: &str) -> Option<Value> {
            (key == "x").then(|| Value::from(self.x))
        }
    }

    #[derive(Model)]
    struct Unsupported;

    // Reads `x` directly, fails when it is missing.
    struct PointAdapter;

    impl ModelAdapter for PointAdapter {
        fn supports_class(&self, class: &'static ClassInfo) -> bool {
            class.is::<Point>()
        }

        fn model_from_dictionary(
            &self,
            _class: &'static ClassInfo,
            dictionary: &Dictionary,
        ) -> Result<ModelRef, AdapterError> {
            let x = dictionary
                .get("x")
                .and_then(Value::as_number)
                .and_then(|x| x.as_i64())
                .ok_or_else(|| ModelError::new("`x` is required"))?;
            Ok(Arc::new(Point { x }))
        }

        fn dictionary_from_model(&self, model: &dyn ModelObject) -> Result<Dictionary, AdapterError> {
            let mut dictionary = Dictionary::new();
            dictionary.insert(String::from("x"), model.value_for_key("x").unwrap_or_default());
            Ok(dictionary)
        }
    }

    fn point(x: i64) -> Value {
        Value::from(serde_json::json!({ "x": x }))
    }

    #[test]
    fn boolean_normalizes_once() {
        let t = boolean();
        for input in [Value::from(1), Value::from(0), Value::from(-2.5), Value::Bool(false), Value::Null] {
            let once = t.apply(input).unwrap();
            assert_eq!(t.apply(once.clone()).unwrap(), once);
            assert_eq!(t.apply_reverse(once.clone()).unwrap(), once);
        }
        assert!(matches!(
            t.apply(Value::from("true")),
            Err(TransformError::UnexpectedInput { found: "string", .. })
        ));
    }

    #[test]
    fn value_mapping_both_ways() {
        let t = value_mapping([("foo", 1), ("bar", 2), ("foo", 3)]);
        assert_eq!(t.apply(Value::from("foo")).unwrap(), Value::from(3));
        assert_eq!(t.apply_reverse(Value::from(2)).unwrap(), Value::from("bar"));
        assert!(matches!(t.apply(Value::from("baz")), Err(TransformError::UnmappedKey(key)) if key == "\"baz\""));
        assert!(matches!(t.apply_reverse(Value::from(1)), Err(TransformError::UnmappedValue(_))));
    }

    #[test]
    fn value_mapping_matches_numbers_by_value() {
        let t = value_mapping([(1, "one"), (2, "two")]);
        assert_eq!(t.apply(Value::from(1.0)).unwrap(), Value::from("one"));
        assert!(matches!(t.apply(Value::from(1.5)), Err(TransformError::UnmappedKey(_))));

        let t = value_mapping([("one", Value::from(1)), ("uno", Value::from(1.0))]);
        assert!(matches!(
            t.apply_reverse(Value::from(1)),
            Err(TransformError::AmbiguousReverseMapping { count: 2, .. })
        ));

        // `1.0` replaces `1` rather than adding a second key.
        let t = value_mapping([(Value::from(1), "a"), (Value::from(2), "b"), (Value::from(1.0), "c")]);
        assert_eq!(t.apply(Value::from(1)).unwrap(), Value::from("c"));
    }

    #[test]
    fn url_normalizes_both_ways() {
        let t = url();
        assert!(t.supports_reverse());
        assert_eq!(
            t.apply(Value::from("https://Example.com/a/../b")).unwrap(),
            Value::from("https://example.com/b")
        );
        assert_eq!(
            t.apply_reverse(Value::from("https://example.com/b")).unwrap(),
            Value::from("https://example.com/b")
        );
        assert_eq!(t.apply(Value::Null).unwrap(), Value::Null);

        for input in [Value::from("example.com"), Value::from(""), Value::from(3)] {
            assert!(matches!(
                t.apply(input),
                Err(TransformError::UnexpectedInput { expected: "URL", .. })
            ));
        }
    }

    #[test]
    fn model_dictionary_requires_support() {
        let adapter = Arc::new(PointAdapter);
        assert!(matches!(
            model_dictionary_with(adapter.clone(), Unsupported::class_info()),
            Err(TransformError::NotSerializing(path)) if path.ends_with("Unsupported")
        ));
        assert!(model_array_with(adapter, Unsupported::class_info()).is_err());
    }

    #[test]
    fn model_dictionary_both_ways() {
        let t = model_dictionary_with(Arc::new(PointAdapter), Point::class_info()).unwrap();

        let model = t.apply(point(4)).unwrap();
        assert_eq!(model.as_model::<Point>().map(|p| p.x), Some(4));
        assert_eq!(t.apply_reverse(model).unwrap(), point(4));

        assert_eq!(t.apply(Value::Null).unwrap(), Value::Null);
        assert!(matches!(
            t.apply(Value::from(4)),
            Err(TransformError::UnexpectedInput { expected: "dictionary", .. })
        ));
        // Adapter failures pass through.
        assert!(matches!(
            t.apply(Value::Dictionary(Dictionary::new())),
            Err(TransformError::Adapter(AdapterError::Model(_)))
        ));
    }

    #[test]
    fn model_array_fails_as_a_whole() {
        let t = model_array_with(Arc::new(PointAdapter), Point::class_info()).unwrap();

        let models = t.apply(Value::Array(vec![point(1), point(2)])).unwrap();
        assert_eq!(models.as_array().map(<[Value]>::len), Some(2));
        assert_eq!(t.apply_reverse(models).unwrap(), Value::Array(vec![point(1), point(2)]));

        let broken = Value::Array(vec![Value::from(serde_json::json!({})), point(2)]);
        assert!(matches!(t.apply(broken), Err(TransformError::Adapter(_))));
        assert!(matches!(
            t.apply(point(1)),
            Err(TransformError::UnexpectedInput { expected: "array", .. })
        ));
    }
}
