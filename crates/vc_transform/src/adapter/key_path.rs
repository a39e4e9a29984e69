use alloc::string::String;

use crate::adapter::AdapterError;
use crate::value::{Dictionary, Value};

/// Reads the value at a dot-separated key path.
///
/// Returns `Ok(None)` if an element of the path is missing.
///
/// # Errors
///
/// [`AdapterError::InvalidJsonDictionary`] if an element before the last is
/// not a dictionary.
///
/// ```
/// use vc_transform::adapter::value_for_key_path;
/// use vc_transform::value::Value;
///
/// let json = Value::from(serde_json::json!({ "user": { "name": "Ada" }, "id": 1 }));
/// let json = json.as_dictionary().unwrap();
///
/// assert_eq!(value_for_key_path(json, "user.name").unwrap(), Some(&Value::from("Ada")));
/// assert_eq!(value_for_key_path(json, "user.email").unwrap(), None);
/// assert!(value_for_key_path(json, "id.value").is_err());
/// ```
pub fn value_for_key_path<'a>(dictionary: &'a Dictionary, key_path: &str) -> Result<Option<&'a Value>, AdapterError> {
    let mut components = key_path.split('.');
    let mut current = dictionary;

    let Some(mut key) = components.next() else {
        return Ok(None);
    };
    for next in components {
        match current.get(key) {
            None => return Ok(None),
            Some(Value::Dictionary(inner)) => current = inner,
            Some(_) => return Err(invalid(key_path)),
        }
        key = next;
    }
    Ok(current.get(key))
}

/// Writes `value` at a dot-separated key path, creating the missing
/// intermediate dictionaries.
///
/// # Errors
///
/// [`AdapterError::InvalidJsonDictionary`] if an existing element before the
/// last is not a dictionary. `dictionary` is left unchanged in that case.
pub fn set_value_for_key_path(dictionary: &mut Dictionary, key_path: &str, value: Value) -> Result<(), AdapterError> {
    if !is_writable(dictionary, key_path) {
        return Err(invalid(key_path));
    }

    let mut components = key_path.split('.').peekable();
    let mut current = dictionary;
    while let Some(key) = components.next() {
        if components.peek().is_none() {
            current.insert(String::from(key), value);
            break;
        }
        let entry = current
            .entry(String::from(key))
            .or_insert_with(|| Value::Dictionary(Dictionary::new()));
        match entry {
            Value::Dictionary(inner) => current = inner,
            _ => return Err(invalid(key_path)),
        }
    }
    Ok(())
}

// Checks the existing intermediates before anything is inserted.
fn is_writable(dictionary: &Dictionary, key_path: &str) -> bool {
    let Some((parents, _)) = key_path.rsplit_once('.') else {
        return true;
    };
    let mut current = dictionary;
    for key in parents.split('.') {
        match current.get(key) {
            None => return true,
            Some(Value::Dictionary(inner)) => current = inner,
            Some(_) => return false,
        }
    }
    true
}

#[inline]
fn invalid(key_path: &str) -> AdapterError {
    AdapterError::InvalidJsonDictionary {
        key_path: String::from(key_path),
    }
}
