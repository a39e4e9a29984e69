//! Accessor name composition.
//!
//! Property accessors are named after the property key, e.g. the setter of
//! `firstName` is `setFirstName:`. The names are metadata only, nothing is
//! dispatched through them.

use alloc::string::String;

use thiserror::Error;

/// Failure to build an accessor name.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SelectorError {
    #[error("cannot compose a selector from an empty key")]
    EmptyKey,

    #[error("`{0}` is not a valid selector")]
    InvalidIdentifier(String),
}

/// Creates a selector name from a key and a constant prefix and suffix.
///
/// - `prefix`: prepended to the key. If empty, the key is not capitalized.
/// - `key`: in its natural case. Its first letter is capitalized when there
///   is a prefix.
/// - `suffix`: appended to the key.
///
/// The result may only contain ASCII letters, digits, `_` and `:`, and must
/// start with a letter or `_`.
///
/// # Examples
///
/// ```
/// use vc_model::selector::{compose_selector, SelectorError};
///
/// assert_eq!(compose_selector("set", "name", ":").unwrap(), "setName:");
/// assert_eq!(compose_selector("", "name", "Transformer").unwrap(), "nameTransformer");
/// assert_eq!(compose_selector("set", "", ":"), Err(SelectorError::EmptyKey));
/// ```
pub fn compose_selector(prefix: &str, key: &str, suffix: &str) -> Result<String, SelectorError> {
    let mut chars = key.chars();
    let Some(first) = chars.next() else {
        return Err(SelectorError::EmptyKey);
    };

    let mut selector = String::with_capacity(prefix.len() + key.len() + suffix.len());
    if prefix.is_empty() {
        selector.push_str(key);
    } else {
        selector.push_str(prefix);
        selector.extend(first.to_uppercase());
        selector.push_str(chars.as_str());
    }
    selector.push_str(suffix);

    if is_valid_selector(&selector) {
        Ok(selector)
    } else {
        Err(SelectorError::InvalidIdentifier(selector))
    }
}

/// Returns `true` if `name` can be used as an accessor name.
pub fn is_valid_selector(name: &str) -> bool {
    let bytes = name.as_bytes();
    match bytes.first() {
        Some(b) if b.is_ascii_alphabetic() || *b == b'_' => {}
        _ => return false,
    }
    bytes
        .iter()
        .all(|b| b.is_ascii_alphanumeric() || *b == b'_' || *b == b':')
}

#[cfg(test)]
mod tests {
    use super::{SelectorError, compose_selector, is_valid_selector};

    #[test]
    fn capitalizes_only_with_prefix() {
        assert_eq!(compose_selector("set", "url", ":").unwrap(), "setUrl:");
        assert_eq!(compose_selector("is", "enabled", "").unwrap(), "isEnabled");
        assert_eq!(compose_selector("", "url", "JSONTransformer").unwrap(), "urlJSONTransformer");
        assert_eq!(compose_selector("", "Url", "").unwrap(), "Url");
    }

    #[test]
    fn rejects_invalid_identifiers() {
        assert_eq!(compose_selector("", "", ""), Err(SelectorError::EmptyKey));
        assert_eq!(
            compose_selector("set", "first-name", ":"),
            Err(SelectorError::InvalidIdentifier("setFirst-name:".into()))
        );
        assert!(compose_selector("", "1st", "").is_err());
        assert!(compose_selector("", "name", " ").is_err());
        // a leading digit is fine once a prefix is in front of it
        assert_eq!(compose_selector("set", "1st", ":").unwrap(), "set1st:");
    }

    #[test]
    fn deterministic() {
        let a = compose_selector("set", "homeAddress", ":");
        let b = compose_selector("set", "homeAddress", ":");
        assert_eq!(a, b);

        let a = compose_selector("set", "home address", ":");
        let b = compose_selector("set", "home address", ":");
        assert_eq!(a, b);
    }

    #[test]
    fn valid_selector_charset() {
        assert!(is_valid_selector("_private"));
        assert!(is_valid_selector("setValue:forKey:"));
        assert!(!is_valid_selector(":value"));
        assert!(!is_valid_selector(""));
        assert!(!is_valid_selector("naïve"));
    }
}
