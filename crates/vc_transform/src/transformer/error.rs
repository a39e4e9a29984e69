use alloc::string::String;

use thiserror::Error;

use crate::adapter::AdapterError;

/// An error returned by a [`ValueTransformer`](crate::transformer::ValueTransformer).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum TransformError {
    /// The reverse direction was requested from a forward-only transformer.
    #[error("transformer `{}` is not reversible", .name.as_deref().unwrap_or("<unnamed>"))]
    NotReversible { name: Option<String> },
    /// The input is not of a type the transformer accepts.
    #[error("expected {expected}, found {found}")]
    UnexpectedInput {
        expected: &'static str,
        found: &'static str,
    },
    /// No value is mapped to the given key.
    #[error("no value is mapped to key {0}")]
    UnmappedKey(String),
    /// No key maps to the given value.
    #[error("no key maps to value {0}")]
    UnmappedValue(String),
    /// More than one key maps to the given value.
    #[error("{count} keys map to value {value}")]
    AmbiguousReverseMapping { value: String, count: usize },
    /// The class does not have the JSON serializing capability.
    #[error("class `{0}` is not JSON serializing")]
    NotSerializing(&'static str),
    /// A model adapter failure, unchanged.
    #[error(transparent)]
    Adapter(#[from] AdapterError),
}

impl TransformError {
    #[inline]
    pub(crate) fn unexpected(expected: &'static str, found: &crate::value::Value) -> Self {
        TransformError::UnexpectedInput {
            expected,
            found: found.kind(),
        }
    }
}
