use alloc::boxed::Box;
use alloc::string::String;

use thiserror::Error;

use crate::adapter::ModelError;
use crate::transformer::TransformError;

/// An error returned by a [`JsonAdapter`](crate::adapter::JsonAdapter).
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AdapterError {
    /// The class is not registered with the JSON serializing capability.
    #[error("class `{0}` is not JSON serializing")]
    NotSerializing(&'static str),
    /// The class chose no class to parse the dictionary with.
    #[error("no class of `{0}` can parse the dictionary")]
    NoClassFound(&'static str),
    /// The classes picked for parsing lead back to an earlier one.
    #[error("classes picked to parse the dictionary lead back to `{0}`")]
    CyclicClassRedirect(&'static str),
    /// An intermediate element of a key path is not a dictionary.
    #[error("`{key_path}` does not go through dictionaries")]
    InvalidJsonDictionary { key_path: String },
    /// A key path is mapped to something that is not a property.
    #[error("`{key}` is not a property key of `{class}`")]
    InvalidJsonMapping { class: &'static str, key: String },
    /// The value of a property has the wrong type.
    #[error("property `{key}` must be {expected}, found {found}")]
    UnexpectedValue {
        key: String,
        expected: &'static str,
        found: &'static str,
    },
    /// A property transformer failed.
    #[error("cannot transform property `{key}`")]
    Transform {
        key: String,
        #[source]
        source: Box<TransformError>,
    },
    /// The model rejected its property values.
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl AdapterError {
    /// Nested adapter failures are returned unchanged, others are attached
    /// to the property.
    pub(crate) fn transform(key: &str, error: TransformError) -> Self {
        match error {
            TransformError::Adapter(error) => error,
            error => AdapterError::Transform {
                key: String::from(key),
                source: Box::new(error),
            },
        }
    }
}
