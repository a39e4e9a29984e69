use alloc::string::String;

use thiserror::Error;

use crate::selector::SelectorError;

/// A malformed raw attribute string.
///
/// The resolver logs these and skips the property.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DeclError {
    #[error("attribute string must start with `T`, found `{0}`")]
    MissingTypeEncoding(String),

    #[error("empty type encoding")]
    EmptyTypeEncoding,

    #[error("unbalanced type encoding `{0}`")]
    UnbalancedTypeEncoding(String),

    #[error("empty attribute at position {0}")]
    EmptyAttribute(usize),

    #[error("unknown attribute `{0}`")]
    UnknownAttribute(String),

    #[error("attribute `{0}` requires a name")]
    MissingName(char),

    #[error("`{0}` is not a valid accessor name")]
    InvalidAccessor(String),

    #[error(transparent)]
    Selector(#[from] SelectorError),
}
