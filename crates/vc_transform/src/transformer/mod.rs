//! Reversible value conversions.
//!
//! ## Menu
//!
//! - [`ValueTransformer`]: A forward conversion with an optional reverse.
//! - [`TransformError`]: Failures of a conversion.
//! - Predefined transformers:
//!   - [`boolean`]: Normalizes numbers to booleans.
//!   - [`url`]: Checks and normalizes URL strings.
//!   - [`model_dictionary`]: Dictionary to model, through a [`ModelAdapter`].
//!   - [`model_array`]: The same, element-wise over arrays.
//!   - [`value_mapping`]: A fixed key to value table.
//! - A process-wide table of named transformers: [`named`], [`set_named`].
//!
//! [`ModelAdapter`]: crate::adapter::ModelAdapter

// -----------------------------------------------------------------------------
// Modules

mod error;
mod named;
mod predefined;

// -----------------------------------------------------------------------------
// Exports

pub use error::TransformError;
pub use named::{BOOLEAN_VALUE_TRANSFORMER_NAME, URL_VALUE_TRANSFORMER_NAME, named, set_named};
pub use predefined::{
    boolean, model_array, model_array_with, model_dictionary, model_dictionary_with, url, value_mapping,
};

use alloc::borrow::Cow;
use alloc::string::String;
use alloc::sync::Arc;
use core::fmt;

use crate::value::Value;

/// A shared conversion function.
pub type TransformFn = Arc<dyn Fn(Value) -> Result<Value, TransformError> + Send + Sync>;

#[derive(Clone)]
enum Direction {
    ForwardOnly(TransformFn),
    Reversible(TransformFn, TransformFn),
}

// -----------------------------------------------------------------------------
// ValueTransformer

/// A conversion between two representations of a value.
///
/// A transformer is either forward-only or reversible. Asking a forward-only
/// transformer for the reverse conversion fails with
/// [`TransformError::NotReversible`].
///
/// Cloning is cheap, the functions are shared.
///
/// # Examples
///
/// ```
/// use vc_transform::transformer::{TransformError, ValueTransformer};
/// use vc_transform::value::Value;
///
/// let upper = ValueTransformer::forward_only(|value| match value {
///     Value::String(s) => Ok(Value::String(s.to_uppercase())),
///     other => Ok(other),
/// });
///
/// assert_eq!(upper.apply(Value::from("ok")).unwrap(), Value::from("OK"));
/// assert!(!upper.supports_reverse());
/// assert!(matches!(
///     upper.apply_reverse(Value::from("OK")),
///     Err(TransformError::NotReversible { .. })
/// ));
/// ```
#[derive(Clone)]
pub struct ValueTransformer {
    direction: Direction,
    name: Option<Cow<'static, str>>,
}

impl ValueTransformer {
    /// Creates a transformer without reverse conversion.
    pub fn forward_only<F>(forward: F) -> Self
    where
        F: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
    {
        Self {
            direction: Direction::ForwardOnly(Arc::new(forward)),
            name: None,
        }
    }

    /// Creates a self-inverse transformer, `transform` is used both ways.
    pub fn reversible<F>(transform: F) -> Self
    where
        F: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
    {
        let transform: TransformFn = Arc::new(transform);
        Self {
            direction: Direction::Reversible(transform.clone(), transform),
            name: None,
        }
    }

    /// Creates a transformer with distinct forward and reverse conversions.
    pub fn reversible_with<F, R>(forward: F, reverse: R) -> Self
    where
        F: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
        R: Fn(Value) -> Result<Value, TransformError> + Send + Sync + 'static,
    {
        Self {
            direction: Direction::Reversible(Arc::new(forward), Arc::new(reverse)),
            name: None,
        }
    }

    /// Sets the name shown in errors and `Debug` output.
    #[inline]
    pub fn with_name(self, name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: Some(name.into()),
            ..self
        }
    }

    #[inline]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Returns `true` if a reverse conversion was supplied.
    #[inline]
    pub fn supports_reverse(&self) -> bool {
        matches!(self.direction, Direction::Reversible(..))
    }

    /// Runs the forward conversion.
    #[inline]
    pub fn apply(&self, value: Value) -> Result<Value, TransformError> {
        (self.forward())(value)
    }

    /// Runs the reverse conversion.
    pub fn apply_reverse(&self, value: Value) -> Result<Value, TransformError> {
        match &self.direction {
            Direction::Reversible(_, reverse) => reverse(value),
            Direction::ForwardOnly(_) => Err(TransformError::NotReversible {
                name: self.name.as_deref().map(String::from),
            }),
        }
    }

    /// Chains `next` after `self`.
    ///
    /// The result is reversible if both are, the reverse runs `next` first.
    ///
    /// ```
    /// use vc_transform::transformer::{boolean, value_mapping};
    /// use vc_transform::value::Value;
    ///
    /// let flag = value_mapping([("yes", true), ("no", false)]).then(boolean());
    ///
    /// assert_eq!(flag.apply(Value::from("yes")).unwrap(), Value::Bool(true));
    /// // `0` is normalized to `false` first, then mapped back to its key.
    /// assert_eq!(flag.apply_reverse(Value::from(0)).unwrap(), Value::from("no"));
    /// ```
    pub fn then(self, next: ValueTransformer) -> ValueTransformer {
        let direction = match (self.direction, next.direction) {
            (Direction::Reversible(f1, r1), Direction::Reversible(f2, r2)) => Direction::Reversible(
                Arc::new(move |value| f2(f1(value)?)),
                Arc::new(move |value| r1(r2(value)?)),
            ),
            (first, second) => {
                let (f1, f2) = (first.into_forward(), second.into_forward());
                Direction::ForwardOnly(Arc::new(move |value| f2(f1(value)?)))
            }
        };
        ValueTransformer { direction, name: None }
    }

    #[inline]
    fn forward(&self) -> &TransformFn {
        match &self.direction {
            Direction::ForwardOnly(forward) | Direction::Reversible(forward, _) => forward,
        }
    }
}

impl Direction {
    #[inline]
    fn into_forward(self) -> TransformFn {
        match self {
            Direction::ForwardOnly(forward) | Direction::Reversible(forward, _) => forward,
        }
    }
}

impl fmt::Debug for ValueTransformer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueTransformer")
            .field("name", &self.name())
            .field("reversible", &self.supports_reverse())
            .finish()
    }
}
