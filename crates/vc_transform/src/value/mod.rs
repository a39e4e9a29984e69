//! The dynamic value passed through transformers.
//!
//! A [`Value`] is either a JSON-like value or a shared model object. Numbers
//! keep the runtime distinction between booleans and numbers, which is what
//! the [`boolean`](crate::transformer::boolean) transformer normalizes.

// -----------------------------------------------------------------------------
// Modules

mod convert;

// -----------------------------------------------------------------------------
// Exports

pub use serde_json::Number;

use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use crate::adapter::{ModelObject, ModelRef};

/// An ordered, string-keyed dictionary of values.
pub type Dictionary = BTreeMap<String, Value>;

// -----------------------------------------------------------------------------
// Value

/// A dynamically typed value.
///
/// ```
/// use vc_transform::value::{Dictionary, Value};
///
/// let value = Value::from(serde_json::json!({ "name": "Ada", "admin": true }));
/// let dictionary: &Dictionary = value.as_dictionary().unwrap();
///
/// assert_eq!(dictionary["name"], Value::from("Ada"));
/// assert_eq!(dictionary["admin"].as_bool(), Some(true));
/// ```
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Array(Vec<Value>),
    Dictionary(Dictionary),
    /// A shared model object.
    Model(ModelRef),
}

impl Value {
    /// A short name of the variant, used in error messages.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Array(_) => "array",
            Value::Dictionary(_) => "dictionary",
            Value::Model(_) => "model",
        }
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[inline]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(value) => Some(*value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_dictionary(&self) -> Option<&Dictionary> {
        match self {
            Value::Dictionary(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn as_model_object(&self) -> Option<&ModelRef> {
        match self {
            Value::Model(value) => Some(value),
            _ => None,
        }
    }

    /// Downcasts a model value to its concrete type.
    pub fn as_model<T: ModelObject>(&self) -> Option<&T> {
        let model: &dyn Any = &**self.as_model_object()?;
        model.downcast_ref()
    }

    #[inline]
    pub fn into_array(self) -> Option<Vec<Value>> {
        match self {
            Value::Array(value) => Some(value),
            _ => None,
        }
    }

    #[inline]
    pub fn into_dictionary(self) -> Option<Dictionary> {
        match self {
            Value::Dictionary(value) => Some(value),
            _ => None,
        }
    }

    /// Takes the shared model out of a model value, downcast to `T`.
    pub fn into_model<T: ModelObject>(self) -> Option<Arc<T>> {
        match self {
            Value::Model(model) => crate::adapter::downcast_model(model),
            _ => None,
        }
    }
}

impl PartialEq for Value {
    /// Models are equal when they are the same object.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => a == b,
            (Value::Dictionary(a), Value::Dictionary(b)) => a == b,
            (Value::Model(a), Value::Model(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("Null"),
            Value::Bool(value) => f.debug_tuple("Bool").field(value).finish(),
            Value::Number(value) => f.debug_tuple("Number").field(value).finish(),
            Value::String(value) => f.debug_tuple("String").field(value).finish(),
            Value::Array(value) => f.debug_tuple("Array").field(value).finish(),
            Value::Dictionary(value) => f.debug_tuple("Dictionary").field(value).finish(),
            Value::Model(value) => f.debug_tuple("Model").field(value).finish(),
        }
    }
}

impl fmt::Display for Value {
    /// JSON-like, models are written as `<ClassName>`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => f.write_str("null"),
            Value::Bool(value) => fmt::Display::fmt(value, f),
            Value::Number(value) => fmt::Display::fmt(value, f),
            Value::String(value) => fmt::Debug::fmt(value, f),
            Value::Array(values) => {
                f.write_str("[")?;
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    fmt::Display::fmt(value, f)?;
                }
                f.write_str("]")
            }
            Value::Dictionary(entries) => {
                f.write_str("{")?;
                for (index, (key, value)) in entries.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{key:?}: {value}")?;
                }
                f.write_str("}")
            }
            Value::Model(model) => write!(f, "<{}>", model.class().name()),
        }
    }
}

// -----------------------------------------------------------------------------
// From

macro_rules! impl_from_number {
    ($($ty:ty),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                #[inline]
                fn from(value: $ty) -> Self {
                    Value::Number(Number::from(value))
                }
            }
        )*
    };
}

impl_from_number!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<f64> for Value {
    /// Non-finite numbers become [`Value::Null`], as in JSON.
    #[inline]
    fn from(value: f64) -> Self {
        Number::from_f64(value).map_or(Value::Null, Value::Number)
    }
}

impl From<f32> for Value {
    #[inline]
    fn from(value: f32) -> Self {
        Value::from(f64::from(value))
    }
}

impl From<bool> for Value {
    #[inline]
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl From<&str> for Value {
    #[inline]
    fn from(value: &str) -> Self {
        Value::String(String::from(value))
    }
}

impl From<String> for Value {
    #[inline]
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<Number> for Value {
    #[inline]
    fn from(value: Number) -> Self {
        Value::Number(value)
    }
}

impl From<Vec<Value>> for Value {
    #[inline]
    fn from(value: Vec<Value>) -> Self {
        Value::Array(value)
    }
}

impl From<Dictionary> for Value {
    #[inline]
    fn from(value: Dictionary) -> Self {
        Value::Dictionary(value)
    }
}

impl From<ModelRef> for Value {
    #[inline]
    fn from(value: ModelRef) -> Self {
        Value::Model(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    /// `None` becomes [`Value::Null`].
    #[inline]
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}
