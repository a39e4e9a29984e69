use alloc::boxed::Box;
use alloc::sync::Arc;
use core::any::Any;
use core::error::Error;
use core::fmt;

use thiserror::Error;
use vc_model::class::ClassInfo;

use crate::value::Value;

// -----------------------------------------------------------------------------
// ModelObject

/// A model instance, as seen by adapters.
///
/// Implemented by hand next to `#[derive(Model)]`, usually by matching on the
/// property name in [`value_for_key`](Self::value_for_key).
pub trait ModelObject: Any + Send + Sync {
    /// Returns the class of this instance.
    fn class(&self) -> &'static ClassInfo;

    /// Returns the current value of a property.
    ///
    /// `None` if this model has no property named `key`.
    fn value_for_key(&self, key: &str) -> Option<Value>;
}

/// A shared model object.
pub type ModelRef = Arc<dyn ModelObject>;

impl fmt::Debug for dyn ModelObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<{}>", self.class().path())
    }
}

/// Downcasts a shared model to its concrete type.
pub fn downcast_model<T: ModelObject>(model: ModelRef) -> Option<Arc<T>> {
    let model: Arc<dyn Any + Send + Sync> = model;
    model.downcast().ok()
}

// -----------------------------------------------------------------------------
// ModelError

/// An error raised while building a model from its property values.
///
/// Opaque to adapters, which return it as is.
#[derive(Error, Debug)]
#[error(transparent)]
pub struct ModelError(Box<dyn Error + Send + Sync>);

impl ModelError {
    /// Wraps an error, or a message.
    #[inline]
    pub fn new(error: impl Into<Box<dyn Error + Send + Sync>>) -> Self {
        Self(error.into())
    }

    /// Returns the wrapped error.
    #[inline]
    pub fn into_inner(self) -> Box<dyn Error + Send + Sync> {
        self.0
    }
}
