use alloc::boxed::Box;
use core::any::Any;
use core::fmt;

use crate::class::Model;

// -----------------------------------------------------------------------------
// ClassTrait

/// A capability of a registered class, stored in its [`ClassMeta`].
///
/// Implemented for every `Clone + Send + Sync + 'static` type. A class trait
/// is usually a table of function pointers built by [`FromClass`].
///
/// [`ClassMeta`]: crate::registry::ClassMeta
pub trait ClassTrait: Any + Send + Sync {
    /// Clones the capability into a new box.
    fn clone_class_trait(&self) -> Box<dyn ClassTrait>;
}

impl<T: Clone + Any + Send + Sync> ClassTrait for T {
    #[inline]
    fn clone_class_trait(&self) -> Box<dyn ClassTrait> {
        Box::new(self.clone())
    }
}

impl dyn ClassTrait {
    /// Returns `true` if the boxed capability is a `T`.
    #[inline]
    pub fn is<T: ClassTrait>(&self) -> bool {
        (self as &dyn Any).is::<T>()
    }

    /// Downcasts to a concrete capability.
    #[inline]
    pub fn downcast_ref<T: ClassTrait>(&self) -> Option<&T> {
        (self as &dyn Any).downcast_ref::<T>()
    }

    /// Downcasts to a concrete capability.
    #[inline]
    pub fn downcast_mut<T: ClassTrait>(&mut self) -> Option<&mut T> {
        (self as &mut dyn Any).downcast_mut::<T>()
    }
}

impl fmt::Debug for dyn ClassTrait {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClassTrait")
    }
}

// -----------------------------------------------------------------------------
// FromClass

/// Creates a [`ClassTrait`] for the class `T`.
///
/// ```
/// use vc_model::class::Model;
/// use vc_model::derive::Model;
/// use vc_model::registry::{ClassMeta, FromClass};
///
/// #[derive(Clone)]
/// struct ReflectName(fn() -> &'static str);
///
/// impl<T: Model> FromClass<T> for ReflectName {
///     fn from_class() -> Self {
///         ReflectName(|| T::class_info().name())
///     }
/// }
///
/// #[derive(Model)]
/// struct User;
///
/// let mut meta = ClassMeta::of::<User>();
/// meta.insert_trait::<ReflectName>(FromClass::<User>::from_class());
///
/// assert_eq!((meta.get_trait::<ReflectName>().unwrap().0)(), "User");
/// ```
pub trait FromClass<T: Model> {
    fn from_class() -> Self;
}
