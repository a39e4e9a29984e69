use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;
use core::ops::{Deref, DerefMut};

use crate::class::{ClassInfo, Model};
use crate::hash::HashMap;
use crate::registry::{ClassRegistry, ClassTrait};

// -----------------------------------------------------------------------------
// ClassMeta

/// Runtime storage for a registered class.
///
/// This includes the static [`ClassInfo`] and a [`ClassTrait`] table.
///
/// Usually created by the [`GetClassMeta`] implementation generated by
/// [`#[derive(Model)]`](crate::derive::Model).
pub struct ClassMeta {
    class_info: &'static ClassInfo,
    trait_table: HashMap<TypeId, Box<dyn ClassTrait>>,
}

impl ClassMeta {
    /// Creates a meta without capabilities.
    #[inline]
    pub fn of<T: Model>() -> Self {
        Self::new(T::class_info())
    }

    /// Creates a meta without capabilities.
    #[inline]
    pub fn new(class_info: &'static ClassInfo) -> Self {
        Self {
            class_info,
            trait_table: HashMap::default(),
        }
    }

    #[inline]
    pub const fn class_info(&self) -> &'static ClassInfo {
        self.class_info
    }

    #[inline]
    pub const fn type_id(&self) -> TypeId {
        self.class_info.type_id()
    }

    #[inline]
    pub const fn name(&self) -> &'static str {
        self.class_info.name()
    }

    #[inline]
    pub const fn path(&self) -> &'static str {
        self.class_info.path()
    }

    /// Inserts a capability, replacing any previous one of the same type.
    #[inline]
    pub fn insert_trait<T: ClassTrait>(&mut self, data: T) {
        self.trait_table.insert(TypeId::of::<T>(), Box::new(data));
    }

    /// Removes a capability.
    pub fn remove_trait<T: ClassTrait>(&mut self) -> Option<Box<T>> {
        let boxed = self.trait_table.remove(&TypeId::of::<T>())?;
        <Box<dyn Any>>::downcast::<T>(boxed).ok()
    }

    /// Returns the capability `T`, if present.
    #[inline]
    pub fn get_trait<T: ClassTrait>(&self) -> Option<&T> {
        self.trait_table
            .get(&TypeId::of::<T>())
            .and_then(|t| t.deref().downcast_ref())
    }

    /// Returns the capability `T`, if present.
    #[inline]
    pub fn get_trait_mut<T: ClassTrait>(&mut self) -> Option<&mut T> {
        self.trait_table
            .get_mut(&TypeId::of::<T>())
            .and_then(|t| t.deref_mut().downcast_mut())
    }

    #[inline]
    pub fn has_trait<T: ClassTrait>(&self) -> bool {
        self.trait_table.contains_key(&TypeId::of::<T>())
    }

    /// Returns the number of capabilities.
    #[inline]
    pub fn trait_len(&self) -> usize {
        self.trait_table.len()
    }
}

impl Clone for ClassMeta {
    fn clone(&self) -> Self {
        let mut trait_table = HashMap::with_capacity_and_hasher(self.trait_len(), Default::default());
        for (id, class_trait) in self.trait_table.iter() {
            trait_table.insert(*id, (**class_trait).clone_class_trait());
        }
        Self {
            class_info: self.class_info,
            trait_table,
        }
    }
}

impl fmt::Debug for ClassMeta {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClassMeta")
            .field("class_info", &self.class_info)
            .field("trait_len", &self.trait_table.len())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// GetClassMeta

/// A type that can produce its [`ClassMeta`] for registration into a
/// [`ClassRegistry`].
///
/// Implemented by [`#[derive(Model)]`](crate::derive::Model), including the
/// capabilities listed in `#[model(class_trait = ...)]`.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `GetClassMeta` so cannot be registered",
    note = "consider annotating `{Self}` with `#[derive(Model)]`"
)]
pub trait GetClassMeta: Model {
    /// Returns the default [`ClassMeta`] of this class.
    fn get_class_meta() -> ClassMeta;

    /// Registers the classes this class depends on, e.g. its superclass.
    fn register_dependencies(_registry: &mut ClassRegistry) {}
}
