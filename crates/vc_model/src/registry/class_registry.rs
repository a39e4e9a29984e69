use alloc::sync::Arc;
use core::any::TypeId;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::attributes::PropertyAttributes;
use crate::class::{ClassInfo, Model};
use crate::hash::{FixedHashState, HashMap, HashSet};
use crate::registry::{ClassMeta, ClassTrait, FromClass, GetClassMeta};

/// Resolved attributes of the properties declared directly on one class.
pub type DeclaredProperties = Arc<[Arc<PropertyAttributes>]>;

// -----------------------------------------------------------------------------
// ClassRegistry

/// A registry of model classes.
///
/// The central store of [`ClassMeta`]. Besides lookups by `TypeId`, name and
/// path, it resolves property attributes, see
/// [`declared_properties`](Self::declared_properties). A class must be
/// registered to be found by name, e.g. as the `object_class` of a
/// `@"Name"` property.
///
/// # Example
///
/// ```
/// use vc_model::{class::Model, derive::Model, registry::ClassRegistry};
///
/// #[derive(Model)]
/// struct Address {
///     street: String,
/// }
///
/// let mut registry = ClassRegistry::empty();
/// registry.register::<Address>();
///
/// let meta = registry.get_with_class_name("Address").unwrap();
/// assert_eq!(meta.class_info(), Address::class_info());
/// ```
pub struct ClassRegistry {
    class_meta_table: HashMap<TypeId, ClassMeta>,
    class_path_to_id: HashMap<&'static str, TypeId>,
    class_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
    // Filled lazily under a shared lock, cleared on every registration.
    pub(crate) attributes_cache: RwLock<HashMap<TypeId, DeclaredProperties>>,
}

impl Default for ClassRegistry {
    /// See [`ClassRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl ClassRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            class_meta_table: HashMap::with_hasher(FixedHashState),
            class_path_to_id: HashMap::with_hasher(FixedHashState),
            class_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
            attributes_cache: RwLock::new(HashMap::with_hasher(FixedHashState)),
        }
    }

    /// Creates a registry holding every automatically registered class.
    ///
    /// See [`auto_register`](Self::auto_register).
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.auto_register();
        registry
    }

    // The class must not be registered yet.
    fn add_new_class_indices(
        class_meta: &ClassMeta,
        class_path_to_id: &mut HashMap<&'static str, TypeId>,
        class_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let name = class_meta.name();

        if !ambiguous_names.contains(name) {
            if class_name_to_id.remove(name).is_some() {
                log::warn!(
                    "class name `{name}` is registered twice (again by `{}`), lookups by name will fail",
                    class_meta.path(),
                );
                ambiguous_names.insert(name);
            } else {
                class_name_to_id.insert(name, class_meta.type_id());
            }
        }

        class_path_to_id.insert(class_meta.path(), class_meta.type_id());
    }

    fn clear_caches(&mut self) {
        self.attributes_cache
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }

    /// Inserts a meta if its class is not registered yet.
    ///
    /// Returns `false` and does nothing if the class is already registered.
    /// Dependencies are _not_ registered, see [`register`](Self::register).
    pub fn try_insert_class_meta(&mut self, class_meta: ClassMeta) -> bool {
        let type_id = class_meta.type_id();
        if self.class_meta_table.contains_key(&type_id) {
            return false;
        }
        Self::add_new_class_indices(
            &class_meta,
            &mut self.class_path_to_id,
            &mut self.class_name_to_id,
            &mut self.ambiguous_names,
        );
        self.class_meta_table.insert(type_id, class_meta);
        self.clear_caches();
        true
    }

    /// Inserts or **overwrites** a meta.
    ///
    /// Dependencies are _not_ registered, see [`register`](Self::register).
    pub fn insert_class_meta(&mut self, class_meta: ClassMeta) {
        let type_id = class_meta.type_id();
        if !self.class_meta_table.contains_key(&type_id) {
            Self::add_new_class_indices(
                &class_meta,
                &mut self.class_path_to_id,
                &mut self.class_name_to_id,
                &mut self.ambiguous_names,
            );
        }
        self.class_meta_table.insert(type_id, class_meta);
        self.clear_caches();
    }

    /// Registers `T` and its dependencies, if `T` is not registered yet.
    ///
    /// ```
    /// use core::any::TypeId;
    /// use vc_model::{derive::Model, registry::ClassRegistry};
    ///
    /// #[derive(Model)]
    /// struct Base;
    ///
    /// #[derive(Model)]
    /// #[model(extends = Base)]
    /// struct Derived;
    ///
    /// let mut registry = ClassRegistry::empty();
    /// registry.register::<Derived>();
    ///
    /// assert!(registry.contains(TypeId::of::<Derived>()));
    /// assert!(registry.contains(TypeId::of::<Base>()));
    /// ```
    pub fn register<T: GetClassMeta>(&mut self) {
        if self.try_insert_class_meta(T::get_class_meta()) {
            log::trace!("registered class `{}`", T::class_info().path());
            T::register_dependencies(self);
        }
    }

    /// Adds the capability `D` to the class `T`, registering `T` first if needed.
    pub fn register_class_trait<T: GetClassMeta, D: ClassTrait + FromClass<T>>(&mut self) {
        self.register::<T>();
        if let Some(class_meta) = self.class_meta_table.get_mut(&TypeId::of::<T>()) {
            class_meta.insert_trait(D::from_class());
        }
    }

    /// Registers every class annotated with `#[model(auto_register)]` or
    /// declared with `impl_auto_register!`.
    ///
    /// Returns `true` if automatic registration is supported on this platform.
    /// Repeated calls are cheap.
    ///
    /// Always `false` without the `auto_register` feature.
    pub fn auto_register(&mut self) -> bool {
        #[cfg(feature = "auto_register")]
        {
            use crate::__macro_exports::auto_register;
            if self.contains(TypeId::of::<auto_register::__AvailFlag>()) {
                return true;
            }
            auto_register::__register_classes(self);
            self.contains(TypeId::of::<auto_register::__AvailFlag>())
        }
        #[cfg(not(feature = "auto_register"))]
        {
            false
        }
    }

    /// Whether the class with the given `TypeId` is registered.
    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.class_meta_table.contains_key(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&ClassMeta> {
        self.class_meta_table.get(&type_id)
    }

    #[inline]
    pub fn get_mut(&mut self, type_id: TypeId) -> Option<&mut ClassMeta> {
        self.class_meta_table.get_mut(&type_id)
    }

    /// Returns the meta of the class with the given full path.
    pub fn get_with_class_path(&self, class_path: &str) -> Option<&ClassMeta> {
        match self.class_path_to_id.get(class_path) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the meta of the class with the given name.
    ///
    /// Returns `None` if the name is ambiguous or unknown.
    pub fn get_with_class_name(&self, class_name: &str) -> Option<&ClassMeta> {
        match self.class_name_to_id.get(class_name) {
            Some(id) => self.get(*id),
            None => None,
        }
    }

    /// Returns the class registered under the given name.
    ///
    /// This is how `@"Name"` type encodings are resolved.
    #[inline]
    pub fn class_named(&self, class_name: &str) -> Option<&'static ClassInfo> {
        self.get_with_class_name(class_name).map(ClassMeta::class_info)
    }

    /// Returns `true` if several registered classes share the given name.
    ///
    /// ```
    /// # use vc_model::registry::ClassRegistry;
    /// # mod a {
    /// #     #[derive(vc_model::derive::Model)]
    /// #     pub struct Item;
    /// # }
    /// # mod b {
    /// #     #[derive(vc_model::derive::Model)]
    /// #     pub struct Item;
    /// # }
    /// let mut registry = ClassRegistry::empty();
    /// registry.register::<a::Item>();
    /// registry.register::<b::Item>();
    ///
    /// assert!(registry.is_ambiguous("Item"));
    /// assert!(registry.get_with_class_name("Item").is_none());
    /// ```
    pub fn is_ambiguous(&self, class_name: &str) -> bool {
        self.ambiguous_names.contains(class_name)
    }

    /// Returns the capability `T` of the class with the given `TypeId`.
    pub fn get_class_trait<T: ClassTrait>(&self, type_id: TypeId) -> Option<&T> {
        match self.get(type_id) {
            Some(class_meta) => class_meta.get_trait::<T>(),
            None => None,
        }
    }

    /// Returns the capability `T` of the class `M`.
    #[inline]
    pub fn class_trait_of<M: Model, T: ClassTrait>(&self) -> Option<&T> {
        self.get_class_trait::<T>(TypeId::of::<M>())
    }

    /// Returns an iterator over the registered classes.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &ClassMeta> {
        self.class_meta_table.values()
    }

    /// Returns the registered classes having the capability `T`.
    pub fn iter_with_trait<T: ClassTrait>(&self) -> impl Iterator<Item = (&ClassMeta, &T)> {
        self.class_meta_table
            .values()
            .filter_map(|item| item.get_trait::<T>().map(|t| (item, t)))
    }
}

impl core::fmt::Debug for ClassRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_set().entries(self.class_path_to_id.keys()).finish()
    }
}

// -----------------------------------------------------------------------------
// ClassRegistryArc

/// A shared, lockable [`ClassRegistry`].
#[derive(Clone, Default)]
pub struct ClassRegistryArc {
    /// The wrapped [`ClassRegistry`].
    pub internal: Arc<RwLock<ClassRegistry>>,
}

impl ClassRegistryArc {
    /// Wraps a registry.
    pub fn new(registry: ClassRegistry) -> Self {
        Self {
            internal: Arc::new(RwLock::new(registry)),
        }
    }

    /// Takes a read lock on the underlying [`ClassRegistry`].
    pub fn read(&self) -> RwLockReadGuard<'_, ClassRegistry> {
        self.internal.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Takes a write lock on the underlying [`ClassRegistry`].
    pub fn write(&self) -> RwLockWriteGuard<'_, ClassRegistry> {
        self.internal
            .write()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl From<ClassRegistry> for ClassRegistryArc {
    #[inline]
    fn from(registry: ClassRegistry) -> Self {
        Self::new(registry)
    }
}

impl core::fmt::Debug for ClassRegistryArc {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        self.read().fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use core::any::TypeId;

    use crate::class::Model;
    use crate::derive::Model;
    use crate::registry::{ClassMeta, ClassRegistry, ClassRegistryArc, FromClass};

    #[derive(Model)]
    struct Account {
        id: u64,
    }

    #[derive(Model)]
    #[model(extends = Account)]
    struct Admin {
        level: u8,
    }

    #[derive(Model)]
    #[model(auto_register)]
    #[allow(dead_code, reason = "only the class is used")]
    struct Session {
        token: String,
    }

    #[derive(Model)]
    #[allow(dead_code, reason = "only the class is used")]
    struct Ledger {
        entries: u32,
    }

    crate::derive::impl_auto_register!(Ledger);

    #[derive(Clone)]
    struct Marker(&'static str);

    impl<T: Model> FromClass<T> for Marker {
        fn from_class() -> Self {
            Marker(T::class_info().name())
        }
    }

    #[test]
    fn register_with_dependencies() {
        let mut registry = ClassRegistry::empty();
        registry.register::<Admin>();

        assert!(registry.contains(TypeId::of::<Admin>()));
        assert!(registry.contains(TypeId::of::<Account>()));
        assert_eq!(
            registry.get_with_class_path(Admin::class_info().path()).map(ClassMeta::name),
            Some("Admin")
        );
        assert_eq!(registry.class_named("Account"), Some(Account::class_info()));
        assert!(registry.class_named("Missing").is_none());
    }

    #[test]
    fn class_traits() {
        let mut registry = ClassRegistry::empty();
        registry.register_class_trait::<Account, Marker>();

        let marker = registry.class_trait_of::<Account, Marker>().unwrap();
        assert_eq!(marker.0, "Account");
        assert!(registry.class_trait_of::<Admin, Marker>().is_none());
        assert_eq!(registry.iter_with_trait::<Marker>().count(), 1);

        let cloned = registry.get(TypeId::of::<Account>()).unwrap().clone();
        assert!(cloned.has_trait::<Marker>());
    }

    #[test]
    fn overwrite_keeps_indices() {
        let mut registry = ClassRegistry::empty();
        registry.register::<Account>();
        registry.register::<Account>();
        assert_eq!(registry.iter().len(), 1);

        let mut meta = ClassMeta::of::<Account>();
        meta.insert_trait(Marker("custom"));
        registry.insert_class_meta(meta);

        assert_eq!(registry.iter().len(), 1);
        assert_eq!(registry.class_trait_of::<Account, Marker>().unwrap().0, "custom");
        assert!(!registry.is_ambiguous("Account"));
    }

    #[cfg(feature = "auto_register")]
    #[test]
    fn auto_register_collects_marked_classes() {
        let mut registry = ClassRegistry::empty();
        assert!(registry.auto_register());
        assert!(registry.contains(TypeId::of::<Session>()));
        assert!(registry.contains(TypeId::of::<Ledger>()));
        assert!(!registry.contains(TypeId::of::<Account>()));
        assert_eq!(registry.class_named("Session"), Some(Session::class_info()));

        let len = registry.iter().len();
        assert!(registry.auto_register());
        assert_eq!(registry.iter().len(), len);

        let registry = ClassRegistry::new();
        assert!(registry.contains(TypeId::of::<Session>()));
        assert!(registry.contains(TypeId::of::<Ledger>()));
    }

    #[cfg(not(feature = "auto_register"))]
    #[test]
    fn auto_register_is_unavailable() {
        let mut registry = ClassRegistry::empty();
        assert!(!registry.auto_register());
        assert!(!registry.contains(TypeId::of::<Session>()));
        assert_eq!(ClassRegistry::new().iter().len(), 0);
    }

    #[test]
    fn shared_registry() {
        let shared = ClassRegistryArc::new(ClassRegistry::empty());
        shared.write().register::<Admin>();

        let other = shared.clone();
        assert!(other.read().contains(TypeId::of::<Account>()));
    }
}
