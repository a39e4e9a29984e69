//! Property resolution across a class hierarchy.
//!
//! The methods live on [`ClassRegistry`], which owns the attribute cache. The
//! free functions of this module run them against the
//! [global registry](crate::registry::global), releasing the lock before any
//! callback runs.
//!
//! ```
//! use vc_model::{class::Model, derive::Model, hierarchy};
//!
//! #[derive(Model)]
//! struct Shape {
//!     #[model(readonly)]
//!     id: u64,
//! }
//!
//! #[derive(Model)]
//! #[model(extends = Shape)]
//! struct Circle {
//!     radius: f64,
//! }
//!
//! let writable = hierarchy::names_of_properties_in_hierarchy(
//!     Circle::class_info(),
//!     None,
//!     |attrs| !attrs.is_readonly(),
//! );
//! assert_eq!(writable.len(), 1);
//! assert!(writable.contains("radius"));
//! ```

use alloc::string::{String, ToString};
use alloc::sync::Arc;
use alloc::vec::Vec;
use std::sync::PoisonError;

use crate::attributes::PropertyAttributes;
use crate::class::ClassInfo;
use crate::hash::HashSet;
use crate::registry::{ClassRegistry, DeclaredProperties, global};

// -----------------------------------------------------------------------------
// ClassRegistry

impl ClassRegistry {
    /// Returns the resolved attributes of the properties declared directly on
    /// `class`, in declaration order.
    ///
    /// Malformed declarations are logged and left out. The result is cached
    /// until the next registration.
    pub fn declared_properties(&self, class: &'static ClassInfo) -> DeclaredProperties {
        let type_id = class.type_id();

        let cached = self
            .attributes_cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&type_id)
            .cloned();
        if let Some(cached) = cached {
            return cached;
        }

        let resolved: DeclaredProperties = class
            .properties()
            .iter()
            .filter_map(|decl| {
                match PropertyAttributes::resolve(class, decl, |name| self.class_named(name)) {
                    Ok(attributes) => Some(Arc::new(attributes)),
                    Err(err) => {
                        log::warn!(
                            "skipping property `{}` of `{}`: {err}",
                            decl.name(),
                            class.path()
                        );
                        None
                    }
                }
            })
            .collect();

        log::trace!("resolved {} properties of `{}`", resolved.len(), class.path());

        // Another thread may have resolved the same class meanwhile, the
        // results are equal.
        self.attributes_cache
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(type_id)
            .or_insert(resolved)
            .clone()
    }

    /// Returns the attributes of the nearest declaration of `name` in the
    /// ancestry of `class`, starting at `class` itself.
    ///
    /// Returns `None` if no class declares it, or if the nearest declaration
    /// is malformed.
    pub fn property_attributes(
        &self,
        class: &'static ClassInfo,
        name: &str,
    ) -> Option<Arc<PropertyAttributes>> {
        let declaring = class.ancestors().find(|c| c.property(name).is_some())?;
        self.declared_properties(declaring)
            .iter()
            .find(|attrs| attrs.name() == name)
            .cloned()
    }

    /// Returns the declared properties of each class from `class` up to, but
    /// excluding, `until`.
    ///
    /// `until` only applies if it is a proper ancestor of `class`. Otherwise
    /// the whole ancestry is returned.
    pub fn hierarchy_properties(
        &self,
        class: &'static ClassInfo,
        until: Option<&ClassInfo>,
    ) -> Vec<DeclaredProperties> {
        let until = until.filter(|until| class.is_subclass_of(until));
        class
            .ancestors()
            .take_while(|c| Some(*c) != until)
            .map(|c| self.declared_properties(c))
            .collect()
    }

    /// Returns the names of all properties in the hierarchy of `class`, up to
    /// but excluding `until`, for which `predicate` returns `true`.
    ///
    /// A property re-declared by a subclass is tested against each of its
    /// declarations and included if any of them passes.
    pub fn names_of_properties_in_hierarchy(
        &self,
        class: &'static ClassInfo,
        until: Option<&ClassInfo>,
        predicate: impl FnMut(&PropertyAttributes) -> bool,
    ) -> HashSet<String> {
        names_passing(&self.hierarchy_properties(class, until), predicate)
    }

    /// Resolves the nearest declaration of each name in `names`, in
    /// iteration order.
    ///
    /// Unknown names are logged and skipped.
    pub fn properties_named<I>(&self, class: &'static ClassInfo, names: I) -> Vec<Arc<PropertyAttributes>>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        names
            .into_iter()
            .filter_map(|name| {
                let name = name.as_ref();
                let found = self.property_attributes(class, name);
                if found.is_none() {
                    log::debug!("`{}` has no property named `{name}`", class.path());
                }
                found
            })
            .collect()
    }

    /// Calls `callback` with the attributes of each named property.
    ///
    /// Returns the number of callbacks made, which is less than the number
    /// of names if some could not be resolved.
    pub fn enumerate_properties<I>(
        &self,
        class: &'static ClassInfo,
        names: I,
        callback: impl FnMut(&PropertyAttributes),
    ) -> usize
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        call_each(&self.properties_named(class, names), callback)
    }

    /// Returns the names of the storable properties of the whole hierarchy.
    ///
    /// Read-only properties without backing storage are excluded.
    pub fn property_keys(&self, class: &'static ClassInfo) -> HashSet<String> {
        self.names_of_properties_in_hierarchy(class, None, is_storable)
    }
}

fn is_storable(attributes: &PropertyAttributes) -> bool {
    !(attributes.is_readonly() && attributes.ivar().is_none())
}

fn names_passing(
    levels: &[DeclaredProperties],
    mut predicate: impl FnMut(&PropertyAttributes) -> bool,
) -> HashSet<String> {
    let mut names = HashSet::default();
    for attributes in levels.iter().flat_map(|level| level.iter()) {
        if !names.contains(attributes.name()) && predicate(attributes) {
            names.insert(attributes.name().to_string());
        }
    }
    names
}

fn call_each(
    properties: &[Arc<PropertyAttributes>],
    mut callback: impl FnMut(&PropertyAttributes),
) -> usize {
    for attributes in properties {
        callback(attributes);
    }
    properties.len()
}

// -----------------------------------------------------------------------------
// Global

/// [`ClassRegistry::names_of_properties_in_hierarchy`] on the global registry.
pub fn names_of_properties_in_hierarchy(
    class: &'static ClassInfo,
    until: Option<&ClassInfo>,
    predicate: impl FnMut(&PropertyAttributes) -> bool,
) -> HashSet<String> {
    let levels = global().read().hierarchy_properties(class, until);
    names_passing(&levels, predicate)
}

/// [`ClassRegistry::enumerate_properties`] on the global registry.
pub fn enumerate_properties<I>(
    class: &'static ClassInfo,
    names: I,
    callback: impl FnMut(&PropertyAttributes),
) -> usize
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    let properties = global().read().properties_named(class, names);
    call_each(&properties, callback)
}

/// [`ClassRegistry::property_attributes`] on the global registry.
pub fn property_attributes(class: &'static ClassInfo, name: &str) -> Option<Arc<PropertyAttributes>> {
    global().read().property_attributes(class, name)
}

/// [`ClassRegistry::property_keys`] on the global registry.
pub fn property_keys(class: &'static ClassInfo) -> HashSet<String> {
    global().read().property_keys(class)
}
