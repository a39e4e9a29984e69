//! Property name to serialization key mappings.
//!
//! - [`identity_property_map`]: every property maps to its own name.
//! - [`property_key_map`]: the key is derived per property, see [`PropertyKey`].
//!
//! Properties are visited in name order, so the result does not depend on
//! declaration order.

use alloc::collections::BTreeMap;
use alloc::collections::btree_map;
use alloc::string::String;
use alloc::vec::Vec;

use crate::class::ClassInfo;
use crate::registry::{ClassRegistry, global};

// -----------------------------------------------------------------------------
// PropertyKey

/// The outcome of deriving the key of one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyKey<V> {
    /// Maps the property to the value.
    Key(V),
    /// Leaves this property out.
    Skip,
    /// Leaves this property and every remaining one out.
    Stop,
}

impl<V> From<Option<V>> for PropertyKey<V> {
    /// `None` skips the property.
    #[inline]
    fn from(value: Option<V>) -> Self {
        match value {
            Some(value) => PropertyKey::Key(value),
            None => PropertyKey::Skip,
        }
    }
}

// -----------------------------------------------------------------------------
// MappingDictionary

/// An immutable map from property name to key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingDictionary<V = String> {
    entries: BTreeMap<String, V>,
}

impl<V> MappingDictionary<V> {
    /// Returns the key of a property.
    #[inline]
    pub fn get(&self, property: &str) -> Option<&V> {
        self.entries.get(property)
    }

    #[inline]
    pub fn contains_key(&self, property: &str) -> bool {
        self.entries.contains_key(property)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates over `(property, key)` pairs in property name order.
    #[inline]
    pub fn iter(&self) -> btree_map::Iter<'_, String, V> {
        self.entries.iter()
    }

    /// Iterates over the property names.
    #[inline]
    pub fn keys(&self) -> btree_map::Keys<'_, String, V> {
        self.entries.keys()
    }

    /// Iterates over the mapped keys.
    #[inline]
    pub fn values(&self) -> btree_map::Values<'_, String, V> {
        self.entries.values()
    }

    /// Returns the underlying map.
    #[inline]
    pub fn into_inner(self) -> BTreeMap<String, V> {
        self.entries
    }
}

impl<K: Into<String>, V> FromIterator<(K, V)> for MappingDictionary<V> {
    /// Collects explicit `(property, key)` pairs, later pairs win.
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().map(|(k, v)| (k.into(), v)).collect(),
        }
    }
}

impl<V> IntoIterator for MappingDictionary<V> {
    type Item = (String, V);
    type IntoIter = btree_map::IntoIter<String, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a, V> IntoIterator for &'a MappingDictionary<V> {
    type Item = (&'a String, &'a V);
    type IntoIter = btree_map::Iter<'a, String, V>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

// -----------------------------------------------------------------------------
// Builders

fn sorted_property_names(registry: &ClassRegistry, class: &'static ClassInfo) -> Vec<String> {
    let mut names: Vec<String> = registry
        .names_of_properties_in_hierarchy(class, None, |_| true)
        .into_iter()
        .collect();
    names.sort_unstable();
    names
}

fn build_map<V>(names: Vec<String>, mut derive: impl FnMut(&str) -> PropertyKey<V>) -> MappingDictionary<V> {
    let mut entries = BTreeMap::new();
    for name in names {
        match derive(&name) {
            PropertyKey::Key(value) => {
                entries.insert(name, value);
            }
            PropertyKey::Skip => {}
            PropertyKey::Stop => break,
        }
    }
    MappingDictionary { entries }
}

impl ClassRegistry {
    /// See [`identity_property_map`].
    pub fn identity_property_map(&self, class: &'static ClassInfo) -> MappingDictionary<String> {
        build_map(sorted_property_names(self, class), |name| PropertyKey::Key(String::from(name)))
    }

    /// See [`property_key_map`].
    pub fn property_key_map<V>(
        &self,
        class: &'static ClassInfo,
        derive: impl FnMut(&str) -> PropertyKey<V>,
    ) -> MappingDictionary<V> {
        build_map(sorted_property_names(self, class), derive)
    }
}

/// Maps every property in the hierarchy of `class` to its own name.
///
/// ```
/// use vc_model::{class::Model, derive::Model, mapping};
///
/// #[derive(Model)]
/// struct User {
///     name: String,
///     email: String,
/// }
///
/// let map = mapping::identity_property_map(User::class_info());
/// assert_eq!(map.get("name").map(String::as_str), Some("name"));
/// assert_eq!(map.keys().collect::<Vec<_>>(), ["email", "name"]);
/// ```
pub fn identity_property_map(class: &'static ClassInfo) -> MappingDictionary<String> {
    let names = sorted_property_names(&global().read(), class);
    build_map(names, |name| PropertyKey::Key(String::from(name)))
}

/// Maps each property in the hierarchy of `class` to a derived key.
///
/// Properties are visited in name order. See [`PropertyKey`] for what
/// `derive` may return.
///
/// ```
/// use vc_model::{class::Model, derive::Model, mapping::{self, PropertyKey}};
///
/// #[derive(Model)]
/// struct User {
///     first_name: String,
///     last_name: String,
///     password: String,
/// }
///
/// let map = mapping::property_key_map(User::class_info(), |name| match name {
///     "password" => PropertyKey::Skip,
///     _ => PropertyKey::Key(name.replace('_', "-")),
/// });
/// assert_eq!(map.get("first_name").map(String::as_str), Some("first-name"));
/// assert!(!map.contains_key("password"));
/// ```
pub fn property_key_map<V>(
    class: &'static ClassInfo,
    derive: impl FnMut(&str) -> PropertyKey<V>,
) -> MappingDictionary<V> {
    let names = sorted_property_names(&global().read(), class);
    build_map(names, derive)
}
