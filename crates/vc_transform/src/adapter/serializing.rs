use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::fmt;

use vc_model::class::{ClassInfo, Model};
use vc_model::mapping::MappingDictionary;
use vc_model::registry::FromClass;

use crate::adapter::{ModelError, ModelObject, ModelRef};
use crate::transformer::ValueTransformer;
use crate::value::Dictionary;

// -----------------------------------------------------------------------------
// KeyPaths

/// Where a property is found in a JSON dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyPaths {
    /// A single dot-separated key path.
    One(String),
    /// Several key paths, the property value is a dictionary keyed by path.
    Many(Vec<String>),
}

impl From<&str> for KeyPaths {
    #[inline]
    fn from(value: &str) -> Self {
        KeyPaths::One(String::from(value))
    }
}

impl From<String> for KeyPaths {
    #[inline]
    fn from(value: String) -> Self {
        KeyPaths::One(value)
    }
}

impl From<Vec<String>> for KeyPaths {
    #[inline]
    fn from(value: Vec<String>) -> Self {
        KeyPaths::Many(value)
    }
}

impl<const N: usize> From<[&str; N]> for KeyPaths {
    #[inline]
    fn from(value: [&str; N]) -> Self {
        KeyPaths::Many(value.into_iter().map(String::from).collect())
    }
}

/// Property name to JSON key paths.
pub type JsonKeyPaths = MappingDictionary<KeyPaths>;

/// Collects `(property, key paths)` pairs into [`JsonKeyPaths`].
///
/// ```
/// use vc_transform::adapter::{KeyPaths, json_key_paths};
///
/// let paths = json_key_paths([("name", "user.name")]);
/// assert_eq!(paths.get("name"), Some(&KeyPaths::from("user.name")));
///
/// let paths = json_key_paths([("position", ["x", "y"])]);
/// assert!(matches!(paths.get("position"), Some(KeyPaths::Many(p)) if p.len() == 2));
/// ```
pub fn json_key_paths<K, P>(pairs: impl IntoIterator<Item = (K, P)>) -> JsonKeyPaths
where
    K: Into<String>,
    P: Into<KeyPaths>,
{
    pairs.into_iter().map(|(key, paths)| (key, paths.into())).collect()
}

// -----------------------------------------------------------------------------
// JsonSerializing

/// A model that can be read from and written to JSON dictionaries.
///
/// Register the capability with
/// `#[model(class_trait = ReflectJsonSerializing)]`, or
/// [`ClassRegistry::register_class_trait`].
///
/// [`ClassRegistry::register_class_trait`]: vc_model::registry::ClassRegistry::register_class_trait
pub trait JsonSerializing: Model + ModelObject + Sized {
    /// Property names to the key paths of their values.
    ///
    /// Properties left out are not serialized.
    fn json_key_paths_by_property_key() -> JsonKeyPaths;

    /// A transformer for the property `key`.
    ///
    /// Without one, the adapter picks a default from the property attributes,
    /// see [`json_transformer_for_class`] and [`json_transformer_for_encoding`].
    ///
    /// [`json_transformer_for_class`]: JsonSerializing::json_transformer_for_class
    /// [`json_transformer_for_encoding`]: JsonSerializing::json_transformer_for_encoding
    fn json_transformer_for_key(_key: &str) -> Option<ValueTransformer> {
        None
    }

    /// A default transformer for properties holding models of `class`.
    ///
    /// Without one, the adapter converts nested JSON serializing models.
    fn json_transformer_for_class(_class: &'static ClassInfo) -> Option<ValueTransformer> {
        None
    }

    /// A default transformer for properties whose type encoding is
    /// `encoding` and that hold no registered class.
    ///
    /// Without one, the adapter uses [`boolean`] for `B` and [`url`] for
    /// `@"Url"`.
    ///
    /// [`boolean`]: crate::transformer::boolean
    /// [`url`]: crate::transformer::url
    fn json_transformer_for_encoding(_encoding: &str) -> Option<ValueTransformer> {
        None
    }

    /// The class to build from `dictionary`, which may be a subclass.
    ///
    /// The adapter asks the picked class again, until a class picks itself.
    fn class_for_parsing_json_dictionary(_dictionary: &Dictionary) -> Option<&'static ClassInfo> {
        Some(Self::class_info())
    }

    /// Builds the model from values keyed by property name.
    ///
    /// Properties without a value in the JSON dictionary are absent.
    fn from_property_values(values: Dictionary) -> Result<Self, ModelError>;
}

// -----------------------------------------------------------------------------
// ReflectJsonSerializing

/// The [`JsonSerializing`] capability of a registered class.
#[derive(Clone)]
pub struct ReflectJsonSerializing {
    json_key_paths_by_property_key: fn() -> JsonKeyPaths,
    json_transformer_for_key: fn(&str) -> Option<ValueTransformer>,
    json_transformer_for_class: fn(&'static ClassInfo) -> Option<ValueTransformer>,
    json_transformer_for_encoding: fn(&str) -> Option<ValueTransformer>,
    class_for_parsing_json_dictionary: fn(&Dictionary) -> Option<&'static ClassInfo>,
    from_property_values: fn(Dictionary) -> Result<ModelRef, ModelError>,
}

impl ReflectJsonSerializing {
    /// See [`JsonSerializing::json_key_paths_by_property_key`].
    #[inline]
    pub fn json_key_paths_by_property_key(&self) -> JsonKeyPaths {
        (self.json_key_paths_by_property_key)()
    }

    /// See [`JsonSerializing::json_transformer_for_key`].
    #[inline]
    pub fn json_transformer_for_key(&self, key: &str) -> Option<ValueTransformer> {
        (self.json_transformer_for_key)(key)
    }

    /// See [`JsonSerializing::json_transformer_for_class`].
    #[inline]
    pub fn json_transformer_for_class(&self, class: &'static ClassInfo) -> Option<ValueTransformer> {
        (self.json_transformer_for_class)(class)
    }

    /// See [`JsonSerializing::json_transformer_for_encoding`].
    #[inline]
    pub fn json_transformer_for_encoding(&self, encoding: &str) -> Option<ValueTransformer> {
        (self.json_transformer_for_encoding)(encoding)
    }

    /// See [`JsonSerializing::class_for_parsing_json_dictionary`].
    #[inline]
    pub fn class_for_parsing_json_dictionary(&self, dictionary: &Dictionary) -> Option<&'static ClassInfo> {
        (self.class_for_parsing_json_dictionary)(dictionary)
    }

    /// See [`JsonSerializing::from_property_values`].
    #[inline]
    pub fn from_property_values(&self, values: Dictionary) -> Result<ModelRef, ModelError> {
        (self.from_property_values)(values)
    }
}

impl<T: JsonSerializing> FromClass<T> for ReflectJsonSerializing {
    fn from_class() -> Self {
        ReflectJsonSerializing {
            json_key_paths_by_property_key: T::json_key_paths_by_property_key,
            json_transformer_for_key: T::json_transformer_for_key,
            json_transformer_for_class: T::json_transformer_for_class,
            json_transformer_for_encoding: T::json_transformer_for_encoding,
            class_for_parsing_json_dictionary: T::class_for_parsing_json_dictionary,
            from_property_values: |values| {
                let model: ModelRef = Arc::new(T::from_property_values(values)?);
                Ok(model)
            },
        }
    }
}

impl fmt::Debug for ReflectJsonSerializing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ReflectJsonSerializing").finish_non_exhaustive()
    }
}
