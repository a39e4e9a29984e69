use alloc::string::String;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::TypeId;

use vc_model::attributes::PropertyAttributes;
use vc_model::class::ClassInfo;
use vc_model::registry::{ClassRegistryArc, global};

use crate::adapter::{
    AdapterError, KeyPaths, ModelObject, ModelRef, ReflectJsonSerializing, set_value_for_key_path,
    value_for_key_path,
};
use crate::transformer::{ValueTransformer, boolean, model_dictionary_with, url};
use crate::value::{Dictionary, Value};

// -----------------------------------------------------------------------------
// ModelAdapter

/// Converts between dictionaries and models.
pub trait ModelAdapter: Send + Sync {
    /// Returns `true` if models of `class` can be converted.
    fn supports_class(&self, class: &'static ClassInfo) -> bool;

    /// Builds a model of `class`, or of a class it picks, from `dictionary`.
    fn model_from_dictionary(&self, class: &'static ClassInfo, dictionary: &Dictionary)
    -> Result<ModelRef, AdapterError>;

    /// Writes the properties of `model` into a dictionary.
    fn dictionary_from_model(&self, model: &dyn ModelObject) -> Result<Dictionary, AdapterError>;
}

// -----------------------------------------------------------------------------
// JsonAdapter

/// The default [`ModelAdapter`], driven by [`JsonSerializing`].
///
/// Classes are looked up in a [`ClassRegistryArc`], the global one by
/// default. Each property is read from its key paths and converted by the
/// first of:
///
/// 1. the transformer the model returns from `json_transformer_for_key`;
/// 2. for a property holding a registered class, the one from
///    `json_transformer_for_class`, or [`model_dictionary_with`] this
///    adapter if that class is JSON serializing;
/// 3. for other properties, the one from `json_transformer_for_encoding`,
///    or [`boolean`] for a `bool`, or [`url`] for a `url::Url`.
///
/// [`JsonSerializing`]: crate::adapter::JsonSerializing
#[derive(Clone, Debug)]
pub struct JsonAdapter {
    registry: ClassRegistryArc,
}

impl Default for JsonAdapter {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

// The resolved mapping of one property.
struct PropertyPlan {
    key: String,
    key_paths: KeyPaths,
    transformer: Option<ValueTransformer>,
}

impl JsonAdapter {
    /// Creates an adapter over the [global](vc_model::registry::global) registry.
    #[inline]
    pub fn new() -> Self {
        Self::with_registry(global().clone())
    }

    /// Creates an adapter over `registry`.
    #[inline]
    pub fn with_registry(registry: ClassRegistryArc) -> Self {
        Self { registry }
    }

    #[inline]
    pub fn registry(&self) -> &ClassRegistryArc {
        &self.registry
    }

    /// Builds a model of `class` from a JSON dictionary.
    ///
    /// # Errors
    ///
    /// - [`AdapterError::NotSerializing`]: `class`, or the class it picks for
    ///   `dictionary`, is not registered as JSON serializing.
    /// - [`AdapterError::NoClassFound`]: `class`, or a class it picked, picked
    ///   no class.
    /// - [`AdapterError::CyclicClassRedirect`]: the picked classes form a cycle.
    /// - [`AdapterError::InvalidJsonMapping`]: a mapped key is not a property key.
    /// - [`AdapterError::InvalidJsonDictionary`]: a key path crosses a non-dictionary.
    /// - [`AdapterError::Transform`]: a property transformer failed.
    /// - [`AdapterError::Model`]: the model rejected its values.
    pub fn model_from_dictionary(
        &self,
        class: &'static ClassInfo,
        dictionary: &Dictionary,
    ) -> Result<ModelRef, AdapterError> {
        let (class, serializing) = self.parsing_class(class, dictionary)?;

        let mut values = Dictionary::new();
        for plan in self.plan(class, &serializing)? {
            let value = match &plan.key_paths {
                KeyPaths::One(key_path) => value_for_key_path(dictionary, key_path)?.cloned(),
                KeyPaths::Many(key_paths) => {
                    let mut gathered = Dictionary::new();
                    for key_path in key_paths {
                        if let Some(value) = value_for_key_path(dictionary, key_path)? {
                            gathered.insert(key_path.clone(), value.clone());
                        }
                    }
                    Some(Value::Dictionary(gathered))
                }
            };
            let Some(value) = value else {
                continue;
            };

            let value = match &plan.transformer {
                Some(transformer) => transformer
                    .apply(value)
                    .map_err(|error| AdapterError::transform(&plan.key, error))?,
                None => value,
            };
            values.insert(plan.key, value);
        }

        Ok(serializing.from_property_values(values)?)
    }

    /// Builds a model for each dictionary of `array`.
    ///
    /// Fails on the first element that is not a dictionary or cannot be
    /// converted.
    pub fn models_from_array(&self, class: &'static ClassInfo, array: &[Value]) -> Result<Vec<ModelRef>, AdapterError> {
        array
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::Dictionary(dictionary) => self.model_from_dictionary(class, dictionary),
                other => Err(AdapterError::UnexpectedValue {
                    key: alloc::format!("[{index}]"),
                    expected: "a dictionary",
                    found: other.kind(),
                }),
            })
            .collect()
    }

    /// Writes the mapped properties of `model` into a JSON dictionary.
    ///
    /// Transformers are applied in reverse. A forward-only transformer leaves
    /// the value as it is.
    pub fn dictionary_from_model(&self, model: &dyn ModelObject) -> Result<Dictionary, AdapterError> {
        let class = model.class();
        let serializing = self.serializing(class)?;

        let mut dictionary = Dictionary::new();
        for plan in self.plan(class, &serializing)? {
            let Some(value) = model.value_for_key(&plan.key) else {
                continue;
            };

            let value = match &plan.transformer {
                Some(transformer) if transformer.supports_reverse() => transformer
                    .apply_reverse(value)
                    .map_err(|error| AdapterError::transform(&plan.key, error))?,
                _ => value,
            };

            match &plan.key_paths {
                KeyPaths::One(key_path) => set_value_for_key_path(&mut dictionary, key_path, value)?,
                KeyPaths::Many(key_paths) => {
                    let values = match value {
                        Value::Null => continue,
                        Value::Dictionary(values) => values,
                        other => {
                            return Err(AdapterError::UnexpectedValue {
                                key: plan.key,
                                expected: "a dictionary",
                                found: other.kind(),
                            });
                        }
                    };
                    for key_path in key_paths {
                        if let Some(value) = values.get(key_path) {
                            set_value_for_key_path(&mut dictionary, key_path, value.clone())?;
                        }
                    }
                }
            }
        }

        Ok(dictionary)
    }

    /// Writes each model of `models` into a JSON dictionary.
    pub fn array_from_models(&self, models: &[ModelRef]) -> Result<Vec<Value>, AdapterError> {
        models
            .iter()
            .map(|model| self.dictionary_from_model(&**model).map(Value::Dictionary))
            .collect()
    }

    fn serializing(&self, class: &'static ClassInfo) -> Result<ReflectJsonSerializing, AdapterError> {
        self.registry
            .read()
            .get(class.type_id())
            .and_then(|meta| meta.get_trait::<ReflectJsonSerializing>())
            .cloned()
            .ok_or(AdapterError::NotSerializing(class.path()))
    }

    // Follows `class_for_parsing_json_dictionary` until a class picks itself.
    fn parsing_class(
        &self,
        class: &'static ClassInfo,
        dictionary: &Dictionary,
    ) -> Result<(&'static ClassInfo, ReflectJsonSerializing), AdapterError> {
        let mut visited: Vec<TypeId> = Vec::new();
        let mut class = class;
        let mut serializing = self.serializing(class)?;
        loop {
            let picked = serializing
                .class_for_parsing_json_dictionary(dictionary)
                .ok_or(AdapterError::NoClassFound(class.path()))?;
            if picked.type_id() == class.type_id() {
                return Ok((class, serializing));
            }

            visited.push(class.type_id());
            if visited.contains(&picked.type_id()) {
                return Err(AdapterError::CyclicClassRedirect(picked.path()));
            }
            log::trace!("`{}` parses the dictionary as `{}`", class.path(), picked.path());
            class = picked;
            serializing = self.serializing(class)?;
        }
    }

    // The registry lock is released before transformers are built, they may
    // lock it again.
    fn plan(
        &self,
        class: &'static ClassInfo,
        serializing: &ReflectJsonSerializing,
    ) -> Result<Vec<PropertyPlan>, AdapterError> {
        let key_paths = serializing.json_key_paths_by_property_key();

        let resolved = {
            let registry = self.registry.read();
            let property_keys = registry.property_keys(class);
            key_paths
                .into_iter()
                .map(|(key, key_paths)| {
                    if !property_keys.contains(&key) {
                        return Err(AdapterError::InvalidJsonMapping {
                            class: class.path(),
                            key,
                        });
                    }
                    let attributes = registry.property_attributes(class, &key);
                    Ok((key, key_paths, attributes))
                })
                .collect::<Result<Vec<_>, _>>()?
        };

        Ok(resolved
            .into_iter()
            .map(|(key, key_paths, attributes)| {
                let transformer = serializing
                    .json_transformer_for_key(&key)
                    .or_else(|| self.default_transformer(serializing, attributes.as_deref()?));
                PropertyPlan {
                    key,
                    key_paths,
                    transformer,
                }
            })
            .collect())
    }

    fn default_transformer(
        &self,
        serializing: &ReflectJsonSerializing,
        attributes: &PropertyAttributes,
    ) -> Option<ValueTransformer> {
        if let Some(object_class) = attributes.object_class() {
            return serializing.json_transformer_for_class(object_class).or_else(|| {
                model_dictionary_with(Arc::new(self.clone()), object_class).ok()
            });
        }

        let encoding = attributes.type_encoding();
        serializing
            .json_transformer_for_encoding(encoding)
            .or_else(|| match encoding {
                "B" => Some(boolean()),
                r#"@"Url""# => Some(url()),
                _ => None,
            })
    }

    /// Returns `true` if `class` is registered as JSON serializing.
    pub fn supports_class(&self, class: &'static ClassInfo) -> bool {
        self.registry
            .read()
            .get(class.type_id())
            .is_some_and(|meta| meta.has_trait::<ReflectJsonSerializing>())
    }
}

impl ModelAdapter for JsonAdapter {
    #[inline]
    fn supports_class(&self, class: &'static ClassInfo) -> bool {
        JsonAdapter::supports_class(self, class)
    }

    #[inline]
    fn model_from_dictionary(
        &self,
        class: &'static ClassInfo,
        dictionary: &Dictionary,
    ) -> Result<ModelRef, AdapterError> {
        JsonAdapter::model_from_dictionary(self, class, dictionary)
    }

    #[inline]
    fn dictionary_from_model(&self, model: &dyn ModelObject) -> Result<Dictionary, AdapterError> {
        JsonAdapter::dictionary_from_model(self, model)
    }
}

#[cfg(test)]
mod tests {
    use alloc::borrow::ToOwned;
    use alloc::collections::BTreeMap;
    use alloc::string::String;
    use alloc::sync::Arc;
    use alloc::vec::Vec;

    use serde_json::json;
    use url::Url;
    use vc_model::class::{ClassInfo, Model};
    use vc_model::derive::Model;
    use vc_model::mapping::identity_property_map;

    use super::JsonAdapter;
    use crate::adapter::{
        AdapterError, JsonKeyPaths, JsonSerializing, KeyPaths, ModelError, ModelObject, ReflectJsonSerializing,
        json_key_paths,
    };
    use crate::transformer::{TransformError, ValueTransformer, model_array, value_mapping};
    use crate::value::{Dictionary, Number, Value};

    // -------------------------------------------------------------------------
    // Address

    #[derive(Model)]
    #[model(class_trait = ReflectJsonSerializing)]
    struct Address {
        street: String,
        city: String,
    }

    impl ModelObject for Address {
        fn class(&self) -> &'static ClassInfo {
            Self::class_info()
        }

        fn value_for_key(&self, key: &str) -> Option<Value> {
            match key {
                "street" => Some(Value::from(self.street.as_str())),
                "city" => Some(Value::from(self.city.as_str())),
                _ => None,
            }
        }
    }

    impl JsonSerializing for Address {
        fn json_key_paths_by_property_key() -> JsonKeyPaths {
            json_key_paths(identity_property_map(Self::class_info()))
        }

        fn from_property_values(values: Dictionary) -> Result<Self, ModelError> {
            let text = |key: &str| values.get(key).and_then(Value::as_str).map(ToOwned::to_owned);
            Ok(Address {
                street: text("street").unwrap_or_default(),
                city: text("city").ok_or_else(|| ModelError::new("`city` is required"))?,
            })
        }
    }

    // -------------------------------------------------------------------------
    // User

    #[derive(Model)]
    #[model(class_trait = ReflectJsonSerializing, rename_all = "camelCase")]
    struct User {
        #[model(readonly)]
        id: u64,
        user_name: String,
        admin: bool,
        address: Option<Arc<Address>>,
        history: Vec<Arc<Address>>,
        coordinates: BTreeMap<String, f64>,
        #[model(readonly, dynamic)]
        display_name: String,
    }

    impl ModelObject for User {
        fn class(&self) -> &'static ClassInfo {
            Self::class_info()
        }

        fn value_for_key(&self, key: &str) -> Option<Value> {
            Some(match key {
                "id" => Value::from(self.id),
                "userName" => Value::from(self.user_name.as_str()),
                "admin" => Value::from(self.admin),
                "address" => self.address.clone().map_or(Value::Null, |a| Value::Model(a)),
                "history" => Value::Array(self.history.iter().map(|a| Value::Model(a.clone())).collect()),
                "coordinates" => Value::Dictionary(
                    self.coordinates
                        .iter()
                        .map(|(path, n)| (path.clone(), Value::from(*n)))
                        .collect(),
                ),
                "displayName" => Value::from(self.display_name.as_str()),
                _ => return None,
            })
        }
    }

    impl JsonSerializing for User {
        fn json_key_paths_by_property_key() -> JsonKeyPaths {
            json_key_paths([
                ("id", KeyPaths::from("id")),
                ("userName", KeyPaths::from("user_name")),
                ("admin", KeyPaths::from("flags.admin")),
                ("address", KeyPaths::from("address")),
                ("history", KeyPaths::from("history")),
                ("coordinates", KeyPaths::from(["geo.lat", "geo.lng"])),
            ])
        }

        fn json_transformer_for_key(key: &str) -> Option<ValueTransformer> {
            match key {
                "history" => model_array(Address::class_info()).ok(),
                _ => None,
            }
        }

        fn from_property_values(values: Dictionary) -> Result<Self, ModelError> {
            let id = values
                .get("id")
                .and_then(Value::as_number)
                .and_then(Number::as_u64)
                .ok_or_else(|| ModelError::new("`id` is required"))?;
            let user_name = values.get("userName").and_then(Value::as_str).unwrap_or_default();
            let history = values
                .get("history")
                .and_then(Value::as_array)
                .map(|items| items.iter().cloned().filter_map(Value::into_model::<Address>).collect())
                .unwrap_or_default();
            let coordinates = values
                .get("coordinates")
                .and_then(Value::as_dictionary)
                .map(|entries| {
                    entries
                        .iter()
                        .filter_map(|(path, n)| Some((path.clone(), n.as_number()?.as_f64()?)))
                        .collect()
                })
                .unwrap_or_default();

            Ok(User {
                id,
                user_name: user_name.to_owned(),
                admin: values.get("admin").and_then(Value::as_bool).unwrap_or(false),
                address: values.get("address").cloned().and_then(Value::into_model::<Address>),
                history,
                coordinates,
                display_name: String::new(),
            })
        }
    }

    // -------------------------------------------------------------------------
    // Shapes

    #[derive(Model)]
    #[model(class_trait = ReflectJsonSerializing)]
    struct Shape {
        name: String,
    }

    #[derive(Model)]
    #[model(extends = Shape, class_trait = ReflectJsonSerializing)]
    struct Circle {
        name: String,
        radius: f64,
    }

    impl ModelObject for Shape {
        fn class(&self) -> &'static ClassInfo {
            Self::class_info()
        }

        fn value_for_key(&self, key: &str) -> Option<Value> {
            (key == "name").then(|| Value::from(self.name.as_str()))
        }
    }

    impl JsonSerializing for Shape {
        fn json_key_paths_by_property_key() -> JsonKeyPaths {
            json_key_paths([("name", "name")])
        }

        fn class_for_parsing_json_dictionary(dictionary: &Dictionary) -> Option<&'static ClassInfo> {
            dictionary.contains_key("radius").then(Circle::class_info)
        }

        fn from_property_values(_values: Dictionary) -> Result<Self, ModelError> {
            Err(ModelError::new("shapes are abstract"))
        }
    }

    impl ModelObject for Circle {
        fn class(&self) -> &'static ClassInfo {
            Self::class_info()
        }

        fn value_for_key(&self, key: &str) -> Option<Value> {
            match key {
                "name" => Some(Value::from(self.name.as_str())),
                "radius" => Some(Value::from(self.radius)),
                _ => None,
            }
        }
    }

    impl JsonSerializing for Circle {
        fn json_key_paths_by_property_key() -> JsonKeyPaths {
            json_key_paths([("name", "name"), ("radius", "radius")])
        }

        fn class_for_parsing_json_dictionary(dictionary: &Dictionary) -> Option<&'static ClassInfo> {
            Some(if dictionary.contains_key("thickness") {
                Disc::class_info()
            } else {
                Self::class_info()
            })
        }

        fn from_property_values(values: Dictionary) -> Result<Self, ModelError> {
            Ok(Circle {
                name: values.get("name").and_then(Value::as_str).unwrap_or_default().to_owned(),
                radius: values
                    .get("radius")
                    .and_then(Value::as_number)
                    .and_then(Number::as_f64)
                    .unwrap_or_default(),
            })
        }
    }

    #[derive(Model)]
    #[model(extends = Circle, class_trait = ReflectJsonSerializing)]
    struct Disc {
        name: String,
        radius: f64,
        thickness: f64,
    }

    impl ModelObject for Disc {
        fn class(&self) -> &'static ClassInfo {
            Self::class_info()
        }

        fn value_for_key(&self, key: &str) -> Option<Value> {
            match key {
                "name" => Some(Value::from(self.name.as_str())),
                "radius" => Some(Value::from(self.radius)),
                "thickness" => Some(Value::from(self.thickness)),
                _ => None,
            }
        }
    }

    impl JsonSerializing for Disc {
        fn json_key_paths_by_property_key() -> JsonKeyPaths {
            json_key_paths(identity_property_map(Self::class_info()))
        }

        fn from_property_values(values: Dictionary) -> Result<Self, ModelError> {
            let number = |key: &str| {
                values
                    .get(key)
                    .and_then(Value::as_number)
                    .and_then(Number::as_f64)
                    .unwrap_or_default()
            };
            Ok(Disc {
                name: values.get("name").and_then(Value::as_str).unwrap_or_default().to_owned(),
                radius: number("radius"),
                thickness: number("thickness"),
            })
        }
    }

    // -------------------------------------------------------------------------
    // Place

    #[derive(Model)]
    #[model(class_trait = ReflectJsonSerializing)]
    struct Place {
        homepage: Url,
        rating: i64,
        open: bool,
        address: Option<Arc<Address>>,
    }

    impl ModelObject for Place {
        fn class(&self) -> &'static ClassInfo {
            Self::class_info()
        }

        fn value_for_key(&self, key: &str) -> Option<Value> {
            Some(match key {
                "homepage" => Value::from(self.homepage.as_str()),
                "rating" => Value::from(self.rating),
                "open" => Value::from(self.open),
                "address" => self.address.clone().map_or(Value::Null, |a| Value::Model(a)),
                _ => return None,
            })
        }
    }

    impl JsonSerializing for Place {
        fn json_key_paths_by_property_key() -> JsonKeyPaths {
            json_key_paths(identity_property_map(Self::class_info()))
        }

        // Addresses are written as their street.
        fn json_transformer_for_class(class: &'static ClassInfo) -> Option<ValueTransformer> {
            class.is::<Address>().then(|| {
                ValueTransformer::reversible_with(
                    |value| match value {
                        Value::String(street) => Ok(Value::Model(Arc::new(Address {
                            street,
                            city: String::new(),
                        }))),
                        other => Ok(other),
                    },
                    |value| {
                        let street = value.as_model::<Address>().map(|a| Value::from(a.street.as_str()));
                        Ok(street.unwrap_or(value))
                    },
                )
            })
        }

        fn json_transformer_for_encoding(encoding: &str) -> Option<ValueTransformer> {
            (encoding == "q").then(|| value_mapping([("low", 1), ("high", 5)]))
        }

        fn from_property_values(values: Dictionary) -> Result<Self, ModelError> {
            let homepage = values
                .get("homepage")
                .and_then(Value::as_str)
                .ok_or_else(|| ModelError::new("`homepage` is required"))?;
            Ok(Place {
                homepage: Url::parse(homepage).map_err(ModelError::new)?,
                rating: values
                    .get("rating")
                    .and_then(Value::as_number)
                    .and_then(Number::as_i64)
                    .unwrap_or_default(),
                open: values.get("open").and_then(Value::as_bool).unwrap_or(false),
                address: values.get("address").cloned().and_then(Value::into_model::<Address>),
            })
        }
    }

    // -------------------------------------------------------------------------
    // Misconfigured

    #[derive(Model)]
    #[model(class_trait = ReflectJsonSerializing)]
    #[allow(dead_code, reason = "only the class is used")]
    struct Badge {
        #[model(readonly, dynamic)]
        title: String,
    }

    impl ModelObject for Badge {
        fn class(&self) -> &'static ClassInfo {
            Self::class_info()
        }

        fn value_for_key(&self, _key: &str) -> Option<Value> {
            None
        }
    }

    impl JsonSerializing for Badge {
        fn json_key_paths_by_property_key() -> JsonKeyPaths {
            json_key_paths([("title", "title")])
        }

        fn from_property_values(_values: Dictionary) -> Result<Self, ModelError> {
            Ok(Badge { title: String::new() })
        }
    }

    #[derive(Model)]
    #[allow(dead_code, reason = "only the class is used")]
    struct Plain {
        value: i32,
    }

    #[derive(Model)]
    struct Unregistered;

    #[derive(Model)]
    #[model(class_trait = ReflectJsonSerializing)]
    struct Ping;

    #[derive(Model)]
    #[model(class_trait = ReflectJsonSerializing)]
    struct Pong;

    impl ModelObject for Ping {
        fn class(&self) -> &'static ClassInfo {
            Self::class_info()
        }

        fn value_for_key(&self, _key: &str) -> Option<Value> {
            None
        }
    }

    impl JsonSerializing for Ping {
        fn json_key_paths_by_property_key() -> JsonKeyPaths {
            json_key_paths(identity_property_map(Self::class_info()))
        }

        fn class_for_parsing_json_dictionary(_dictionary: &Dictionary) -> Option<&'static ClassInfo> {
            Some(Pong::class_info())
        }

        fn from_property_values(_values: Dictionary) -> Result<Self, ModelError> {
            Ok(Ping)
        }
    }

    impl ModelObject for Pong {
        fn class(&self) -> &'static ClassInfo {
            Self::class_info()
        }

        fn value_for_key(&self, _key: &str) -> Option<Value> {
            None
        }
    }

    impl JsonSerializing for Pong {
        fn json_key_paths_by_property_key() -> JsonKeyPaths {
            json_key_paths(identity_property_map(Self::class_info()))
        }

        fn class_for_parsing_json_dictionary(_dictionary: &Dictionary) -> Option<&'static ClassInfo> {
            Some(Ping::class_info())
        }

        fn from_property_values(_values: Dictionary) -> Result<Self, ModelError> {
            Ok(Pong)
        }
    }

    // -------------------------------------------------------------------------
    // Tests

    fn adapter() -> JsonAdapter {
        let adapter = JsonAdapter::new();
        {
            let mut registry = adapter.registry().write();
            registry.register::<Address>();
            registry.register::<User>();
            registry.register::<Circle>();
            registry.register::<Disc>();
            registry.register::<Place>();
            registry.register::<Ping>();
            registry.register::<Pong>();
            registry.register::<Badge>();
            registry.register::<Plain>();
        }
        adapter
    }

    fn dictionary(json: serde_json::Value) -> Dictionary {
        Value::from(json).into_dictionary().unwrap()
    }

    fn user_json() -> serde_json::Value {
        json!({
            "id": 7,
            "user_name": "ada",
            "flags": { "admin": 1 },
            "address": { "street": "1 Main St", "city": "London" },
            "history": [
                { "street": "2 Side St", "city": "Paris" },
                { "street": "", "city": "Rome" },
            ],
            "geo": { "lat": 1.5, "lng": 2.5 },
        })
    }

    #[test]
    fn round_trip() {
        let adapter = adapter();
        let model = adapter
            .model_from_dictionary(User::class_info(), &dictionary(user_json()))
            .unwrap();

        let user = Value::Model(model.clone()).into_model::<User>().unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.user_name, "ada");
        assert!(user.admin);
        assert_eq!(user.address.as_ref().map(|a| a.city.as_str()), Some("London"));
        assert_eq!(user.history.len(), 2);
        assert_eq!(user.coordinates.get("geo.lng"), Some(&2.5));

        let back = adapter.dictionary_from_model(&*model).unwrap();
        let mut expected = user_json();
        expected["flags"]["admin"] = json!(true);
        assert_eq!(Value::from(back).to_json().unwrap(), expected);
    }

    #[test]
    fn missing_paths_are_left_out() {
        let adapter = adapter();
        let model = adapter
            .model_from_dictionary(User::class_info(), &dictionary(json!({ "id": 1 })))
            .unwrap();
        let user = Value::Model(model.clone()).into_model::<User>().unwrap();
        assert!(user.address.is_none());
        assert!(user.coordinates.is_empty());

        let back = adapter.dictionary_from_model(&*model).unwrap();
        assert_eq!(back["address"], Value::Null);
        assert_eq!(back["history"], Value::Array(Vec::new()));
        assert!(!back.contains_key("geo"));
    }

    #[test]
    fn nested_failures_pass_through() {
        let adapter = adapter();
        let json = dictionary(json!({ "id": 1, "address": { "street": "nowhere" } }));
        let error = adapter.model_from_dictionary(User::class_info(), &json).unwrap_err();
        assert!(matches!(&error, AdapterError::Model(_)));
        assert_eq!(error.to_string(), "`city` is required");

        let json = dictionary(json!({ "id": 1, "history": [{ "city": "Oslo" }, {}] }));
        assert!(matches!(
            adapter.model_from_dictionary(User::class_info(), &json),
            Err(AdapterError::Model(_))
        ));
    }

    #[test]
    fn transform_failures_name_the_property() {
        let adapter = adapter();
        let json = dictionary(json!({ "id": 1, "flags": { "admin": "yes" } }));
        match adapter.model_from_dictionary(User::class_info(), &json) {
            Err(AdapterError::Transform { key, source }) => {
                assert_eq!(key, "admin");
                assert!(matches!(*source, TransformError::UnexpectedInput { found: "string", .. }));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn key_paths_must_cross_dictionaries() {
        let adapter = adapter();
        let json = dictionary(json!({ "id": 1, "flags": 3 }));
        assert!(matches!(
            adapter.model_from_dictionary(User::class_info(), &json),
            Err(AdapterError::InvalidJsonDictionary { key_path }) if key_path == "flags.admin"
        ));
    }

    #[test]
    fn mapping_must_name_property_keys() {
        let adapter = adapter();
        assert!(matches!(
            adapter.model_from_dictionary(Badge::class_info(), &Dictionary::new()),
            Err(AdapterError::InvalidJsonMapping { key, .. }) if key == "title"
        ));
    }

    #[test]
    fn capability_is_required() {
        let adapter = adapter();
        assert!(!adapter.supports_class(Plain::class_info()));
        assert!(adapter.supports_class(User::class_info()));
        for class in [Plain::class_info(), Unregistered::class_info()] {
            assert!(matches!(
                adapter.model_from_dictionary(class, &Dictionary::new()),
                Err(AdapterError::NotSerializing(path)) if path == class.path()
            ));
        }
    }

    #[test]
    fn class_for_parsing_redirects() {
        let adapter = adapter();
        let json = dictionary(json!({ "name": "wheel", "radius": 2.0 }));
        let model = adapter.model_from_dictionary(Shape::class_info(), &json).unwrap();
        assert_eq!(model.class(), Circle::class_info());
        assert_eq!(Value::Model(model).as_model::<Circle>().map(|c| c.radius), Some(2.0));

        assert!(matches!(
            adapter.model_from_dictionary(Shape::class_info(), &dictionary(json!({ "name": "blob" }))),
            Err(AdapterError::NoClassFound(_))
        ));
    }

    #[test]
    fn class_for_parsing_follows_every_redirect() {
        let adapter = adapter();
        let json = dictionary(json!({ "name": "coin", "radius": 1.0, "thickness": 0.25 }));
        for class in [Shape::class_info(), Circle::class_info(), Disc::class_info()] {
            let model = adapter.model_from_dictionary(class, &json).unwrap();
            assert_eq!(model.class(), Disc::class_info());
            assert_eq!(Value::Model(model).as_model::<Disc>().map(|d| d.thickness), Some(0.25));
        }

        let json = dictionary(json!({ "name": "wheel", "radius": 2.0 }));
        let model = adapter.model_from_dictionary(Circle::class_info(), &json).unwrap();
        assert_eq!(model.class(), Circle::class_info());
    }

    #[test]
    fn class_for_parsing_cycles_fail() {
        let adapter = adapter();
        assert!(matches!(
            adapter.model_from_dictionary(Ping::class_info(), &Dictionary::new()),
            Err(AdapterError::CyclicClassRedirect(path)) if path == Ping::class_info().path()
        ));
        assert!(matches!(
            adapter.model_from_dictionary(Pong::class_info(), &Dictionary::new()),
            Err(AdapterError::CyclicClassRedirect(path)) if path == Pong::class_info().path()
        ));
    }

    #[test]
    fn default_transformers_by_class_and_encoding() {
        let adapter = adapter();
        let json = dictionary(json!({
            "homepage": "HTTPS://Example.com",
            "rating": "high",
            "open": 1,
            "address": "1 Main St",
        }));
        let model = adapter.model_from_dictionary(Place::class_info(), &json).unwrap();

        let place = Value::Model(model.clone()).into_model::<Place>().unwrap();
        assert_eq!(place.homepage.as_str(), "https://example.com/");
        assert_eq!(place.rating, 5);
        assert!(place.open);
        assert_eq!(place.address.as_ref().map(|a| a.street.as_str()), Some("1 Main St"));

        let back = adapter.dictionary_from_model(&*model).unwrap();
        assert_eq!(
            Value::from(back).to_json().unwrap(),
            json!({
                "homepage": "https://example.com/",
                "rating": "high",
                "open": true,
                "address": "1 Main St",
            })
        );
    }

    #[test]
    fn urls_are_checked() {
        let adapter = adapter();
        let json = dictionary(json!({ "homepage": "example.com" }));
        match adapter.model_from_dictionary(Place::class_info(), &json) {
            Err(AdapterError::Transform { key, source }) => {
                assert_eq!(key, "homepage");
                assert!(matches!(*source, TransformError::UnexpectedInput { expected: "URL", .. }));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn arrays_are_all_or_nothing() {
        let adapter = adapter();
        let items = [
            Value::from(json!({ "street": "a", "city": "b" })),
            Value::from(json!({ "street": "c", "city": "d" })),
        ];
        let models = adapter.models_from_array(Address::class_info(), &items).unwrap();
        assert_eq!(models.len(), 2);
        assert_eq!(adapter.array_from_models(&models).unwrap(), items);

        let mixed = [items[0].clone(), Value::from(3)];
        assert!(matches!(
            adapter.models_from_array(Address::class_info(), &mixed),
            Err(AdapterError::UnexpectedValue { key, found: "number", .. }) if key == "[1]"
        ));
    }
}
