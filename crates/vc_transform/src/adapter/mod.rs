//! Conversion of whole models to and from JSON dictionaries.
//!
//! ## Menu
//!
//! - [`ModelObject`]: A model instance with readable properties.
//! - [`JsonSerializing`]: How a model maps to JSON, registered as the
//!   [`ReflectJsonSerializing`] class trait.
//! - [`ModelAdapter`]: Converts dictionaries to models and back.
//! - [`JsonAdapter`]: The default adapter.
//! - [`value_for_key_path`], [`set_value_for_key_path`]: Dot-separated key paths.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use vc_model::class::{ClassInfo, Model};
//! use vc_model::derive::Model;
//! use vc_model::registry::{ClassRegistry, ClassRegistryArc};
//! use vc_transform::adapter::{
//!     JsonAdapter, JsonKeyPaths, JsonSerializing, ModelError, ModelObject,
//!     ReflectJsonSerializing, json_key_paths,
//! };
//! use vc_transform::value::{Dictionary, Value};
//!
//! #[derive(Model)]
//! #[model(class_trait = ReflectJsonSerializing)]
//! struct Tag {
//!     label: String,
//!     pinned: bool,
//! }
//!
//! impl ModelObject for Tag {
//!     fn class(&self) -> &'static ClassInfo {
//!         Self::class_info()
//!     }
//!
//!     fn value_for_key(&self, key: &str) -> Option<Value> {
//!         match key {
//!             "label" => Some(Value::from(self.label.as_str())),
//!             "pinned" => Some(Value::from(self.pinned)),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! impl JsonSerializing for Tag {
//!     fn json_key_paths_by_property_key() -> JsonKeyPaths {
//!         json_key_paths([("label", "meta.label"), ("pinned", "pinned")])
//!     }
//!
//!     fn from_property_values(values: Dictionary) -> Result<Self, ModelError> {
//!         let label = values.get("label").and_then(Value::as_str).ok_or_else(|| ModelError::new("no label"))?;
//!         let pinned = values.get("pinned").and_then(Value::as_bool).unwrap_or(false);
//!         Ok(Tag { label: label.to_owned(), pinned })
//!     }
//! }
//!
//! let mut registry = ClassRegistry::empty();
//! registry.register::<Tag>();
//! let adapter = JsonAdapter::with_registry(ClassRegistryArc::new(registry));
//!
//! let json = Value::from(serde_json::json!({ "meta": { "label": "rust" }, "pinned": 1 }));
//! let tag = adapter.model_from_dictionary(Tag::class_info(), json.as_dictionary().unwrap()).unwrap();
//!
//! // `pinned` is a `bool`, so `1` went through the boolean transformer.
//! assert!(Value::Model(tag.clone()).as_model::<Tag>().unwrap().pinned);
//!
//! let back = adapter.dictionary_from_model(&*tag).unwrap();
//! assert_eq!(
//!     Value::from(back).to_json().unwrap(),
//!     serde_json::json!({ "meta": { "label": "rust" }, "pinned": true }),
//! );
//! ```

// -----------------------------------------------------------------------------
// Modules

mod error;
mod json_adapter;
mod key_path;
mod model;
mod serializing;

// -----------------------------------------------------------------------------
// Exports

pub use error::AdapterError;
pub use json_adapter::{JsonAdapter, ModelAdapter};
pub use key_path::{set_value_for_key_path, value_for_key_path};
pub use model::{ModelError, ModelObject, ModelRef, downcast_model};
pub use serializing::{JsonKeyPaths, JsonSerializing, KeyPaths, ReflectJsonSerializing, json_key_paths};

