use alloc::string::String;
use std::sync::{LazyLock, PoisonError, RwLock};

use vc_model::hash::HashMap;

use crate::transformer::{ValueTransformer, boolean, url};

/// The name of the [`boolean`] transformer in the named table.
pub const BOOLEAN_VALUE_TRANSFORMER_NAME: &str = "VCBooleanValueTransformer";

/// The name of the [`url`] transformer in the named table.
pub const URL_VALUE_TRANSFORMER_NAME: &str = "VCURLValueTransformer";

static NAMED_TRANSFORMERS: LazyLock<RwLock<HashMap<String, ValueTransformer>>> = LazyLock::new(|| {
    let mut table = HashMap::default();
    table.insert(String::from(BOOLEAN_VALUE_TRANSFORMER_NAME), boolean());
    table.insert(String::from(URL_VALUE_TRANSFORMER_NAME), url());
    RwLock::new(table)
});

/// Returns the transformer registered under `name`.
///
/// ```
/// use vc_transform::transformer::{self, BOOLEAN_VALUE_TRANSFORMER_NAME};
/// use vc_transform::value::Value;
///
/// let t = transformer::named(BOOLEAN_VALUE_TRANSFORMER_NAME).unwrap();
/// assert_eq!(t.apply(Value::from(1)).unwrap(), Value::Bool(true));
/// ```
pub fn named(name: &str) -> Option<ValueTransformer> {
    NAMED_TRANSFORMERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(name)
        .cloned()
}

/// Registers `transformer` under `name`, returning the one it replaces.
pub fn set_named(name: impl Into<String>, transformer: ValueTransformer) -> Option<ValueTransformer> {
    let name = name.into();
    log::trace!("register value transformer `{name}`");
    NAMED_TRANSFORMERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(name, transformer)
}
