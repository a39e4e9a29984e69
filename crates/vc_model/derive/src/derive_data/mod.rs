//! Parsing of the derive input.

// -----------------------------------------------------------------------------
// Modules

mod field_attributes;
mod model_struct;
mod type_attributes;

// -----------------------------------------------------------------------------
// Internal API

pub(crate) use field_attributes::FieldAttributes;
pub(crate) use model_struct::{ModelField, ModelStruct};
pub(crate) use type_attributes::TypeAttributes;
