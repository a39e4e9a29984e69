//! Static class metadata.
//!
//! ## Menu
//!
//! - [`Model`]: A static accessor to a type's [`ClassInfo`], implemented by
//!   [`#[derive(Model)]`](crate::derive::Model).
//! - [`ClassInfo`]: Name, path, superclass link and declared properties of a type.
//! - [`ClassInfoCell`]: Static storage used to implement [`Model`].
//! - [`PropertyDecl`]: A property name with its raw attribute string.
//! - [`PropertyDeclBuilder`]: Assembles a raw attribute string.
//! - [`TypeEncoding`]: The type descriptor of a property value type.
//!
//! Nothing here is parsed. The attribute strings are interpreted lazily by the
//! [`registry`](crate::registry), see [`PropertyAttributes`](crate::attributes::PropertyAttributes).

// -----------------------------------------------------------------------------
// Modules

mod class_info;
mod encoding;
mod property_decl;

// -----------------------------------------------------------------------------
// Exports

pub use class_info::{Ancestors, ClassInfo, ClassInfoCell, Model};
pub use encoding::TypeEncoding;
pub use property_decl::{PropertyDecl, PropertyDeclBuilder};
