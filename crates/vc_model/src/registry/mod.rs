//! Runtime registry of model classes.
//!
//! ## Menu
//!
//! - [`ClassTrait`]: A capability of a class, e.g. JSON serialization.
//! - [`FromClass`]: Creates a `ClassTrait` for a class.
//! - [`ClassMeta`]: A [`ClassInfo`] and its `ClassTrait` table.
//! - [`GetClassMeta`]: Creates the `ClassMeta` of a class.
//! - [`ClassRegistry`]: Stores `ClassMeta`s and resolves property attributes.
//! - [`ClassRegistryArc`]: A shared `ClassRegistry` behind a `RwLock`.
//! - [`global`]: The process-wide `ClassRegistryArc`.
//!
//! ## auto_register
//!
//! With the `auto_register` feature, classes annotated with
//! `#[model(auto_register)]` are collected through the [`inventory`] crate
//! and registered by [`ClassRegistry::auto_register`]. On platforms
//! `inventory` does not support, nothing is collected and `auto_register`
//! returns `false`.
//!
//! [`ClassInfo`]: crate::class::ClassInfo
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod class_meta;
mod class_registry;
mod class_trait;
mod global;

// -----------------------------------------------------------------------------
// Exports

pub use class_meta::{ClassMeta, GetClassMeta};
pub use class_registry::{ClassRegistry, ClassRegistryArc, DeclaredProperties};
pub use class_trait::{ClassTrait, FromClass};
pub use global::global;
