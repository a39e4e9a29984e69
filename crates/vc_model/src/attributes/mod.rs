//! Resolved property metadata.
//!
//! A [`PropertyDecl`](crate::class::PropertyDecl) carries a raw attribute
//! string. [`PropertyAttributes::resolve`] parses it and derives:
//!
//! - the [`MemoryPolicy`], read-only properties are always `Assign`;
//! - the getter and setter names (`name` and `setName:` by default);
//! - the backing storage, absent for dynamic properties;
//! - the registered class of a `@"Name"` value type.
//!
//! Malformed strings produce a [`DeclError`].

// -----------------------------------------------------------------------------
// Modules

mod error;
mod memory_policy;
mod parser;
mod property_attributes;

// -----------------------------------------------------------------------------
// Exports

pub use error::DeclError;
pub use memory_policy::MemoryPolicy;
pub use property_attributes::PropertyAttributes;
