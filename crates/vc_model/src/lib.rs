#![doc = include_str!("../README.md")]
#![cfg_attr(docsrs, feature(doc_cfg))]

// -----------------------------------------------------------------------------
// Extern Self

// The derive macro emits `::vc_model::...` paths, this makes them resolve
// inside the crate itself.
extern crate self as vc_model;

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

pub mod attributes;
pub mod class;
pub mod hash;
pub mod hierarchy;
pub mod mapping;
pub mod registry;
pub mod selector;

// -----------------------------------------------------------------------------
// Top-Level exports

pub mod __macro_exports;

pub use vc_model_derive as derive;
