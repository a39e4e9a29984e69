//! Paths used by the generated code.
//!
//! Kept in one place so that moving an item in `vc_model` only needs a
//! change here.

use proc_macro2::TokenStream;
use quote::quote;

/// Returns the path of `vc_model` as seen by the invoking crate.
///
/// `::vc_model` for direct dependents, `::vc_mapper::model` for crates
/// depending on the facade. Reads the invoking crate's Cargo.toml, so it
/// should be called once per macro invocation.
pub(crate) fn vc_model() -> syn::Path {
    vc_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("vc_model"))
}

#[inline(always)]
pub(crate) fn class_(vc_model_path: &syn::Path) -> TokenStream {
    quote! { #vc_model_path::class }
}

#[inline(always)]
pub(crate) fn registry_(vc_model_path: &syn::Path) -> TokenStream {
    quote! { #vc_model_path::registry }
}

#[inline(always)]
pub(crate) fn cow_(vc_model_path: &syn::Path) -> TokenStream {
    quote! { #vc_model_path::__macro_exports::Cow }
}

#[cfg(feature = "auto_register")]
#[inline(always)]
pub(crate) fn auto_register_(vc_model_path: &syn::Path) -> TokenStream {
    quote! { #vc_model_path::__macro_exports::auto_register }
}
