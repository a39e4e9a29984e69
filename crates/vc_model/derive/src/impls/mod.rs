//! Code generation.

// -----------------------------------------------------------------------------
// Modules

mod auto_register;
mod trait_get_class_meta;
mod trait_model;

// -----------------------------------------------------------------------------
// Internal API

use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

use crate::derive_data::ModelStruct;

pub(crate) fn impl_derive_model(ast: &DeriveInput) -> TokenStream {
    let model = match ModelStruct::from_derive_input(ast) {
        Ok(model) => model,
        Err(err) => return err.into_compile_error(),
    };

    let model_impl = trait_model::impl_trait_model(&model);
    let get_class_meta_impl = trait_get_class_meta::impl_trait_get_class_meta(&model);
    let auto_register_impl = auto_register::get_auto_register_impl(&model);

    quote! {
        const _: () = {
            #model_impl
            #get_class_meta_impl
            #auto_register_impl
        };
    }
}
