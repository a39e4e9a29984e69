use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;

use crate::derive_data::ModelStruct;

/// Generates `GetClassMeta`, inserting the listed class traits.
pub(crate) fn impl_trait_get_class_meta(model: &ModelStruct) -> TokenStream {
    let registry_ = crate::path::registry_(&model.vc_model_path);
    let ident = model.ident;

    let class_traits = &model.attrs.class_traits;
    let class_meta = if class_traits.is_empty() {
        quote! { #registry_::ClassMeta::of::<Self>() }
    } else {
        let inserts = class_traits.iter().map(|class_trait| {
            quote_spanned! { class_trait.span() =>
                __meta.insert_trait::<#class_trait>(#registry_::FromClass::<Self>::from_class());
            }
        });
        quote! {
            let mut __meta = #registry_::ClassMeta::of::<Self>();
            #(#inserts)*
            __meta
        }
    };

    let register_dependencies = match &model.attrs.extends {
        Some(base) => quote! {
            fn register_dependencies(__registry: &mut #registry_::ClassRegistry) {
                __registry.register::<#base>();
            }
        },
        None => crate::utils::empty(),
    };

    quote! {
        impl #registry_::GetClassMeta for #ident {
            fn get_class_meta() -> #registry_::ClassMeta {
                #class_meta
            }

            #register_dependencies
        }
    }
}
