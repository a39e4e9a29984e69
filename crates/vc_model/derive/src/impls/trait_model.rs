use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;

use crate::derive_data::{ModelField, ModelStruct};

/// Generates `Model` and `TypeEncoding` for the struct.
pub(crate) fn impl_trait_model(model: &ModelStruct) -> TokenStream {
    let vc_model_path = &model.vc_model_path;
    let class_ = crate::path::class_(vc_model_path);
    let cow_ = crate::path::cow_(vc_model_path);

    let ident = model.ident;
    let ident_str = ident.to_string();
    let class_name = model.class_name();
    let type_encoding = format!("@\"{}\"", class_name.value());

    let with_superclass = match &model.attrs.extends {
        Some(base) => quote_spanned! { base.span() =>
            .with_superclass::<#base>()
        },
        None => crate::utils::empty(),
    };

    let property_count = model.fields.len();
    let property_decls = model
        .fields
        .iter()
        .map(|field| property_decl_expression(&class_, field));

    quote! {
        impl #class_::Model for #ident {
            fn class_info() -> &'static #class_::ClassInfo {
                static CELL: #class_::ClassInfoCell = #class_::ClassInfoCell::new();
                CELL.get_or_init(|| {
                    let __properties: [#class_::PropertyDecl; #property_count] = [
                        #(#property_decls),*
                    ];
                    #class_::ClassInfo::new::<Self>(
                        #class_name,
                        ::core::concat!(::core::module_path!(), "::", #ident_str),
                    )
                    #with_superclass
                    .with_properties(__properties)
                })
            }
        }

        impl #class_::TypeEncoding for #ident {
            #[inline]
            fn type_encoding() -> #cow_<'static, str> {
                #cow_::Borrowed(#type_encoding)
            }
        }
    }
}

/// `PropertyDecl::builder("name").of_type::<T>()...build()`
fn property_decl_expression(class_: &TokenStream, field: &ModelField) -> TokenStream {
    let name = &field.name;
    let ty = field.ty;
    let attrs = &field.attrs;

    let type_encoding = match &attrs.encoding {
        Some(encoding) => quote! { .type_encoding(#encoding) },
        None => quote_spanned! { ty.span() => .of_type::<#ty>() },
    };

    let mut flags = Vec::new();
    if attrs.readonly {
        flags.push(quote!(.readonly()));
    }
    if attrs.copy {
        flags.push(quote!(.copy()));
    }
    if attrs.retain {
        flags.push(quote!(.retain()));
    }
    if attrs.weak || field.is_weak_type {
        flags.push(quote!(.weak()));
    }
    if !attrs.atomic {
        flags.push(quote!(.nonatomic()));
    }
    if attrs.dynamic {
        flags.push(quote!(.dynamic()));
    }
    if let Some(getter) = &attrs.getter {
        flags.push(quote!(.getter(#getter)));
    }
    if let Some(setter) = &attrs.setter {
        flags.push(quote!(.setter(#setter)));
    }

    let ivar = field.ivar();

    quote! {
        #class_::PropertyDecl::builder(#name)
            #type_encoding
            #(#flags)*
            .ivar(#ivar)
            .build()
    }
}
