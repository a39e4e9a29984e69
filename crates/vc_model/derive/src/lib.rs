//! See following macros:
//!
//! - [`Model`]
//! - [`impl_auto_register`]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static MODEL_ATTRIBUTE_NAME: &str = "model";

// -----------------------------------------------------------------------------
// Modules

mod derive_data;
mod impls;
mod path;
mod utils;

// -----------------------------------------------------------------------------
// Macros

/// # Model Derivation
///
/// `#[derive(Model)]` implements the following traits:
///
/// - `Model`: the static `ClassInfo` of the type.
/// - `TypeEncoding`: `@"Name"`, so other models can hold this one.
/// - `GetClassMeta`: registration into a `ClassRegistry`.
///
/// Only structs with named fields, or unit structs, without generic
/// parameters are supported. Every field becomes a property unless skipped.
///
/// ## Type Attributes
///
/// ### Superclass
///
/// ```rust, ignore
/// #[derive(Model)]
/// #[model(extends = Base)]
/// struct Derived { /* ... */ }
/// ```
///
/// `Base` must implement `GetClassMeta`. Registering `Derived` also
/// registers `Base`.
///
/// ### Class Name
///
/// The class name defaults to the type ident. It is used to resolve `@"Name"`
/// type encodings, so it should be unique in a registry.
///
/// ```rust, ignore
/// #[derive(Model)]
/// #[model(name = "Account")]
/// struct UserAccount { /* ... */ }
/// ```
///
/// ### Property Names
///
/// Property names default to the field idents. `rename_all` converts them:
/// `"snake_case"` (unchanged), `"camelCase"` or `"PascalCase"`.
///
/// ```rust, ignore
/// #[derive(Model)]
/// #[model(rename_all = "camelCase")]
/// struct User {
///     first_name: String, // `firstName`
/// }
/// ```
///
/// ### Class Traits
///
/// Capabilities inserted into the generated `ClassMeta`, each implementing
/// `FromClass<Self>`:
///
/// ```rust, ignore
/// #[derive(Model)]
/// #[model(class_trait = ReflectJsonSerializing)]
/// struct User { /* ... */ }
///
/// #[derive(Model)]
/// #[model(class_trait = (ReflectJsonSerializing, ReflectOther))]
/// struct Admin { /* ... */ }
/// ```
///
/// ### Auto Registration
///
/// ```rust, ignore
/// #[derive(Model)]
/// #[model(auto_register)]
/// struct User { /* ... */ }
/// ```
///
/// The class is then registered by `ClassRegistry::auto_register`, and is
/// present in the global registry. No effect without the `auto_register`
/// feature.
///
/// ### Crate Path
///
/// The generated code refers to `::vc_model`, or `::vc_mapper::model` when
/// the crate depends on the facade. Override it with:
///
/// ```rust, ignore
/// #[derive(Model)]
/// #[model(crate_path = ::my_reexport::model)]
/// struct User { /* ... */ }
/// ```
///
/// ## Field Attributes
///
/// | attribute | effect |
/// |---|---|
/// | `skip` | not a property |
/// | `rename = "name"` | the property name |
/// | `readonly` | read-only |
/// | `copy` | copied on assignment |
/// | `retain` | shared on assignment |
/// | `weak` | weak reference, implied by `Weak<T>` and `Option<Weak<T>>` |
/// | `atomic` | atomic accessors, the default is non-atomic |
/// | `dynamic` | accessors provided elsewhere, no backing storage |
/// | `getter = "name"` | custom getter name |
/// | `setter = "name:"` | custom setter name |
/// | `encoding = "..."` | explicit type encoding, for types without `TypeEncoding` |
///
/// The backing storage of a property is its field.
///
/// Without `setter`, the property name must be made of ASCII letters,
/// digits and `_`, since the default setter is `set<Name>:`.
///
/// ```rust, ignore
/// #[derive(Model)]
/// struct Node {
///     #[model(readonly)]
///     id: u64,
///     #[model(copy, rename = "title")]
///     label: String,
///     parent: Option<Weak<Node>>,
///     #[model(encoding = "{Color=CCC}")]
///     color: Color,
///     #[model(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Model, attributes(model))]
pub fn derive_model(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);

    impls::impl_derive_model(&ast).into()
}

/// Adds a class to the automatic registry.
///
/// If the `auto_register` feature is not enabled, this macro does nothing.
///
/// ## Example
///
/// ```ignore
/// impl_auto_register!(foo::User);
/// ```
///
/// Equivalent to `#[model(auto_register)]`, and does not conflict with it.
#[proc_macro]
pub fn impl_auto_register(_input: TokenStream) -> TokenStream {
    #[cfg(not(feature = "auto_register"))]
    return utils::empty().into();

    #[cfg(feature = "auto_register")]
    {
        use quote::quote;

        let type_path = syn::parse_macro_input!(_input as syn::Type);

        let vc_model_path = path::vc_model();
        let auto_register_ = path::auto_register_(&vc_model_path);

        TokenStream::from(quote! {
            const _: () = {
                #auto_register_::inventory::submit!{
                    #auto_register_::__AutoRegisterFunc(
                        <#type_path as #auto_register_::__RegisterType>::__register
                    )
                }
            };
        })
    }
}
