use std::collections::BTreeMap;

use proc_macro2::Span;
use syn::{Data, DeriveInput, Fields, GenericArgument, Ident, LitStr, PathArguments, Type, spanned::Spanned};

use super::{FieldAttributes, TypeAttributes};

/// A property generated from a struct field.
pub(crate) struct ModelField<'a> {
    pub ident: &'a Ident,
    pub ty: &'a Type,
    pub attrs: FieldAttributes,
    /// The property name, after `rename` and `rename_all`.
    pub name: String,
    /// `Weak<T>` or `Option<Weak<T>>`.
    pub is_weak_type: bool,
}

impl ModelField<'_> {
    /// The backing storage name, the field ident without `r#`.
    pub fn ivar(&self) -> String {
        unraw(self.ident)
    }
}

/// A struct deriving `Model`.
pub(crate) struct ModelStruct<'a> {
    pub ident: &'a Ident,
    pub attrs: TypeAttributes,
    pub fields: Vec<ModelField<'a>>,
    pub vc_model_path: syn::Path,
}

impl<'a> ModelStruct<'a> {
    pub fn from_derive_input(ast: &'a DeriveInput) -> syn::Result<Self> {
        if !ast.generics.params.is_empty() {
            return Err(syn::Error::new(
                ast.generics.span(),
                "`Model` cannot be derived for generic types",
            ));
        }

        let fields = match &ast.data {
            Data::Struct(data) => match &data.fields {
                Fields::Named(named) => Some(&named.named),
                Fields::Unit => None,
                Fields::Unnamed(unnamed) => {
                    return Err(syn::Error::new(
                        unnamed.span(),
                        "`Model` requires named fields, properties are named after them",
                    ));
                }
            },
            Data::Enum(data) => {
                return Err(syn::Error::new(
                    data.enum_token.span,
                    "`Model` can only be derived for structs",
                ));
            }
            Data::Union(data) => {
                return Err(syn::Error::new(
                    data.union_token.span,
                    "`Model` can only be derived for structs",
                ));
            }
        };

        let attrs = TypeAttributes::parse_attrs(&ast.attrs)?;

        let mut model_fields = Vec::new();
        let mut seen: BTreeMap<String, Span> = BTreeMap::new();
        for field in fields.into_iter().flatten() {
            let field_attrs = FieldAttributes::parse_attrs(&field.attrs)?;
            if field_attrs.skip {
                continue;
            }
            // Named fields always have an ident.
            let Some(ident) = field.ident.as_ref() else {
                continue;
            };

            let name = match (&field_attrs.rename, attrs.rename_all) {
                (Some(rename), _) => rename.value(),
                (None, Some(rule)) => rule.apply(&unraw(ident)),
                (None, None) => unraw(ident),
            };

            if name.is_empty() {
                return Err(syn::Error::new(ident.span(), "property name cannot be empty"));
            }
            // The default setter is `set<Name>:`.
            if field_attrs.setter.is_none() && !is_selector_part(&name) {
                let span = field_attrs.rename.as_ref().map_or(ident.span(), LitStr::span);
                return Err(syn::Error::new(
                    span,
                    format!(
                        "property `{name}` cannot form a setter name, use ASCII letters, \
                         digits and `_`, or give `setter = \"...\"`"
                    ),
                ));
            }
            if seen.insert(name.clone(), ident.span()).is_some() {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("property `{name}` is declared twice"),
                ));
            }

            model_fields.push(ModelField {
                ident,
                ty: &field.ty,
                is_weak_type: is_weak_type(&field.ty),
                attrs: field_attrs,
                name,
            });
        }

        let vc_model_path = match &attrs.crate_path {
            Some(path) => path.clone(),
            None => crate::path::vc_model(),
        };

        Ok(Self {
            ident: &ast.ident,
            attrs,
            fields: model_fields,
            vc_model_path,
        })
    }

    /// The class name, `name = "..."` or the type ident.
    pub fn class_name(&self) -> LitStr {
        match &self.attrs.name {
            Some(name) => name.clone(),
            None => LitStr::new(&unraw(self.ident), self.ident.span()),
        }
    }
}

fn unraw(ident: &Ident) -> String {
    let ident = ident.to_string();
    match ident.strip_prefix("r#") {
        Some(stripped) => stripped.to_owned(),
        None => ident,
    }
}

fn is_selector_part(name: &str) -> bool {
    name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b':')
}

/// Matches `Weak<T>` and `Option<Weak<T>>` by their last path segment.
fn is_weak_type(ty: &Type) -> bool {
    let Type::Path(type_path) = ty else {
        return false;
    };
    let Some(last) = type_path.path.segments.last() else {
        return false;
    };

    if last.ident == "Weak" {
        return true;
    }
    if last.ident != "Option" {
        return false;
    }

    match &last.arguments {
        PathArguments::AngleBracketed(args) => args.args.iter().any(|arg| match arg {
            GenericArgument::Type(inner) => is_weak_type(inner),
            _ => false,
        }),
        _ => false,
    }
}
