use proc_macro2::Span;
use syn::punctuated::Punctuated;
use syn::{Attribute, LitStr, Path, Token, Type, parenthesized};

use crate::MODEL_ATTRIBUTE_NAME;

/// How field names become property names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenameRule {
    /// `first_name` stays `first_name`.
    SnakeCase,
    /// `first_name` becomes `firstName`.
    CamelCase,
    /// `first_name` becomes `FirstName`.
    PascalCase,
}

impl RenameRule {
    fn parse(lit: &LitStr) -> syn::Result<Self> {
        match lit.value().as_str() {
            "snake_case" => Ok(Self::SnakeCase),
            "camelCase" => Ok(Self::CamelCase),
            "PascalCase" => Ok(Self::PascalCase),
            other => Err(syn::Error::new(
                lit.span(),
                format!(
                    "unknown rename rule `{other}`, expected `snake_case`, `camelCase` or `PascalCase`"
                ),
            )),
        }
    }

    pub fn apply(self, ident: &str) -> String {
        match self {
            Self::SnakeCase => ident.to_owned(),
            Self::CamelCase => crate::utils::to_camel_case(ident),
            Self::PascalCase => crate::utils::to_pascal_case(ident),
        }
    }
}

/// Attributes on the type: `#[model(...)]`.
#[derive(Default)]
pub(crate) struct TypeAttributes {
    /// `extends = Base`
    pub extends: Option<Type>,
    /// `name = "User"`
    pub name: Option<LitStr>,
    /// `rename_all = "camelCase"`
    pub rename_all: Option<RenameRule>,
    /// `auto_register`
    pub auto_register: Option<Span>,
    /// `class_trait = ReflectFoo` or `class_trait = (ReflectFoo, ReflectBar)`
    pub class_traits: Vec<Path>,
    /// `crate_path = ::my_crate::model`
    pub crate_path: Option<Path>,
}

impl TypeAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(MODEL_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("extends") {
                    if out.extends.is_some() {
                        return Err(meta.error("duplicate `extends`"));
                    }
                    out.extends = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("name") {
                    out.name = Some(meta.value()?.parse()?);
                } else if meta.path.is_ident("rename_all") {
                    let lit: LitStr = meta.value()?.parse()?;
                    out.rename_all = Some(RenameRule::parse(&lit)?);
                } else if meta.path.is_ident("auto_register") {
                    out.auto_register = Some(meta.path.require_ident()?.span());
                } else if meta.path.is_ident("class_trait") {
                    let input = meta.value()?;
                    if input.peek(syn::token::Paren) {
                        let content;
                        parenthesized!(content in input);
                        let paths = Punctuated::<Path, Token![,]>::parse_terminated(&content)?;
                        out.class_traits.extend(paths);
                    } else {
                        out.class_traits.push(input.parse()?);
                    }
                } else if meta.path.is_ident("crate_path") {
                    out.crate_path = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error(
                        "unknown model attribute, expected one of `extends`, `name`, \
                         `rename_all`, `auto_register`, `class_trait`, `crate_path`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(out)
    }
}
