use syn::{Attribute, LitStr};

use crate::MODEL_ATTRIBUTE_NAME;

/// Attributes on a field: `#[model(...)]`.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    pub skip: bool,
    pub rename: Option<LitStr>,
    pub readonly: bool,
    pub copy: bool,
    pub retain: bool,
    pub weak: bool,
    pub atomic: bool,
    pub dynamic: bool,
    pub getter: Option<LitStr>,
    pub setter: Option<LitStr>,
    pub encoding: Option<LitStr>,
}

impl FieldAttributes {
    pub fn parse_attrs(attrs: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();

        for attr in attrs {
            if !attr.path().is_ident(MODEL_ATTRIBUTE_NAME) {
                continue;
            }

            attr.parse_nested_meta(|meta| {
                let path = &meta.path;
                if path.is_ident("skip") {
                    out.skip = true;
                } else if path.is_ident("readonly") {
                    out.readonly = true;
                } else if path.is_ident("copy") {
                    out.copy = true;
                } else if path.is_ident("retain") {
                    out.retain = true;
                } else if path.is_ident("weak") {
                    out.weak = true;
                } else if path.is_ident("atomic") {
                    out.atomic = true;
                } else if path.is_ident("dynamic") {
                    out.dynamic = true;
                } else if path.is_ident("rename") {
                    out.rename = Some(meta.value()?.parse()?);
                } else if path.is_ident("getter") {
                    out.getter = Some(meta.value()?.parse()?);
                } else if path.is_ident("setter") {
                    out.setter = Some(meta.value()?.parse()?);
                } else if path.is_ident("encoding") {
                    out.encoding = Some(meta.value()?.parse()?);
                } else {
                    return Err(meta.error(
                        "unknown model field attribute, expected one of `skip`, `rename`, \
                         `readonly`, `copy`, `retain`, `weak`, `atomic`, `dynamic`, \
                         `getter`, `setter`, `encoding`",
                    ));
                }
                Ok(())
            })?;
        }

        Ok(out)
    }
}
