use alloc::string::ToString;

use crate::attributes::DeclError;
use crate::selector::is_valid_selector;

/// The attributes of a raw declaration, borrowed from the attribute string.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub(crate) struct RawAttributes<'a> {
    pub type_encoding: &'a str,
    pub readonly: bool,
    pub copy: bool,
    pub retain: bool,
    pub weak: bool,
    pub nonatomic: bool,
    pub dynamic: bool,
    pub getter: Option<&'a str>,
    pub setter: Option<&'a str>,
    pub ivar: Option<&'a str>,
}

/// Parses `T<type>[,<attr>]*`.
///
/// The type encoding may itself contain commas inside quotes or brackets,
/// e.g. `T{Pair="a"i,"b"i},N`.
pub(crate) fn parse_attributes(raw: &str) -> Result<RawAttributes<'_>, DeclError> {
    let Some(rest) = raw.strip_prefix('T') else {
        return Err(DeclError::MissingTypeEncoding(raw.to_string()));
    };

    let end = type_encoding_end(rest)?;
    let type_encoding = &rest[..end];
    if type_encoding.is_empty() {
        return Err(DeclError::EmptyTypeEncoding);
    }

    let mut attrs = RawAttributes {
        type_encoding,
        ..RawAttributes::default()
    };

    let tail = &rest[end..];
    let Some(tail) = tail.strip_prefix(',') else {
        // `end` stops at a top-level comma or at the end of input.
        return Ok(attrs);
    };

    for (index, attr) in tail.split(',').enumerate() {
        let mut chars = attr.chars();
        let Some(code) = chars.next() else {
            return Err(DeclError::EmptyAttribute(index + 1));
        };
        let value = chars.as_str();

        match code {
            'R' | 'C' | '&' | 'W' | 'N' | 'D' if !value.is_empty() => {
                return Err(DeclError::UnknownAttribute(attr.to_string()));
            }
            'R' => attrs.readonly = true,
            'C' => attrs.copy = true,
            '&' => attrs.retain = true,
            'W' => attrs.weak = true,
            'N' => attrs.nonatomic = true,
            'D' => attrs.dynamic = true,
            'G' => attrs.getter = Some(accessor(code, value)?),
            'S' => attrs.setter = Some(accessor(code, value)?),
            'V' => attrs.ivar = Some(named(code, value)?),
            // Legacy markers (garbage collection and old-style type encoding).
            'P' | 't' => {}
            _ => return Err(DeclError::UnknownAttribute(attr.to_string())),
        }
    }

    Ok(attrs)
}

fn named(code: char, value: &str) -> Result<&str, DeclError> {
    if value.is_empty() {
        Err(DeclError::MissingName(code))
    } else {
        Ok(value)
    }
}

fn accessor(code: char, value: &str) -> Result<&str, DeclError> {
    let value = named(code, value)?;
    if is_valid_selector(value) {
        Ok(value)
    } else {
        Err(DeclError::InvalidAccessor(value.to_string()))
    }
}

/// Returns the byte offset of the first top-level comma, or the input length.
fn type_encoding_end(encoding: &str) -> Result<usize, DeclError> {
    let mut depth = 0_usize;
    let mut quoted = false;

    for (offset, byte) in encoding.bytes().enumerate() {
        match byte {
            b'"' => quoted = !quoted,
            _ if quoted => {}
            b'{' | b'[' | b'(' => depth += 1,
            b'}' | b']' | b')' => {
                depth = depth
                    .checked_sub(1)
                    .ok_or_else(|| DeclError::UnbalancedTypeEncoding(encoding.to_string()))?;
            }
            b',' if depth == 0 => return Ok(offset),
            _ => {}
        }
    }

    if quoted || depth != 0 {
        Err(DeclError::UnbalancedTypeEncoding(encoding.to_string()))
    } else {
        Ok(encoding.len())
    }
}

/// Extracts `Name` from `@"Name"` or `@"Name<Protocol>"`.
///
/// Returns `None` for untyped references, value types and empty names.
pub(crate) fn referenced_class_name(type_encoding: &str) -> Option<&str> {
    let inner = type_encoding.strip_prefix("@\"")?.strip_suffix('"')?;
    let name = match inner.find('<') {
        Some(index) => &inner[..index],
        None => inner,
    };
    (!name.is_empty()).then_some(name)
}

#[cfg(test)]
mod tests {
    use super::{RawAttributes, parse_attributes, referenced_class_name};
    use crate::attributes::DeclError;

    #[test]
    fn parses_flags_and_names() {
        let attrs = parse_attributes(r#"T@"String",R,C,N,GfullName,SsetFullName:,VfullName"#).unwrap();
        assert_eq!(
            attrs,
            RawAttributes {
                type_encoding: r#"@"String""#,
                readonly: true,
                copy: true,
                nonatomic: true,
                getter: Some("fullName"),
                setter: Some("setFullName:"),
                ivar: Some("fullName"),
                ..RawAttributes::default()
            }
        );

        let attrs = parse_attributes("Tq").unwrap();
        assert_eq!(attrs.type_encoding, "q");
        assert!(!attrs.readonly && !attrs.nonatomic && attrs.ivar.is_none());

        let attrs = parse_attributes("T@,&,W,D,P,t@").unwrap();
        assert!(attrs.retain && attrs.weak && attrs.dynamic);
    }

    #[test]
    fn type_encoding_with_nested_commas() {
        let attrs = parse_attributes(r#"T{Pair="a,b"i,[2i]},N,V_pair"#).unwrap();
        assert_eq!(attrs.type_encoding, r#"{Pair="a,b"i,[2i]}"#);
        assert_eq!(attrs.ivar, Some("_pair"));
    }

    #[test]
    fn rejects_malformed() {
        assert!(matches!(parse_attributes("q,N"), Err(DeclError::MissingTypeEncoding(_))));
        assert_eq!(parse_attributes("T,N"), Err(DeclError::EmptyTypeEncoding));
        assert!(matches!(parse_attributes("T{Pair,N"), Err(DeclError::UnbalancedTypeEncoding(_))));
        assert!(matches!(parse_attributes("Ti}"), Err(DeclError::UnbalancedTypeEncoding(_))));
        assert_eq!(parse_attributes("Ti,N,"), Err(DeclError::EmptyAttribute(2)));
        assert!(matches!(parse_attributes("Ti,X"), Err(DeclError::UnknownAttribute(_))));
        assert!(matches!(parse_attributes("Ti,Nx"), Err(DeclError::UnknownAttribute(_))));
        assert_eq!(parse_attributes("Ti,G"), Err(DeclError::MissingName('G')));
        assert!(matches!(parse_attributes("Ti,Gget-value"), Err(DeclError::InvalidAccessor(_))));
    }

    #[test]
    fn class_names() {
        assert_eq!(referenced_class_name(r#"@"User""#), Some("User"));
        assert_eq!(referenced_class_name(r#"@"User<Copying>""#), Some("User"));
        assert_eq!(referenced_class_name("@"), None);
        assert_eq!(referenced_class_name(r#"@"""#), None);
        assert_eq!(referenced_class_name("{Point=dd}"), None);
        assert_eq!(referenced_class_name("q"), None);
    }
}
