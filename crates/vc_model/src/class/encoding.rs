use alloc::borrow::Cow;
use alloc::boxed::Box;
use alloc::collections::{BTreeMap, BTreeSet};
use alloc::string::String;
use alloc::sync::{Arc, Weak};
use alloc::vec::Vec;

use hashbrown::{HashMap, HashSet};

// -----------------------------------------------------------------------------
// TypeEncoding

/// The type descriptor of a property value type.
///
/// | encoding | type |
/// |---|---|
/// | `B` | `bool` |
/// | `c` `s` `i` `q` | `i8` `i16` `i32` `i64` (and `isize`) |
/// | `C` `S` `I` `Q` | `u8` `u16` `u32` `u64` (and `usize`) |
/// | `f` `d` | `f32` `f64` |
/// | `v` | `()` |
/// | `*` | `&'static str` |
/// | `@"Name"` | a reference to the class or collection `Name` |
/// | `@"Url"` | `url::Url`, with the `url` feature |
/// | `@` | an untyped reference |
/// | `{Name}` | an inline value type |
///
/// Types that only wrap another value, such as `Option<T>`, `Box<T>`,
/// `Arc<T>` and `Weak<T>`, use the encoding of `T`.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use vc_model::{class::TypeEncoding, derive::Model};
///
/// #[derive(Model)]
/// struct Address {
///     street: String,
/// }
///
/// assert_eq!(bool::type_encoding(), "B");
/// assert_eq!(String::type_encoding(), r#"@"String""#);
/// assert_eq!(<Option<Arc<Address>>>::type_encoding(), r#"@"Address""#);
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` has no type encoding",
    note = "use `#[model(encoding = \"...\")]` on the field, or `#[model(skip)]`"
)]
pub trait TypeEncoding {
    /// Returns the type descriptor.
    fn type_encoding() -> Cow<'static, str>;
}

macro_rules! impl_encoding {
    ($($ty:ty => $enc:literal),* $(,)?) => {
        $(
            impl TypeEncoding for $ty {
                #[inline]
                fn type_encoding() -> Cow<'static, str> {
                    Cow::Borrowed($enc)
                }
            }
        )*
    };
}

impl_encoding!(
    bool => "B",
    i8 => "c",
    i16 => "s",
    i32 => "i",
    i64 => "q",
    isize => "q",
    u8 => "C",
    u16 => "S",
    u32 => "I",
    u64 => "Q",
    usize => "Q",
    f32 => "f",
    f64 => "d",
    () => "v",
    &'static str => "*",
    String => "@\"String\"",
    Cow<'static, str> => "@\"String\"",
);

macro_rules! impl_generic_encoding {
    ($enc:literal: $($ty:ident<$($param:ident),*>),* $(,)?) => {
        $(
            impl<$($param),*> TypeEncoding for $ty<$($param),*> {
                #[inline]
                fn type_encoding() -> Cow<'static, str> {
                    Cow::Borrowed($enc)
                }
            }
        )*
    };
}

impl_generic_encoding!("@\"Vec\"": Vec<T>);
impl_generic_encoding!("@\"BTreeMap\"": BTreeMap<K, V>);
impl_generic_encoding!("@\"BTreeSet\"": BTreeSet<T>);
impl_generic_encoding!("@\"HashMap\"": HashMap<K, V, S>);
impl_generic_encoding!("@\"HashSet\"": HashSet<T, S>);

impl<K, V, S> TypeEncoding for std::collections::HashMap<K, V, S> {
    #[inline]
    fn type_encoding() -> Cow<'static, str> {
        Cow::Borrowed("@\"HashMap\"")
    }
}

impl<T, S> TypeEncoding for std::collections::HashSet<T, S> {
    #[inline]
    fn type_encoding() -> Cow<'static, str> {
        Cow::Borrowed("@\"HashSet\"")
    }
}

macro_rules! impl_wrapper_encoding {
    ($($ty:ident),* $(,)?) => {
        $(
            impl<T: TypeEncoding + ?Sized> TypeEncoding for $ty<T> {
                #[inline]
                fn type_encoding() -> Cow<'static, str> {
                    T::type_encoding()
                }
            }
        )*
    };
}

impl_wrapper_encoding!(Box, Arc, Weak);

#[cfg(feature = "url")]
impl TypeEncoding for url::Url {
    #[inline]
    fn type_encoding() -> Cow<'static, str> {
        Cow::Borrowed("@\"Url\"")
    }
}

impl<T: TypeEncoding> TypeEncoding for Option<T> {
    #[inline]
    fn type_encoding() -> Cow<'static, str> {
        T::type_encoding()
    }
}
