use proc_macro2::TokenStream;

/// An empty token stream.
#[inline(always)]
pub(crate) fn empty() -> TokenStream {
    TokenStream::new()
}

/// `first_name` to `firstName`.
pub(crate) fn to_camel_case(ident: &str) -> String {
    let mut out = String::with_capacity(ident.len());
    let mut upper_next = false;
    for (index, ch) in ident.trim_start_matches('_').chars().enumerate() {
        if ch == '_' {
            upper_next = index > 0;
        } else if upper_next {
            out.extend(ch.to_uppercase());
            upper_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

/// `first_name` to `FirstName`.
pub(crate) fn to_pascal_case(ident: &str) -> String {
    let camel = to_camel_case(ident);
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => camel,
    }
}
