mod uuid_wrapper;
mod value_wrapper;

use proc_macro::TokenStream;

use crate::{uuid_wrapper::uuid_wrapper, value_wrapper::value_wrapper};

#[proc_macro_derive(UuidWrapper, attributes(uuid))]
pub fn derive_uuid_wrapper(input: TokenStream) -> TokenStream {
    uuid_wrapper(input)
}

/// Generates typed accessors (`as_*`, `as_*_mut`, `into_*`), `From` impls and
/// `variant_name` for a tagged value enum. Accessing a variant other than the
/// one stored returns the error configured with `#[unwrap_error(...)]`.
#[proc_macro_derive(ValueWrapper, attributes(unwrap_error, trivial_copy))]
pub fn derive_value_wrapper(input: TokenStream) -> TokenStream {
    value_wrapper(input)
}

pub(crate) fn error(tokens: impl quote::ToTokens, msg: impl std::fmt::Display) -> TokenStream {
    syn::Error::new_spanned(tokens, msg)
        .to_compile_error()
        .into()
}
