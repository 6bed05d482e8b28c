use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{Data, DeriveInput, Fields, Ident, Path, parenthesized, parse_macro_input};

use crate::error;

struct UnwrapError {
    error: Path,
    variant: Ident,
}

fn parse_unwrap_error(input: &DeriveInput) -> syn::Result<Option<UnwrapError>> {
    let mut error_path = None::<Path>;
    let mut error_variant = None::<Ident>;

    for attr in &input.attrs {
        if !attr.path().is_ident("unwrap_error") {
            continue;
        }

        attr.parse_nested_meta(|meta| {
            if meta.path.is_ident("error") {
                let content;
                parenthesized!(content in meta.input);
                error_path = Some(content.parse()?);
                Ok(())
            } else if meta.path.is_ident("variant") {
                let content;
                parenthesized!(content in meta.input);
                error_variant = Some(content.parse()?);
                Ok(())
            } else {
                Err(meta.error("expected `error(...)` or `variant(...)`"))
            }
        })?;
    }

    Ok(error_path
        .zip(error_variant)
        .map(|(error, variant)| UnwrapError { error, variant }))
}

/// `BoneMask` -> `bone_mask`, `F32` -> `f32`, `UInt8` -> `uint8`
fn to_snake_case(ident: &Ident) -> String {
    let mut out = String::new();
    let mut prev_lower = false;
    for c in ident.to_string().chars() {
        if c.is_ascii_uppercase() {
            if prev_lower {
                out.push('_');
            }
            out.push(c.to_ascii_lowercase());
            prev_lower = false;
        } else {
            out.push(c);
            prev_lower = c.is_ascii_lowercase();
        }
    }
    out
}

pub(crate) fn value_wrapper(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    let name = &input.ident;

    let Data::Enum(data_enum) = &input.data else {
        return error(&input, "ValueWrapper only works on enums.");
    };

    let unwrap_error = match parse_unwrap_error(&input) {
        Ok(Some(unwrap_error)) => unwrap_error,
        Ok(None) => {
            return error(
                &input,
                "ValueWrapper requires #[unwrap_error(error(..), variant(..))]",
            );
        }
        Err(err) => return err.to_compile_error().into(),
    };
    let error_ty = &unwrap_error.error;
    let error_variant = &unwrap_error.variant;

    let mut name_arms = Vec::new();
    let mut accessors = Vec::new();
    let mut from_impls = Vec::new();

    for variant in &data_enum.variants {
        let ident = &variant.ident;
        let ident_str = ident.to_string();

        match &variant.fields {
            Fields::Unit => {
                name_arms.push(quote! { Self::#ident => #ident_str, });
                continue;
            }
            Fields::Named(_) => {
                name_arms.push(quote! { Self::#ident { .. } => #ident_str, });
                continue;
            }
            Fields::Unnamed(fields) if fields.unnamed.len() != 1 => {
                name_arms.push(quote! { Self::#ident(..) => #ident_str, });
                continue;
            }
            Fields::Unnamed(_) => {
                name_arms.push(quote! { Self::#ident(..) => #ident_str, });
            }
        }

        let Some(field) = variant.fields.iter().next() else {
            continue;
        };
        let ty = &field.ty;
        let snake = to_snake_case(ident);
        let as_fn = format_ident!("as_{}", snake);
        let as_mut_fn = format_ident!("as_{}_mut", snake);
        let into_fn = format_ident!("into_{}", snake);
        let trivial_copy = variant
            .attrs
            .iter()
            .any(|attr| attr.path().is_ident("trivial_copy"));

        let mismatch = quote! {
            #error_ty::#error_variant(
                ::std::string::String::from(#ident_str),
                ::std::string::String::from(other.variant_name()),
            )
        };

        let as_accessor = if trivial_copy {
            quote! {
                pub fn #as_fn(&self) -> ::core::result::Result<#ty, #error_ty> {
                    match self {
                        Self::#ident(value) => Ok(*value),
                        other => Err(#mismatch),
                    }
                }
            }
        } else {
            quote! {
                pub fn #as_fn(&self) -> ::core::result::Result<&#ty, #error_ty> {
                    match self {
                        Self::#ident(value) => Ok(value),
                        other => Err(#mismatch),
                    }
                }
            }
        };

        accessors.push(quote! {
            #as_accessor

            pub fn #as_mut_fn(&mut self) -> ::core::result::Result<&mut #ty, #error_ty> {
                match self {
                    Self::#ident(value) => Ok(value),
                    other => Err(#mismatch),
                }
            }

            pub fn #into_fn(self) -> ::core::result::Result<#ty, #error_ty> {
                match self {
                    Self::#ident(value) => Ok(value),
                    other => Err(#mismatch),
                }
            }
        });

        from_impls.push(quote! {
            impl ::core::convert::From<#ty> for #name {
                fn from(value: #ty) -> Self {
                    Self::#ident(value)
                }
            }
        });
    }

    TokenStream::from(quote! {
        impl #name {
            /// Name of the variant currently stored.
            pub fn variant_name(&self) -> &'static str {
                match self {
                    #(#name_arms)*
                }
            }

            #(#accessors)*
        }

        #(#from_impls)*
    })
}
