//! Derive macro for error enums.
//!
//! Stands in for the `thiserror` crate: every variant's `#[error("...")]`
//! attribute becomes its `Display` rendering, and `std::error::Error` comes
//! along for free.
//!
//! # Usage
//!
//! ```ignore
//! use lightchain_derive::Error;
//!
//! #[derive(Debug, Error)]
//! pub enum DecodeError {
//!     #[error("input ended before the value was complete")]
//!     Truncated,
//!
//!     #[error("block of {size} bytes exceeds the {limit} byte limit")]
//!     Oversized { size: usize, limit: usize },
//!
//!     #[error("cannot parse {0}")]
//!     Unparseable(String),
//! }
//! ```
//!
//! Struct-variant messages interpolate `{field_name}` through the format
//! machinery's implicit capture; tuple-variant messages use `{0}`, `{1}`
//! positions.

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields, LitStr, Variant};

/// Derives `Display` and `Error` for an enum whose variants each carry an
/// `#[error("...")]` attribute.
pub fn derive_error(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let variants = match &input.data {
        Data::Enum(data) => &data.variants,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "Error derive only supports enums",
            ))
        }
    };

    let arms = variants
        .iter()
        .map(display_arm)
        .collect::<syn::Result<Vec<_>>>()?;

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics ::std::fmt::Display for #name #ty_generics #where_clause {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                match self {
                    #(#arms)*
                }
            }
        }

        impl #impl_generics ::std::error::Error for #name #ty_generics #where_clause {}
    })
}

/// Builds one `match` arm rendering a variant through its declared message.
///
/// Unit variants write the message as-is. Struct variants bring their fields
/// into scope so `{field}` placeholders resolve by implicit capture. Tuple
/// variants bind their fields in order and hand them to the format call,
/// where `{0}`, `{1}` pick them up positionally.
fn display_arm(variant: &Variant) -> syn::Result<proc_macro2::TokenStream> {
    let ident = &variant.ident;
    let message = variant_message(variant)?;

    let arm = match &variant.fields {
        Fields::Unit => quote! {
            Self::#ident => f.write_str(#message),
        },
        Fields::Named(fields) => {
            let bindings: Vec<_> = fields.named.iter().map(|f| &f.ident).collect();
            quote! {
                Self::#ident { #(#bindings),* } => write!(f, #message),
            }
        }
        Fields::Unnamed(fields) => {
            let bindings: Vec<_> = (0..fields.unnamed.len())
                .map(|position| format_ident!("value{}", position))
                .collect();
            quote! {
                Self::#ident(#(#bindings),*) => write!(f, #message, #(#bindings),*),
            }
        }
    };

    Ok(arm)
}

/// Pulls the string literal out of a variant's `#[error("...")]` attribute.
fn variant_message(variant: &Variant) -> syn::Result<LitStr> {
    let attr = variant
        .attrs
        .iter()
        .find(|attr| attr.path().is_ident("error"))
        .ok_or_else(|| {
            syn::Error::new_spanned(
                variant,
                format!(
                    "variant `{}` has no #[error(\"...\")] message",
                    variant.ident
                ),
            )
        })?;

    attr.parse_args::<LitStr>().map_err(|_| {
        syn::Error::new_spanned(
            attr,
            "#[error] takes a single string literal, e.g. #[error(\"input truncated\")]",
        )
    })
}
