//! Derive macro for wire serialization.
//!
//! Generates `Encode` and `Decode` implementations for structs. Fields are
//! serialized in declaration order; integers are big-endian and variable
//! length content carries its own length prefix (see `types::encoding`).
//!
//! Works on named and tuple structs. Enums and unions have no canonical wire
//! format here; records with a discriminated layout implement the traits by
//! hand.
//!
//! # Generated code
//!
//! ```ignore
//! impl Encode for Header {
//!     fn encode<S: EncodeSink>(&self, out: &mut S) {
//!         self.n_bits.encode(out);
//!         self.height.encode(out);
//!     }
//! }
//!
//! impl Decode for Header {
//!     fn decode(input: &mut &[u8]) -> Result<Self, DecodeError> {
//!         Ok(Self {
//!             n_bits: u32::decode(input)?,
//!             height: u32::decode(input)?,
//!         })
//!     }
//! }
//! ```

use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Data, DeriveInput, Fields, Index};

/// Derives `Encode` and `Decode` for a struct.
pub fn derive_binary_codec(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let fields = match &input.data {
        Data::Struct(data) => &data.fields,
        _ => {
            return Err(syn::Error::new_spanned(
                input,
                "BinaryCodec applies to structs; implement Encode and Decode by hand elsewhere",
            ))
        }
    };

    // One pass over the fields yields both halves of the codec: the write
    // statements for `encode` and the constructor expression for `decode`.
    let (writes, construct) = match fields {
        Fields::Named(fields) => {
            let writes = fields
                .named
                .iter()
                .map(|field| {
                    let ident = &field.ident;
                    quote! { crate::types::encoding::Encode::encode(&self.#ident, out); }
                })
                .collect::<Vec<_>>();

            let reads = fields.named.iter().map(|field| {
                let ident = &field.ident;
                quote! { #ident: crate::types::encoding::Decode::decode(input)? }
            });

            (writes, quote! { Self { #(#reads),* } })
        }
        Fields::Unnamed(fields) => {
            let writes = (0..fields.unnamed.len())
                .map(|position| {
                    let index = Index::from(position);
                    quote! { crate::types::encoding::Encode::encode(&self.#index, out); }
                })
                .collect::<Vec<_>>();

            let reads = fields
                .unnamed
                .iter()
                .map(|_| quote! { crate::types::encoding::Decode::decode(input)? });

            (writes, quote! { Self( #(#reads),* ) })
        }
        Fields::Unit => {
            return Err(syn::Error::new_spanned(
                input,
                "BinaryCodec needs at least one field",
            ))
        }
    };

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    Ok(quote! {
        impl #impl_generics crate::types::encoding::Encode for #name #ty_generics #where_clause {
            fn encode<S: crate::types::encoding::EncodeSink>(&self, out: &mut S) {
                #(#writes)*
            }
        }

        impl #impl_generics crate::types::encoding::Decode for #name #ty_generics #where_clause {
            fn decode(input: &mut &[u8]) -> ::std::result::Result<Self, crate::types::encoding::DecodeError> {
                Ok(#construct)
            }
        }
    })
}
