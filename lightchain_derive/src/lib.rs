//! Derive macros for the lightchain crate.
//!
//! Provides:
//! - `#[derive(BinaryCodec)]` - wire serialization for consensus records
//! - `#[derive(Error)]` - error type boilerplate (thiserror replacement)

mod binary_codec;
mod error;

use proc_macro::TokenStream;

/// Implements the `Encode` and `Decode` traits for a struct.
///
/// Fields are written in declaration order with no framing of their own;
/// every field type supplies its own wire format.
#[proc_macro_derive(BinaryCodec)]
pub fn derive_binary_codec(input: TokenStream) -> TokenStream {
    binary_codec::derive_binary_codec(input)
}

/// Implements `Display` and `Error` for an error enum from `#[error("...")]`
/// attributes on its variants.
#[proc_macro_derive(Error, attributes(error))]
pub fn derive_error(input: TokenStream) -> TokenStream {
    error::derive_error(input)
}
