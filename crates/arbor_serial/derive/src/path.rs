//! Paths into `arbor_serial` used by the generated code.

use proc_macro2::TokenStream;
use quote::quote;

/// The path of `arbor_serial` as seen from the crate invoking the derive.
///
/// 1. For crates that depend on `arbor_serial`, `::arbor_serial`.
/// 2. For crates that depend on `arbor`, `::arbor::serial`.
/// 3. Otherwise `::arbor_serial`, which may be wrong.
///
/// Resolving reads the caller's manifest, so it is done once per invocation
/// and passed around.
pub(crate) fn arbor_serial() -> syn::Path {
    arbor_macro_utils::Manifest::shared(|manifest| manifest.get_crate_path("arbor_serial"))
}

#[inline]
pub(crate) fn attr_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::attr::Attr }
}

#[inline]
pub(crate) fn object_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::object }
}

#[inline]
pub(crate) fn error_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::error }
}

#[inline]
pub(crate) fn vec_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::__macro_exports::Vec }
}

#[cfg(feature = "auto_register")]
#[inline]
pub(crate) fn auto_register_(krate: &syn::Path) -> TokenStream {
    quote! { #krate::__macro_exports::auto_register }
}
