//! `#[derive(Serializable)]` for `arbor_serial`.
#![cfg_attr(docsrs, feature(doc_cfg))]
#![allow(clippy::std_instead_of_core, reason = "proc-macro lib")]
#![allow(clippy::std_instead_of_alloc, reason = "proc-macro lib")]

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

static SERIAL_ATTRIBUTE_NAME: &str = "serial";

// -----------------------------------------------------------------------------
// Modules

mod attributes;
mod expand;
mod path;

// -----------------------------------------------------------------------------
// Macros

/// Implements `Attr`, `Serializable`, `Declare` and `FromValue` for a struct
/// with named fields (or a unit struct).
///
/// ## Container attributes
///
/// - `#[serial(attrs(a, b))]`: The projected attributes, in output order.
///   Without it every field is projected in declaration order. Each name
///   must be a field; repeated names are rejected.
/// - `#[serial(type_path = "my::Path")]`: Overrides the type path, which
///   otherwise is `module_path!()` followed by the type name.
/// - `#[serial(auto_register)]`: Declares the type during
///   `Registry::auto_register`. Not available for generic types.
///
/// ## Field attributes
///
/// - `#[serial(default)]`: A missing key falls back to `Default::default()`.
/// - `#[serial(skip_none)]`: On an `Option` field, `None` leaves the
///   attribute unbound, so it is not written at all.
///
/// Every field is a constructor parameter, whether it is projected or not.
///
/// ## Example
///
/// ```rust, ignore
/// #[derive(Serializable)]
/// #[serial(attrs(id, label), auto_register)]
/// struct Node {
///     id: u64,
///     #[serial(skip_none)]
///     label: Option<String>,
///     #[serial(default)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Serializable, attributes(serial))]
pub fn derive_serializable(input: TokenStream) -> TokenStream {
    let ast = parse_macro_input!(input as DeriveInput);
    match expand::derive_serializable(&ast) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.into_compile_error().into(),
    }
}
