use proc_macro2::Span;
use syn::ext::IdentExt;
use syn::punctuated::Punctuated;
use syn::spanned::Spanned;
use syn::{Attribute, Ident, LitStr, Token, parenthesized};

use crate::SERIAL_ATTRIBUTE_NAME;

// -----------------------------------------------------------------------------
// AttrName

/// One entry of `attrs(...)`: a bare identifier or a string literal.
struct AttrName {
    name: String,
    span: Span,
}

impl syn::parse::Parse for AttrName {
    fn parse(input: syn::parse::ParseStream) -> syn::Result<Self> {
        if input.peek(LitStr) {
            let lit: LitStr = input.parse()?;
            Ok(Self {
                name: lit.value(),
                span: lit.span(),
            })
        } else {
            let ident = Ident::parse_any(input)?;
            Ok(Self {
                name: ident.unraw().to_string(),
                span: ident.span(),
            })
        }
    }
}

// -----------------------------------------------------------------------------
// ContainerAttributes

/// `#[serial(...)]` on the type.
#[derive(Default)]
pub(crate) struct ContainerAttributes {
    /// `None` projects every field.
    pub attrs: Option<Vec<(String, Span)>>,
    pub type_path: Option<LitStr>,
    pub auto_register: Option<Span>,
}

impl ContainerAttributes {
    pub(crate) fn parse(attributes: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attribute in attributes {
            if !attribute.path().is_ident(SERIAL_ATTRIBUTE_NAME) {
                continue;
            }
            attribute.parse_nested_meta(|meta| {
                if meta.path.is_ident("attrs") {
                    if out.attrs.is_some() {
                        return Err(meta.error("`attrs` is given more than once"));
                    }
                    let content;
                    parenthesized!(content in meta.input);
                    let names = Punctuated::<AttrName, Token![,]>::parse_terminated(&content)?;
                    let mut attrs: Vec<(String, Span)> = Vec::with_capacity(names.len());
                    for AttrName { name, span } in names {
                        if name.is_empty() {
                            return Err(syn::Error::new(span, "attribute names cannot be empty"));
                        }
                        if attrs.iter().any(|(seen, _)| *seen == name) {
                            return Err(syn::Error::new(
                                span,
                                format!("attribute `{name}` is listed more than once"),
                            ));
                        }
                        attrs.push((name, span));
                    }
                    out.attrs = Some(attrs);
                    Ok(())
                } else if meta.path.is_ident("type_path") {
                    let lit: LitStr = meta.value()?.parse()?;
                    if lit.value().is_empty() {
                        return Err(syn::Error::new(lit.span(), "`type_path` cannot be empty"));
                    }
                    out.type_path = Some(lit);
                    Ok(())
                } else if meta.path.is_ident("auto_register") {
                    out.auto_register = Some(meta.path.span());
                    Ok(())
                } else {
                    Err(meta.error("expected `attrs(...)`, `type_path = \"...\"` or `auto_register`"))
                }
            })?;
        }
        Ok(out)
    }
}

// -----------------------------------------------------------------------------
// FieldAttributes

/// `#[serial(...)]` on a field.
#[derive(Default)]
pub(crate) struct FieldAttributes {
    /// Absent keys fall back to `Default::default()`.
    pub default: bool,
    /// `None` leaves the attribute unbound, so it is not written.
    pub skip_none: bool,
}

impl FieldAttributes {
    pub(crate) fn parse(attributes: &[Attribute]) -> syn::Result<Self> {
        let mut out = Self::default();
        for attribute in attributes {
            if !attribute.path().is_ident(SERIAL_ATTRIBUTE_NAME) {
                continue;
            }
            attribute.parse_nested_meta(|meta| {
                if meta.path.is_ident("default") {
                    out.default = true;
                    Ok(())
                } else if meta.path.is_ident("skip_none") {
                    out.skip_none = true;
                    Ok(())
                } else {
                    Err(meta.error("expected `default` or `skip_none`"))
                }
            })?;
        }
        Ok(out)
    }
}
