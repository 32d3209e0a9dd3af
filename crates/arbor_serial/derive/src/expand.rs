use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::ext::IdentExt;
use syn::{Data, DataStruct, DeriveInput, Fields, GenericParam, Ident, Type, parse_quote};

use crate::attributes::{ContainerAttributes, FieldAttributes};
use crate::path;

/// A field of the derived struct.
struct Field<'a> {
    ident: &'a Ident,
    ty: &'a Type,
    /// The attribute name: the field name without `r#`.
    name: String,
    attrs: FieldAttributes,
}

fn collect_fields(ast: &DeriveInput) -> syn::Result<Vec<Field<'_>>> {
    let fields = match &ast.data {
        Data::Struct(DataStruct {
            fields: Fields::Named(named),
            ..
        }) => &named.named,
        Data::Struct(DataStruct {
            fields: Fields::Unit,
            ..
        }) => return Ok(Vec::new()),
        _ => {
            return Err(syn::Error::new_spanned(
                &ast.ident,
                "`Serializable` can only be derived for structs with named fields",
            ));
        }
    };

    fields
        .iter()
        .map(|field| {
            // Named fields always carry an identifier.
            let ident = field
                .ident
                .as_ref()
                .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
            Ok(Field {
                ident,
                ty: &field.ty,
                name: ident.unraw().to_string(),
                attrs: FieldAttributes::parse(&field.attrs)?,
            })
        })
        .collect()
}

pub(crate) fn derive_serializable(ast: &DeriveInput) -> syn::Result<TokenStream> {
    let container = ContainerAttributes::parse(&ast.attrs)?;
    let fields = collect_fields(ast)?;

    if let Some(lifetime) = ast.generics.lifetimes().next() {
        return Err(syn::Error::new_spanned(
            lifetime,
            "`Serializable` types cannot borrow; lifetime parameters are not supported",
        ));
    }

    if let Some(attrs) = &container.attrs {
        for (name, span) in attrs {
            if !fields.iter().any(|f| f.name == *name) {
                return Err(syn::Error::new(*span, format!("no field named `{name}`")));
            }
        }
    }

    let krate = path::arbor_serial();
    let attr_ = path::attr_(&krate);
    let object_ = path::object_(&krate);
    let error_ = path::error_(&krate);
    let vec_ = path::vec_(&krate);

    let ident = &ast.ident;
    let ident_str = ident.unraw().to_string();

    // Generic parameters must be `'static` and every field must convert both ways.
    let mut generics = ast.generics.clone();
    if !generics.params.is_empty() {
        let where_clause = generics.make_where_clause();
        for param in &ast.generics.params {
            if let GenericParam::Type(ty) = param {
                let ty = &ty.ident;
                where_clause.predicates.push(parse_quote!(#ty: 'static));
            }
        }
        for field in &fields {
            let ty = field.ty;
            where_clause
                .predicates
                .push(parse_quote!(#ty: #attr_ + #object_::FromValue));
        }
    }
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let type_path = match &container.type_path {
        Some(lit) => quote! { #lit },
        None => quote! { ::core::concat!(::core::module_path!(), "::", #ident_str) },
    };

    let bound_attrs = if fields.is_empty() {
        quote! { #vec_::new() }
    } else {
        let capacity = fields.len();
        let pushes = fields.iter().map(|field| {
            let member = field.ident;
            let name = &field.name;
            let push = quote! { attrs.push((#name, &self.#member as &dyn #attr_)); };
            if field.attrs.skip_none {
                quote! {
                    if ::core::option::Option::is_some(&self.#member) {
                        #push
                    }
                }
            } else {
                push
            }
        });
        quote! {
            let mut attrs = #vec_::with_capacity(#capacity);
            #(#pushes)*
            attrs
        }
    };

    let attribute_set = match &container.attrs {
        None => quote! { #object_::AttributeSet::All },
        Some(attrs) => {
            let names = attrs.iter().map(|(name, _)| name);
            quote! { #object_::AttributeSet::only(&[#(#names),*]) }
        }
    };

    let parameters = fields.iter().map(|field| &field.name);

    let construct = if matches!(
        &ast.data,
        Data::Struct(DataStruct {
            fields: Fields::Unit,
            ..
        })
    ) {
        quote! {
            let _ = __fields;
            ::core::result::Result::Ok(Self)
        }
    } else if fields.is_empty() {
        quote! {
            let _ = __fields;
            ::core::result::Result::Ok(Self {})
        }
    } else {
        let inits = fields.iter().map(|field| {
            let member = field.ident;
            let name = &field.name;
            if field.attrs.default {
                quote! { #member: __fields.take_or_default(#name)? }
            } else {
                quote! { #member: __fields.take(#name)? }
            }
        });
        quote! { ::core::result::Result::Ok(Self { #(#inits),* }) }
    };

    let auto_register = auto_register(&krate, ast, container.auto_register)?;

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics #attr_ for #ident #ty_generics #where_clause {
            #[inline]
            fn attr_type_name(&self) -> &'static str {
                <Self as #object_::Declare>::TYPE_PATH
            }

            #[inline]
            fn as_serializable(&self) -> ::core::option::Option<&dyn #object_::Serializable> {
                ::core::option::Option::Some(self)
            }
        }

        #[automatically_derived]
        impl #impl_generics #object_::Serializable for #ident #ty_generics #where_clause {
            #[inline]
            fn type_path(&self) -> &'static str {
                <Self as #object_::Declare>::TYPE_PATH
            }

            #[inline]
            fn attrs(&self) -> #object_::AttributeSet {
                <Self as #object_::Declare>::attribute_set()
            }

            fn bound_attrs(&self) -> #vec_<(&'static str, &dyn #attr_)> {
                #bound_attrs
            }
        }

        #[automatically_derived]
        impl #impl_generics #object_::Declare for #ident #ty_generics #where_clause {
            const TYPE_PATH: &'static str = #type_path;

            #[inline]
            fn attribute_set() -> #object_::AttributeSet {
                #attribute_set
            }

            #[inline]
            fn parameters() -> &'static [&'static str] {
                &[#(#parameters),*]
            }

            fn construct(
                __fields: &mut #object_::FieldMap,
            ) -> ::core::result::Result<Self, #error_::ConstructionError> {
                #construct
            }
        }

        #[automatically_derived]
        impl #impl_generics #object_::FromValue for #ident #ty_generics #where_clause {
            #[inline]
            fn from_value(
                value: #krate::Value,
            ) -> ::core::result::Result<Self, #error_::ValueError> {
                #object_::from_nested::<Self>(value)
            }
        }

        #auto_register
    })
}

#[cfg(feature = "auto_register")]
fn auto_register(
    krate: &syn::Path,
    ast: &DeriveInput,
    span: Option<Span>,
) -> syn::Result<TokenStream> {
    use quote::quote_spanned;

    let Some(span) = span else {
        return Ok(TokenStream::new());
    };
    if !ast.generics.params.is_empty() {
        return Err(syn::Error::new(
            span,
            "`auto_register` is not available for generic types; declare each instance instead",
        ));
    }
    let auto_register_ = path::auto_register_(krate);
    let ident = &ast.ident;
    Ok(quote_spanned! { span =>
        #auto_register_::inventory::submit! {
            #auto_register_::AutoDeclare(#krate::registry::Registry::declare::<#ident>)
        }
    })
}

#[cfg(not(feature = "auto_register"))]
fn auto_register(_: &syn::Path, _: &DeriveInput, _: Option<Span>) -> syn::Result<TokenStream> {
    Ok(TokenStream::new())
}
