//! Procedural macros for lodestar.
//!
//! Provides `#[derive(NavParams)]`, which turns `#[param]`-annotated
//! fields into the parameter descriptor table the lodestar resolver
//! binds against:
//!
//! ```rust,ignore
//! use lodestar_derive::NavParams;
//!
//! #[derive(Default, NavParams)]
//! struct EditViewModel {
//!     #[param]
//!     id: u32,
//!
//!     #[param(name = "Title")]
//!     title: String,
//!
//!     // not bindable: no attribute
//!     dirty: bool,
//! }
//! ```
//!
//! The external name defaults to the field name; `#[param(name = "...")]`
//! overrides it. Names are matched case-insensitively at resolution time,
//! and duplicate external names are rejected there, not here; the
//! resolver owns that failure mode.

use proc_macro::TokenStream;
use quote::{format_ident, quote};
use syn::{parse_macro_input, Data, DeriveInput, Fields};

/// Derives the `lodestar::NavParams` trait for a struct with named fields.
#[proc_macro_derive(NavParams, attributes(param))]
pub fn derive_nav_params(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    expand_nav_params(input)
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}

fn expand_nav_params(input: DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let name = &input.ident;

    if !input.generics.params.is_empty() {
        return Err(syn::Error::new_spanned(
            &input.generics,
            "NavParams cannot be derived for generic types",
        ));
    }

    let fields = match &input.data {
        Data::Struct(data) => match &data.fields {
            Fields::Named(named) => &named.named,
            _ => {
                return Err(syn::Error::new_spanned(
                    name,
                    "NavParams requires a struct with named fields",
                ))
            }
        },
        _ => {
            return Err(syn::Error::new_spanned(
                name,
                "NavParams can only be derived for structs",
            ))
        }
    };

    let mut setter_fns = Vec::new();
    let mut descriptors = Vec::new();

    for field in fields {
        let Some(param) = parse_param_attr(&field.attrs) else {
            continue;
        };

        let ident = field
            .ident
            .as_ref()
            .ok_or_else(|| syn::Error::new_spanned(field, "expected a named field"))?;
        let external_name = param.name.unwrap_or_else(|| ident.to_string());
        let setter = format_ident!("__set_{}", ident);

        setter_fns.push(quote! {
            fn #setter(
                target: &mut dyn ::core::any::Any,
                value: &::lodestar::__private::Value,
            ) -> ::core::result::Result<(), ::std::string::String> {
                let target = target
                    .downcast_mut::<#name>()
                    .ok_or_else(|| ::std::string::String::from("target type mismatch"))?;
                target.#ident = ::lodestar::__private::from_value(value.clone())
                    .map_err(|err| err.to_string())?;
                ::core::result::Result::Ok(())
            }
        });
        descriptors.push(quote! {
            ::lodestar::ParameterDescriptor::new(#external_name, #setter)
        });
    }

    Ok(quote! {
        impl ::lodestar::NavParams for #name {
            fn parameter_descriptors() -> &'static [::lodestar::ParameterDescriptor] {
                #(#setter_fns)*

                const DESCRIPTORS: &[::lodestar::ParameterDescriptor] = &[
                    #(#descriptors),*
                ];
                DESCRIPTORS
            }
        }
    })
}

struct ParamAttr {
    name: Option<String>,
}

/// Parse `#[param]` / `#[param(name = "...")]` from a field's attributes.
fn parse_param_attr(attrs: &[syn::Attribute]) -> Option<ParamAttr> {
    for attr in attrs {
        if !attr.path().is_ident("param") {
            continue;
        }

        let mut parsed = ParamAttr { name: None };
        if matches!(attr.meta, syn::Meta::List(_)) {
            let _ = attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("name") {
                    let value: syn::LitStr = meta.value()?.parse()?;
                    parsed.name = Some(value.value());
                }
                Ok(())
            });
        }
        return Some(parsed);
    }
    None
}
