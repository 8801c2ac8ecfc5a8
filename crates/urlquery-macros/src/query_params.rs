//! `#[derive(QueryParams)]` implementation.
//!
//! Generates a `FieldAccess` impl that matches on the names of the mapped
//! fields, and a `QueryParams` impl whose `query_fields()` lists them in
//! declaration order.

use darling::{FromDeriveInput, FromField};
use proc_macro2::TokenStream;
use quote::quote;
use syn::DeriveInput;

/// Struct-level attributes from `#[query_params(...)]`.
#[derive(Debug, FromDeriveInput)]
#[darling(attributes(query_params), supports(struct_named))]
pub struct QueryParamsOpts {
    pub ident: syn::Ident,
    pub generics: syn::Generics,
    pub data: darling::ast::Data<(), QueryParamOpts>,

    /// Path to the params crate, for callers that reach it through a
    /// re-export (e.g. `urlquery::params`).
    #[darling(default, rename = "crate")]
    pub krate: Option<syn::Path>,
}

/// Per-field attributes from `#[query_param(...)]`.
#[derive(Debug, FromField)]
#[darling(attributes(query_param))]
pub struct QueryParamOpts {
    pub ident: Option<syn::Ident>,

    /// Short converter name or path to a converter type.
    #[darling(default)]
    pub converter: Option<String>,

    /// Key used in the query string; defaults to the field name.
    #[darling(default)]
    pub url_key: Option<String>,

    /// Read from queries but never written.
    #[darling(default)]
    pub read_only: bool,
}

impl QueryParamOpts {
    const fn is_mapped(&self) -> bool {
        self.converter.is_some() || self.url_key.is_some() || self.read_only
    }
}

/// A mapped field after validation.
struct MappedField<'a> {
    ident: &'a syn::Ident,
    name: String,
    converter: TokenStream,
    opts: &'a QueryParamOpts,
}

/// Generates the `FieldAccess` and `QueryParams` implementations.
pub fn derive_query_params_impl(input: DeriveInput) -> TokenStream {
    let opts = match QueryParamsOpts::from_derive_input(&input) {
        Ok(o) => o,
        Err(e) => return e.write_errors(),
    };

    let Some(fields) = opts.data.as_ref().take_struct() else {
        return darling::Error::unsupported_shape("enum").write_errors();
    };

    let krate = opts
        .krate
        .as_ref()
        .map_or_else(|| quote! { ::urlquery_params }, |path| quote! { #path });

    let mut errors = Vec::new();
    let mut mapped = Vec::new();

    for field in fields.fields {
        if !field.is_mapped() {
            continue;
        }
        let Some(ident) = field.ident.as_ref() else {
            continue;
        };
        match resolve_converter(field, ident, &krate) {
            Ok(converter) => mapped.push(MappedField {
                ident,
                name: ident.to_string(),
                converter,
                opts: field,
            }),
            Err(e) => errors.push(e),
        }
    }

    if !errors.is_empty() {
        return darling::Error::multiple(errors).write_errors();
    }

    let struct_name = &opts.ident;
    let struct_name_str = struct_name.to_string();
    let (impl_generics, ty_generics, where_clause) = opts.generics.split_for_impl();

    let get_arms = mapped.iter().map(|f| {
        let ident = f.ident;
        let name = &f.name;
        quote! {
            #name => #krate::ToFieldValue::to_field_value(&self.#ident),
        }
    });

    let set_arms = mapped.iter().map(|f| {
        let ident = f.ident;
        let name = &f.name;
        quote! {
            #name => {
                self.#ident = #krate::FromFieldValue::from_field_value(value)?;
                ::core::result::Result::Ok(())
            }
        }
    });

    let field_defs = mapped.iter().map(|f| generate_query_field(f, &krate));

    quote! {
        #[automatically_derived]
        impl #impl_generics #krate::FieldAccess for #struct_name #ty_generics #where_clause {
            fn field(&self, name: &str) -> ::core::option::Option<#krate::FieldValue> {
                match name {
                    #(#get_arms)*
                    _ => ::core::option::Option::None,
                }
            }

            fn set_field(
                &mut self,
                name: &str,
                value: #krate::FieldValue,
            ) -> #krate::UrlQueryResult<()> {
                match name {
                    #(#set_arms)*
                    _ => {
                        let _ = value;
                        ::core::result::Result::Err(#krate::UrlQueryError::FieldError(
                            ::std::format!("{} has no query field '{}'", #struct_name_str, name),
                        ))
                    }
                }
            }
        }

        #[automatically_derived]
        impl #impl_generics #krate::QueryParams for #struct_name #ty_generics #where_clause {
            fn query_fields() -> ::std::vec::Vec<#krate::QueryField> {
                ::std::vec![
                    #(#field_defs),*
                ]
            }
        }
    }
}

/// Maps a converter name to the converter type's path.
fn resolve_converter(
    field: &QueryParamOpts,
    ident: &syn::Ident,
    krate: &TokenStream,
) -> darling::Result<TokenStream> {
    let Some(name) = field.converter.as_deref() else {
        return Err(darling::Error::custom(format!(
            "query_param on `{ident}` requires a converter"
        ))
        .with_span(ident));
    };

    let builtin = match name {
        "string" => Some(quote! { #krate::converters::StringConverter }),
        "int" => Some(quote! { #krate::converters::IntConverter }),
        "bool" => Some(quote! { #krate::converters::BoolConverter }),
        "iso_date" => Some(quote! { #krate::converters::IsoDateConverter }),
        "int_array" => Some(quote! { #krate::converters::IntArrayConverter }),
        "string_array" => Some(quote! { #krate::converters::StringArrayConverter }),
        _ => None,
    };
    if let Some(path) = builtin {
        return Ok(path);
    }

    syn::parse_str::<syn::Path>(name)
        .map(|path| quote! { #path })
        .map_err(|_| {
            darling::Error::custom(format!("unknown query converter `{name}`")).with_span(ident)
        })
}

/// Generates a single `QueryField` construction expression.
fn generate_query_field(f: &MappedField<'_>, krate: &TokenStream) -> TokenStream {
    let name = &f.name;
    let converter = &f.converter;

    let mut chain = vec![quote! { .converter::<#converter>() }];
    if let Some(ref url_key) = f.opts.url_key {
        chain.push(quote! { .url_key(#url_key) });
    }
    if f.opts.read_only {
        chain.push(quote! { .read_only(true) });
    }

    quote! {
        #krate::QueryField::new(#name) #(#chain)*
    }
}
