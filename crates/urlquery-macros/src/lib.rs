//! # urlquery-macros
//!
//! Procedural macros for urlquery. Provides `#[derive(QueryParams)]`, which
//! implements `FieldAccess` and `QueryParams` for a struct from per-field
//! `#[query_param(...)]` attributes.
//!
//! This crate is independent of all other urlquery crates because proc-macro
//! crates cannot depend on crates that use them; generated code refers to
//! `::urlquery_params`.

use proc_macro::TokenStream;
use syn::{parse_macro_input, DeriveInput};

mod query_params;

/// Derives `FieldAccess` and `QueryParams` for a struct with named fields.
///
/// ```ignore
/// #[derive(Default, QueryParams)]
/// struct Search {
///     #[query_param(converter = "iso_date", url_key = "stTm")]
///     start_time: Option<DateTime<Utc>>,
///
///     #[query_param(converter = "int")]
///     page_number: i64,
///
///     #[query_param(converter = "int", read_only)]
///     total: i64,
///
///     // Not mapped.
///     cache: Vec<u8>,
/// }
/// ```
///
/// `converter` is one of `string`, `int`, `bool`, `iso_date`, `int_array`,
/// `string_array`, or a path to a type implementing `UrlConverter + Default`.
///
/// Generated code names `::urlquery_params`; when that crate is only reachable
/// through a re-export, point at it with `#[query_params(crate = "urlquery::params")]`.
#[proc_macro_derive(QueryParams, attributes(query_param, query_params))]
pub fn derive_query_params(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    query_params::derive_query_params_impl(input).into()
}
