//! # urlquery-params
//!
//! Declarative mapping between typed structs and URL query strings.
//!
//! A type lists its mapped fields, each with a [`UrlConverter`] and an
//! optional URL key and read-only flag. The mapping engine then builds
//! instances from incoming query strings and renders instances back out,
//! applying each field's converter in registration order.
//!
//! ## Modules
//!
//! - [`value`] - Object-side field values and conversions to Rust types
//! - [`access`] - The `FieldAccess` and `QueryParams` traits
//! - [`converters`] - The six built-in converters and `get_converter`
//! - [`registry`] - Field descriptors and the process-wide field registry
//! - [`mapping`] - The serialize/deserialize entry points
//! - [`dynamic`] - Runtime-defined records and field specs
//!
//! Most types implement [`QueryParams`] with `#[derive(QueryParams)]` from
//! the `urlquery-macros` crate.

pub mod access;
pub mod converters;
pub mod dynamic;
pub mod mapping;
pub mod registry;
pub mod value;

pub use access::{FieldAccess, QueryParams};
pub use converters::{get_converter, UrlConverter};
pub use mapping::{
    from_query_map, from_query_string, read_fields, to_query_map, to_query_string, write_fields,
};
pub use registry::{
    register_query_field, registered_fields, registry, FieldDescriptor, FieldRegistry,
    QueryField, QueryParamConfig, TargetType,
};
pub use value::{FieldValue, FromFieldValue, ToFieldValue};

// Re-exported for generated code.
pub use urlquery_core::{UrlQueryError, UrlQueryResult};
pub use urlquery_http::{QueryMap, QueryValue};
