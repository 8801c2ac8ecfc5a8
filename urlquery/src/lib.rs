//! # urlquery
//!
//! Declarative, bidirectional mapping between typed Rust structs and URL
//! query strings.
//!
//! This is the meta-crate that re-exports all sub-crates for convenient access.
//! You can depend on `urlquery` to get everything, or depend on individual
//! crates for finer-grained control.
//!
//! ```
//! use chrono::{DateTime, Utc};
//! use urlquery::prelude::*;
//!
//! #[derive(Debug, Default, PartialEq, QueryParams)]
//! #[query_params(crate = "urlquery::params")]
//! struct Search {
//!     #[query_param(converter = "iso_date", url_key = "stTm")]
//!     start_time: Option<DateTime<Utc>>,
//!
//!     #[query_param(converter = "int")]
//!     page_number: i64,
//!
//!     #[query_param(converter = "string")]
//!     title: String,
//! }
//!
//! let search: Search = from_query_string("page_number=3&title=maps").unwrap();
//! assert_eq!(search.page_number, 3);
//! assert_eq!(to_query_string(&search).unwrap(), "page_number=3&title=maps");
//! ```

/// Core types, settings, logging, and error types.
pub use urlquery_core as core;

/// Derive macros.
#[cfg(feature = "macros")]
pub use urlquery_macros as macros;

/// URL decomposition, the query-string codec, and the async file reader.
#[cfg(feature = "http")]
pub use urlquery_http as http;

/// Converters, the field registry, and the mapping engine.
#[cfg(feature = "params")]
pub use urlquery_params as params;

/// The command-line tool's commands.
#[cfg(feature = "cli")]
pub use urlquery_cli as cli;

pub use urlquery_core::{UrlQueryError, UrlQueryResult};

/// The items most programs need.
pub mod prelude {
    pub use urlquery_core::{UrlQueryError, UrlQueryResult};

    #[cfg(feature = "http")]
    pub use urlquery_http::{QueryMap, QueryValue, Url};

    #[cfg(feature = "params")]
    pub use urlquery_params::{
        from_query_map, from_query_string, register_query_field, registered_fields,
        to_query_map, to_query_string, FieldAccess, FieldValue, QueryField, QueryParams,
        UrlConverter,
    };

    #[cfg(feature = "macros")]
    pub use urlquery_macros::QueryParams;
}
