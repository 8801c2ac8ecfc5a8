//! # urlquery-http
//!
//! URL-level plumbing for urlquery: decomposing URLs into their components,
//! converting raw query strings to and from flat key/value mappings, and
//! reading text files asynchronously.

pub mod file_reader;
pub mod querystring;
pub mod url;

pub use file_reader::{read_all_as_text, read_as_text, FileReaderResult, TextEncoding};
pub use querystring::{QueryMap, QueryValue};
pub use url::Url;
