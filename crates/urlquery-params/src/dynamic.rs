//! Runtime-defined records.
//!
//! [`FieldRecord`] is an ordered name to [`FieldValue`] map that implements
//! [`FieldAccess`], so field layouts known only at runtime (for example from
//! command-line arguments) can go through [`write_fields`](crate::write_fields)
//! and [`read_fields`](crate::read_fields). [`parse_field_spec`] builds a
//! descriptor from a compact `name:converter[:url_key]` string.

use std::sync::Arc;

use indexmap::IndexMap;
use serde::Serialize;

use urlquery_core::{UrlQueryError, UrlQueryResult};
use urlquery_http::QueryValue;

use crate::access::FieldAccess;
use crate::converters::get_converter;
use crate::registry::FieldDescriptor;
use crate::value::FieldValue;

/// An ordered set of named field values.
///
/// Unset fields are absent; setting a field never fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldRecord {
    values: IndexMap<String, FieldValue>,
}

impl FieldRecord {
    /// Creates a new, empty record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the value of a field, if set.
    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.values.get(name)
    }

    /// Sets a field, returning its previous value.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) -> Option<FieldValue> {
        self.values.insert(name.into(), value)
    }

    /// Unsets a field.
    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        self.values.shift_remove(name)
    }

    /// Returns the number of set fields.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if no field is set.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over the set fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Sets the descriptor's field from text, decoding it with the
    /// descriptor's converter as if it had been read from a query.
    ///
    /// # Errors
    ///
    /// Returns [`UrlQueryError::ConversionError`] if the converter rejects
    /// the text, or [`UrlQueryError::ConfigurationError`] if the descriptor
    /// has no converter.
    pub fn set_from_text(&mut self, descriptor: &FieldDescriptor, text: &str) -> UrlQueryResult<()> {
        let converter = descriptor.converter.as_ref().ok_or_else(|| {
            UrlQueryError::ConfigurationError(format!(
                "no converter given for url key '{}'",
                descriptor.url_key
            ))
        })?;

        if let Some(value) = converter.from_url(&QueryValue::from(text))? {
            self.insert(descriptor.field_name.as_str(), value);
        }
        Ok(())
    }
}

impl FieldAccess for FieldRecord {
    fn field(&self, name: &str) -> Option<FieldValue> {
        self.values.get(name).cloned()
    }

    fn set_field(&mut self, name: &str, value: FieldValue) -> UrlQueryResult<()> {
        self.values.insert(name.to_string(), value);
        Ok(())
    }
}

/// Parses a `name:converter[:url_key]` field spec into a descriptor.
///
/// The converter is one of the names accepted by
/// [`get_converter`](crate::get_converter).
///
/// # Examples
///
/// ```
/// use urlquery_params::dynamic::parse_field_spec;
///
/// let d = parse_field_spec("start_time:iso_date:stTm").unwrap();
/// assert_eq!(d.field_name, "start_time");
/// assert_eq!(d.url_key, "stTm");
///
/// assert!(parse_field_spec("page").is_err());
/// ```
///
/// # Errors
///
/// Returns [`UrlQueryError::ConfigurationError`] for a malformed spec or an
/// unknown converter name.
pub fn parse_field_spec(spec: &str) -> UrlQueryResult<FieldDescriptor> {
    let mut parts = spec.splitn(3, ':');
    let name = parts.next().unwrap_or_default().trim();
    let converter = parts.next().map(str::trim).unwrap_or_default();
    let url_key = parts.next().map(str::trim).filter(|k| !k.is_empty());

    if name.is_empty() || converter.is_empty() {
        return Err(UrlQueryError::ConfigurationError(format!(
            "invalid field spec '{spec}', expected name:converter[:url_key]"
        )));
    }

    let mut descriptor = FieldDescriptor::new(name, Arc::from(get_converter(converter)?));
    if let Some(url_key) = url_key {
        descriptor.url_key = url_key.to_string();
    }
    Ok(descriptor)
}
