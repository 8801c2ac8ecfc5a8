//! Per-field query converters.
//!
//! A [`UrlConverter`] translates one struct field between its object-side
//! [`FieldValue`] and its query-side text. Each converter decides on its own
//! when a key is omitted on write and when a present key leaves the field
//! untouched on read.
//!
//! # Built-in converters
//!
//! | Name           | Object side      | Query side                  |
//! |----------------|------------------|-----------------------------|
//! | `string`       | `String`         | raw text, omitted if empty  |
//! | `int`          | `i64`            | base-10 digits, always sent |
//! | `bool`         | `bool`           | `t`, omitted unless `true`  |
//! | `iso_date`     | `DateTime<Utc>`  | ISO-8601 text               |
//! | `int_array`    | `Vec<i64>`       | `;`-joined, omitted if empty|
//! | `string_array` | `Vec<String>`    | `;`-joined, omitted if empty|

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, SecondsFormat, Utc};

use urlquery_core::{UrlQueryError, UrlQueryResult};
use urlquery_http::QueryValue;

use crate::value::FieldValue;

/// Separator between the elements of an array value.
pub const DELIMITER: char = ';';

/// Converts one field between its object value and its query text.
///
/// Converters are stateless; one instance is shared by every mapping
/// operation on the field it was registered for.
pub trait UrlConverter: Send + Sync + fmt::Debug {
    /// Returns the short name of the converter.
    fn name(&self) -> &'static str;

    /// Renders a field value as query text.
    ///
    /// `value` is `None` when the field is absent. Returning `Ok(None)`
    /// omits the key from the query mapping.
    ///
    /// # Errors
    ///
    /// Returns [`UrlQueryError::FieldError`] if the value is not of the kind
    /// the converter handles.
    fn to_url(&self, value: Option<&FieldValue>) -> UrlQueryResult<Option<String>>;

    /// Decodes the value found under the field's key.
    ///
    /// Only called when the key is present. Returning `Ok(None)` leaves the
    /// field at its current value.
    ///
    /// # Errors
    ///
    /// Returns [`UrlQueryError::ConversionError`] if the text cannot be parsed.
    fn from_url(&self, value: &QueryValue) -> UrlQueryResult<Option<FieldValue>>;
}

fn unexpected(converter: &dyn UrlConverter, value: &FieldValue) -> UrlQueryError {
    UrlQueryError::FieldError(format!(
        "{} converter cannot write a {} value",
        converter.name(),
        value.kind()
    ))
}

fn parse_int(text: &str) -> UrlQueryResult<i64> {
    text.parse::<i64>()
        .map_err(|e| UrlQueryError::ConversionError(format!("invalid integer '{text}': {e}")))
}

/// Converter for string fields.
///
/// Empty or absent strings are not written; an empty value on read leaves
/// the field untouched. A bare flag reads as the string `"true"`.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringConverter;

impl UrlConverter for StringConverter {
    fn name(&self) -> &'static str {
        "string"
    }

    fn to_url(&self, value: Option<&FieldValue>) -> UrlQueryResult<Option<String>> {
        match value {
            None => Ok(None),
            Some(FieldValue::Str(text)) if text.is_empty() => Ok(None),
            Some(FieldValue::Str(text)) => Ok(Some(text.clone())),
            Some(other) => Err(unexpected(self, other)),
        }
    }

    fn from_url(&self, value: &QueryValue) -> UrlQueryResult<Option<FieldValue>> {
        let text = value.to_string();
        if text.is_empty() {
            return Ok(None);
        }
        Ok(Some(FieldValue::Str(text)))
    }
}

/// Converter for integer fields.
///
/// Zero is written like any other value.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntConverter;

impl UrlConverter for IntConverter {
    fn name(&self) -> &'static str {
        "int"
    }

    fn to_url(&self, value: Option<&FieldValue>) -> UrlQueryResult<Option<String>> {
        match value {
            None => Ok(None),
            Some(FieldValue::Int(v)) => Ok(Some(v.to_string())),
            Some(other) => Err(unexpected(self, other)),
        }
    }

    fn from_url(&self, value: &QueryValue) -> UrlQueryResult<Option<FieldValue>> {
        match value {
            QueryValue::Text(text) => parse_int(text).map(|v| Some(FieldValue::Int(v))),
            QueryValue::Flag => Err(UrlQueryError::ConversionError(
                "int converter cannot read a bare key".to_string(),
            )),
        }
    }
}

/// Converter for boolean fields.
///
/// Only `true` is written (as `t`). On read, `True`, `true` and `t` decode to
/// `true` and any other present value, including a bare key, to `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolConverter;

impl UrlConverter for BoolConverter {
    fn name(&self) -> &'static str {
        "bool"
    }

    fn to_url(&self, value: Option<&FieldValue>) -> UrlQueryResult<Option<String>> {
        match value {
            Some(FieldValue::Bool(true)) => Ok(Some("t".to_string())),
            None | Some(FieldValue::Bool(false)) => Ok(None),
            Some(other) => Err(unexpected(self, other)),
        }
    }

    fn from_url(&self, value: &QueryValue) -> UrlQueryResult<Option<FieldValue>> {
        let truthy = matches!(value.as_text(), Some("True" | "true" | "t"));
        Ok(Some(FieldValue::Bool(truthy)))
    }
}

/// Converter for date/time fields.
///
/// Writes RFC 3339 in UTC with millisecond precision
/// (`2020-01-02T03:04:05.000Z`), widening to 6 or 9 fractional digits when
/// the instant has sub-millisecond precision. Reads RFC 3339 with any offset, a naive
/// `YYYY-MM-DDTHH:MM:SS[.fff]` taken as UTC, or a bare `YYYY-MM-DD` taken as
/// midnight UTC.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsoDateConverter;

impl IsoDateConverter {
    fn format(dt: &DateTime<Utc>) -> String {
        let precision = if dt.timestamp_subsec_nanos() % 1_000_000 == 0 {
            SecondsFormat::Millis
        } else {
            SecondsFormat::AutoSi
        };
        dt.to_rfc3339_opts(precision, true)
    }

    fn parse(text: &str) -> UrlQueryResult<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(text)
            .map(|dt| dt.with_timezone(&Utc))
            .or_else(|_| {
                NaiveDateTime::parse_from_str(text, "%Y-%m-%dT%H:%M:%S%.f").map(|dt| dt.and_utc())
            })
            .or_else(|_| {
                NaiveDate::parse_from_str(text, "%Y-%m-%d")
                    .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
            })
            .map_err(|e| UrlQueryError::ConversionError(format!("invalid date '{text}': {e}")))
    }
}

impl UrlConverter for IsoDateConverter {
    fn name(&self) -> &'static str {
        "iso_date"
    }

    fn to_url(&self, value: Option<&FieldValue>) -> UrlQueryResult<Option<String>> {
        match value {
            None => Ok(None),
            Some(FieldValue::Date(dt)) => Ok(Some(Self::format(dt))),
            Some(other) => Err(unexpected(self, other)),
        }
    }

    fn from_url(&self, value: &QueryValue) -> UrlQueryResult<Option<FieldValue>> {
        match value {
            QueryValue::Text(text) => Self::parse(text).map(|dt| Some(FieldValue::Date(dt))),
            QueryValue::Flag => Err(UrlQueryError::ConversionError(
                "iso_date converter cannot read a bare key".to_string(),
            )),
        }
    }
}

/// Converter for integer sequences, joined with [`DELIMITER`].
///
/// An empty sequence is not written. An empty value (or a bare key) reads as
/// an empty sequence.
#[derive(Debug, Clone, Copy, Default)]
pub struct IntArrayConverter;

impl UrlConverter for IntArrayConverter {
    fn name(&self) -> &'static str {
        "int_array"
    }

    fn to_url(&self, value: Option<&FieldValue>) -> UrlQueryResult<Option<String>> {
        match value {
            None => Ok(None),
            Some(FieldValue::IntList(items)) if items.is_empty() => Ok(None),
            Some(FieldValue::IntList(items)) => Ok(Some(
                items
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(&DELIMITER.to_string()),
            )),
            Some(other) => Err(unexpected(self, other)),
        }
    }

    fn from_url(&self, value: &QueryValue) -> UrlQueryResult<Option<FieldValue>> {
        let items = match value.as_text() {
            None | Some("") => Vec::new(),
            Some(text) => text
                .split(DELIMITER)
                .map(parse_int)
                .collect::<UrlQueryResult<Vec<_>>>()?,
        };
        Ok(Some(FieldValue::IntList(items)))
    }
}

/// Converter for string sequences, joined with [`DELIMITER`].
///
/// Elements containing the delimiter do not survive a round trip.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringArrayConverter;

impl UrlConverter for StringArrayConverter {
    fn name(&self) -> &'static str {
        "string_array"
    }

    fn to_url(&self, value: Option<&FieldValue>) -> UrlQueryResult<Option<String>> {
        match value {
            None => Ok(None),
            Some(FieldValue::StrList(items)) if items.is_empty() => Ok(None),
            Some(FieldValue::StrList(items)) => Ok(Some(items.join(&DELIMITER.to_string()))),
            Some(other) => Err(unexpected(self, other)),
        }
    }

    fn from_url(&self, value: &QueryValue) -> UrlQueryResult<Option<FieldValue>> {
        let items = match value.as_text() {
            None | Some("") => Vec::new(),
            Some(text) => text.split(DELIMITER).map(str::to_string).collect(),
        };
        Ok(Some(FieldValue::StrList(items)))
    }
}

/// Creates a boxed converter for the given short name.
///
/// # Supported names
///
/// - `"string"` -> [`StringConverter`]
/// - `"int"` -> [`IntConverter`]
/// - `"bool"` -> [`BoolConverter`]
/// - `"iso_date"` -> [`IsoDateConverter`]
/// - `"int_array"` -> [`IntArrayConverter`]
/// - `"string_array"` -> [`StringArrayConverter`]
///
/// # Errors
///
/// Returns [`UrlQueryError::ConfigurationError`] if the name is not recognized.
pub fn get_converter(name: &str) -> UrlQueryResult<Box<dyn UrlConverter>> {
    match name {
        "string" => Ok(Box::new(StringConverter)),
        "int" => Ok(Box::new(IntConverter)),
        "bool" => Ok(Box::new(BoolConverter)),
        "iso_date" => Ok(Box::new(IsoDateConverter)),
        "int_array" => Ok(Box::new(IntArrayConverter)),
        "string_array" => Ok(Box::new(StringArrayConverter)),
        _ => Err(UrlQueryError::ConfigurationError(format!(
            "Unknown query converter: {name}"
        ))),
    }
}
