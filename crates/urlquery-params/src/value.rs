//! Object-side field values.
//!
//! [`FieldValue`] is the currency converters use to read and write struct
//! fields without runtime reflection. [`ToFieldValue`] and [`FromFieldValue`]
//! bridge between it and concrete Rust field types; `Option<T>` models a
//! field that may be absent.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;

use urlquery_core::{UrlQueryError, UrlQueryResult};

/// The value of one mapped struct field.
///
/// # Examples
///
/// ```
/// use urlquery_params::{FieldValue, ToFieldValue};
///
/// assert_eq!(42_i64.to_field_value(), Some(FieldValue::Int(42)));
/// assert_eq!(None::<i64>.to_field_value(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    /// A string.
    Str(String),
    /// A 64-bit signed integer.
    Int(i64),
    /// A boolean.
    Bool(bool),
    /// An instant in UTC.
    Date(DateTime<Utc>),
    /// An ordered sequence of integers.
    IntList(Vec<i64>),
    /// An ordered sequence of strings.
    StrList(Vec<String>),
}

impl FieldValue {
    /// Returns a short name for the variant, used in error messages.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Str(_) => "string",
            Self::Int(_) => "integer",
            Self::Bool(_) => "boolean",
            Self::Date(_) => "date",
            Self::IntList(_) => "integer list",
            Self::StrList(_) => "string list",
        }
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(v) => f.write_str(v),
            Self::Int(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{}", v.to_rfc3339()),
            Self::IntList(v) => write!(f, "{v:?}"),
            Self::StrList(v) => write!(f, "{v:?}"),
        }
    }
}

/// Reads a Rust field as a [`FieldValue`]. `None` means the field is absent.
pub trait ToFieldValue {
    /// Returns the field's value, or `None` when it has none.
    fn to_field_value(&self) -> Option<FieldValue>;
}

/// Builds a Rust field value from a [`FieldValue`].
pub trait FromFieldValue: Sized {
    /// Converts the value, failing if the variant does not fit `Self`.
    fn from_field_value(value: FieldValue) -> UrlQueryResult<Self>;
}

fn mismatch(expected: &str, found: &FieldValue) -> UrlQueryError {
    UrlQueryError::FieldError(format!("expected {expected}, found {}", found.kind()))
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> Option<FieldValue> {
        self.as_ref().and_then(ToFieldValue::to_field_value)
    }
}

impl<T: FromFieldValue> FromFieldValue for Option<T> {
    fn from_field_value(value: FieldValue) -> UrlQueryResult<Self> {
        T::from_field_value(value).map(Some)
    }
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Str(self.clone()))
    }
}

impl FromFieldValue for String {
    fn from_field_value(value: FieldValue) -> UrlQueryResult<Self> {
        match value {
            FieldValue::Str(v) => Ok(v),
            other => Err(mismatch("string", &other)),
        }
    }
}

impl ToFieldValue for i64 {
    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Int(*self))
    }
}

impl FromFieldValue for i64 {
    fn from_field_value(value: FieldValue) -> UrlQueryResult<Self> {
        match value {
            FieldValue::Int(v) => Ok(v),
            other => Err(mismatch("integer", &other)),
        }
    }
}

macro_rules! narrow_int_field {
    ($($ty:ty),*) => {
        $(
            impl ToFieldValue for $ty {
                fn to_field_value(&self) -> Option<FieldValue> {
                    Some(FieldValue::Int(i64::from(*self)))
                }
            }

            impl FromFieldValue for $ty {
                fn from_field_value(value: FieldValue) -> UrlQueryResult<Self> {
                    match value {
                        FieldValue::Int(v) => <$ty>::try_from(v).map_err(|_| {
                            UrlQueryError::FieldError(format!(
                                "{v} is out of range for {}",
                                stringify!($ty)
                            ))
                        }),
                        other => Err(mismatch("integer", &other)),
                    }
                }
            }
        )*
    };
}

narrow_int_field!(i32, u32, i16, u16, u8);

impl ToFieldValue for bool {
    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Bool(*self))
    }
}

impl FromFieldValue for bool {
    fn from_field_value(value: FieldValue) -> UrlQueryResult<Self> {
        match value {
            FieldValue::Bool(v) => Ok(v),
            other => Err(mismatch("boolean", &other)),
        }
    }
}

impl ToFieldValue for DateTime<Utc> {
    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::Date(*self))
    }
}

impl FromFieldValue for DateTime<Utc> {
    fn from_field_value(value: FieldValue) -> UrlQueryResult<Self> {
        match value {
            FieldValue::Date(v) => Ok(v),
            other => Err(mismatch("date", &other)),
        }
    }
}

impl ToFieldValue for Vec<i64> {
    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::IntList(self.clone()))
    }
}

impl FromFieldValue for Vec<i64> {
    fn from_field_value(value: FieldValue) -> UrlQueryResult<Self> {
        match value {
            FieldValue::IntList(v) => Ok(v),
            other => Err(mismatch("integer list", &other)),
        }
    }
}

impl ToFieldValue for Vec<String> {
    fn to_field_value(&self) -> Option<FieldValue> {
        Some(FieldValue::StrList(self.clone()))
    }
}

impl FromFieldValue for Vec<String> {
    fn from_field_value(value: FieldValue) -> UrlQueryResult<Self> {
        match value {
            FieldValue::StrList(v) => Ok(v),
            other => Err(mismatch("string list", &other)),
        }
    }
}
