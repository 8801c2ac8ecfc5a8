//! Field access by name.
//!
//! Mapping works on fields by name. [`FieldAccess`] is the object-safe half
//! that reads and writes one field; [`QueryParams`] adds the type-level
//! declaration of which fields are mapped and how. Both are normally
//! generated with `#[derive(QueryParams)]`.

use urlquery_core::UrlQueryResult;

use crate::registry::QueryField;
use crate::value::FieldValue;

/// Reads and writes the fields of an object by name.
///
/// # Examples
///
/// ```
/// use urlquery_core::{UrlQueryError, UrlQueryResult};
/// use urlquery_params::{FieldAccess, FieldValue, FromFieldValue, ToFieldValue};
///
/// #[derive(Default)]
/// struct Page {
///     number: i64,
/// }
///
/// impl FieldAccess for Page {
///     fn field(&self, name: &str) -> Option<FieldValue> {
///         match name {
///             "number" => self.number.to_field_value(),
///             _ => None,
///         }
///     }
///
///     fn set_field(&mut self, name: &str, value: FieldValue) -> UrlQueryResult<()> {
///         match name {
///             "number" => self.number = FromFieldValue::from_field_value(value)?,
///             _ => return Err(UrlQueryError::FieldError(format!("no field '{name}'"))),
///         }
///         Ok(())
///     }
/// }
///
/// let mut page = Page::default();
/// page.set_field("number", FieldValue::Int(3)).unwrap();
/// assert_eq!(page.field("number"), Some(FieldValue::Int(3)));
/// ```
pub trait FieldAccess {
    /// Returns the value of the named field, or `None` if the field is
    /// absent or unknown.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Assigns the named field.
    ///
    /// # Errors
    ///
    /// Returns [`UrlQueryError::FieldError`](urlquery_core::UrlQueryError::FieldError)
    /// if the field is unknown or the value does not fit its type.
    fn set_field(&mut self, name: &str, value: FieldValue) -> UrlQueryResult<()>;
}

/// A type whose fields map to and from query strings.
///
/// `Default` supplies the starting instance when reading; fields whose key is
/// absent keep their default value.
pub trait QueryParams: FieldAccess + Default + 'static {
    /// Declares the mapped fields, in output order.
    ///
    /// Declared fields are registered the first time the type is mapped,
    /// after any fields registered explicitly before then.
    fn query_fields() -> Vec<QueryField> {
        Vec::new()
    }
}
