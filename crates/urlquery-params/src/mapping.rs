//! The mapping engine.
//!
//! [`write_fields`] and [`read_fields`] walk a descriptor list and call each
//! field's converter. The typed entry points look the descriptors up in the
//! process-wide registry:
//!
//! - [`to_query_map`] / [`to_query_string`] serialize an object.
//! - [`from_query_map`] / [`from_query_string`] build a fresh object.

use urlquery_core::logging::type_span;
use urlquery_core::UrlQueryResult;
use urlquery_http::QueryMap;

use crate::access::{FieldAccess, QueryParams};
use crate::registry::{registry, FieldDescriptor};

/// Writes the object's fields into a fresh [`QueryMap`], in descriptor order.
///
/// Read-only descriptors and descriptors without a converter are skipped.
/// Each converter decides whether its key is emitted.
pub fn write_fields(obj: &dyn FieldAccess, fields: &[FieldDescriptor]) -> UrlQueryResult<QueryMap> {
    let mut map = QueryMap::new();

    for descriptor in fields {
        if descriptor.read_only {
            continue;
        }
        let Some(converter) = &descriptor.converter else {
            continue;
        };

        let value = obj.field(&descriptor.field_name);
        let rendered = converter.to_url(value.as_ref())?;
        tracing::trace!(
            field = %descriptor.field_name,
            converter = converter.name(),
            emitted = rendered.is_some(),
            "write field"
        );

        if let Some(text) = rendered {
            map.insert(descriptor.url_key.as_str(), text);
        }
    }

    Ok(map)
}

/// Reads every descriptor's key from `map` into `target`.
///
/// Absent keys leave their field untouched; this never fails because of a
/// missing key. Descriptors without a converter are skipped.
pub fn read_fields(
    map: &QueryMap,
    fields: &[FieldDescriptor],
    target: &mut dyn FieldAccess,
) -> UrlQueryResult<()> {
    for descriptor in fields {
        let Some(converter) = &descriptor.converter else {
            continue;
        };
        let Some(raw) = map.get(&descriptor.url_key) else {
            continue;
        };

        let decoded = converter.from_url(raw)?;
        tracing::trace!(
            field = %descriptor.field_name,
            converter = converter.name(),
            assigned = decoded.is_some(),
            "read field"
        );

        if let Some(value) = decoded {
            target.set_field(&descriptor.field_name, value)?;
        }
    }

    Ok(())
}

/// Serializes an object into a query mapping.
///
/// # Examples
///
/// ```
/// use urlquery_core::UrlQueryResult;
/// use urlquery_params::converters::IntConverter;
/// use urlquery_params::{
///     to_query_string, FieldAccess, FieldValue, FromFieldValue, QueryField, QueryParams,
///     ToFieldValue,
/// };
///
/// #[derive(Default)]
/// struct Page {
///     number: i64,
/// }
///
/// impl FieldAccess for Page {
///     fn field(&self, name: &str) -> Option<FieldValue> {
///         (name == "number").then(|| self.number.to_field_value()).flatten()
///     }
///
///     fn set_field(&mut self, _name: &str, value: FieldValue) -> UrlQueryResult<()> {
///         self.number = FromFieldValue::from_field_value(value)?;
///         Ok(())
///     }
/// }
///
/// impl QueryParams for Page {
///     fn query_fields() -> Vec<QueryField> {
///         vec![QueryField::new("number").converter::<IntConverter>().url_key("p")]
///     }
/// }
///
/// assert_eq!(to_query_string(&Page { number: 4 }).unwrap(), "p=4");
/// ```
pub fn to_query_map<T: QueryParams>(obj: &T) -> UrlQueryResult<QueryMap> {
    let _span = type_span(std::any::type_name::<T>()).entered();
    let fields = registry().fields_of::<T>()?;
    write_fields(obj, &fields)
}

/// Serializes an object into a query string.
pub fn to_query_string<T: QueryParams>(obj: &T) -> UrlQueryResult<String> {
    to_query_map(obj).map(|map| map.to_query_string())
}

/// Builds a new `T` from a query mapping.
///
/// Starts from `T::default()`; fields whose key is absent keep their default.
pub fn from_query_map<T: QueryParams>(map: &QueryMap) -> UrlQueryResult<T> {
    let _span = type_span(std::any::type_name::<T>()).entered();
    let fields = registry().fields_of::<T>()?;
    let mut result = T::default();
    read_fields(map, &fields, &mut result)?;
    Ok(result)
}

/// Builds a new `T` from a raw query string (without the leading `?`).
pub fn from_query_string<T: QueryParams>(query: &str) -> UrlQueryResult<T> {
    from_query_map(&QueryMap::parse(query))
}
