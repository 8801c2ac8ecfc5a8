//! Raw query-string codec.
//!
//! [`QueryMap`] is the flat, ordered key/value mapping that query strings are
//! parsed into and rendered from. Unlike a form-data dictionary it keeps
//! one value per key and performs **no** percent-decoding or escaping:
//! `a=1&b` parses to `{a: "1", b: true}` and values are rendered verbatim.
//! Values containing `&` or `=` therefore do not survive a round trip.

use std::fmt;

use indexmap::map::{IntoIter, Iter, Keys};
use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeMap, Serializer};

/// A single value in a [`QueryMap`].
///
/// A token with an `=` carries the text after the first `=`; a bare key
/// (no `=`) is a [`Flag`](QueryValue::Flag), the boolean `true`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum QueryValue {
    /// The raw text after the first `=`.
    Text(String),
    /// A bare key with no `=`.
    Flag,
}

impl QueryValue {
    /// Returns the text of a [`Text`](QueryValue::Text) value.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::Flag => None,
        }
    }

    /// Returns `true` for a bare key.
    pub const fn is_flag(&self) -> bool {
        matches!(self, Self::Flag)
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Flag => f.write_str("true"),
        }
    }
}

impl From<String> for QueryValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for QueryValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl Serialize for QueryValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Text(text) => serializer.serialize_str(text),
            Self::Flag => serializer.serialize_bool(true),
        }
    }
}

/// An ordered mapping from query keys to [`QueryValue`]s.
///
/// Keys keep the position of their first insertion; inserting an existing
/// key replaces its value in place.
///
/// # Examples
///
/// ```
/// use urlquery_http::{QueryMap, QueryValue};
///
/// let map = QueryMap::parse("a=1&b");
/// assert_eq!(map.get_text("a"), Some("1"));
/// assert_eq!(map.get("b"), Some(&QueryValue::Flag));
///
/// let mut out = QueryMap::new();
/// out.insert("a", "1");
/// out.insert("b", "2");
/// assert_eq!(out.to_query_string(), "a=1&b=2");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryMap {
    entries: IndexMap<String, QueryValue>,
}

impl QueryMap {
    /// Creates a new, empty `QueryMap`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a raw query string (without the leading `?`).
    ///
    /// The input is split on `&` and each token once on `=`. Values are kept
    /// verbatim (not percent-decoded). Empty tokens are skipped, and a
    /// repeated key keeps its last value.
    pub fn parse(query: &str) -> Self {
        let mut map = Self::new();

        for token in query.split('&') {
            if token.is_empty() {
                continue;
            }

            match token.split_once('=') {
                Some((key, value)) => map.insert(key, value),
                None => map.insert(token, QueryValue::Flag),
            };
        }

        map
    }

    /// Renders the mapping as `key=value` pairs joined by `&`, in order.
    ///
    /// Nothing is escaped. A [`Flag`](QueryValue::Flag) renders as `true`.
    pub fn to_query_string(&self) -> String {
        self.to_string()
    }

    /// Returns the value for the given key, or `None` if not present.
    pub fn get(&self, key: &str) -> Option<&QueryValue> {
        self.entries.get(key)
    }

    /// Returns the text value for the given key, or `None` if the key is
    /// absent or a bare flag.
    pub fn get_text(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(QueryValue::as_text)
    }

    /// Inserts a value, returning the previous value for the key if any.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<QueryValue>,
    ) -> Option<QueryValue> {
        self.entries.insert(key.into(), value.into())
    }

    /// Removes a key, preserving the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<QueryValue> {
        self.entries.shift_remove(key)
    }

    /// Returns `true` if the specified key is present.
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Returns the number of keys.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the mapping contains no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns an iterator over the keys, in order.
    pub fn keys(&self) -> Keys<'_, String, QueryValue> {
        self.entries.keys()
    }

    /// Returns an iterator over `(key, value)` pairs, in order.
    pub fn iter(&self) -> Iter<'_, String, QueryValue> {
        self.entries.iter()
    }
}

impl fmt::Display for QueryMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.entries.iter().enumerate() {
            if i > 0 {
                f.write_str("&")?;
            }
            write!(f, "{key}={value}")?;
        }
        Ok(())
    }
}

impl<K: Into<String>, V: Into<QueryValue>> FromIterator<(K, V)> for QueryMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl IntoIterator for QueryMap {
    type Item = (String, QueryValue);
    type IntoIter = IntoIter<String, QueryValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a QueryMap {
    type Item = (&'a String, &'a QueryValue);
    type IntoIter = Iter<'a, String, QueryValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

impl Serialize for QueryMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
