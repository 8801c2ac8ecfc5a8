//! URL decomposition.
//!
//! [`Url`] splits a URL-like string into protocol, host, port, path, query,
//! and hash with a single regular-expression match. The grammar is
//! deliberately permissive: relative references such as `/a/b?x=1` or
//! `?x=1` decompose with empty protocol and host.
//!
//! The protocol group only captures together with `://`. A scheme-less
//! `host:8080/api` therefore yields host `host` and port `8080`, not a
//! protocol named `host` with an empty host, as a grammar with an
//! independently optional `://` would give.
//!
//! | Group | Component | Notes |
//! |-------|-----------|-------|
//! | 1 | protocol | only when followed by `://` |
//! | 3 | host | up to `/`, `?`, `#`, `:` or whitespace |
//! | 5 | port | digits after `:`; absent when empty |
//! | 6 | path | up to `?` or `#` |
//! | 8 | query | up to `#`; percent-decoded |
//! | 10 | hash | the remainder |

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use urlquery_core::{UrlQueryError, UrlQueryResult};

use crate::querystring::QueryMap;

static URL_GRAMMAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:(\w*)(://))?([^\s/?#:]*)(:?)(\d*)([^\s?#]*)(\??)([^\s#]*)(#?)(\S*)")
        .expect("URL grammar is a valid regular expression")
});

/// An immutable decomposition of a URL.
///
/// # Examples
///
/// ```
/// use urlquery_http::Url;
///
/// let url = Url::parse("http://address.com:1923/the/123/path?a=1&b=2#24").unwrap();
/// assert_eq!(url.protocol(), "http");
/// assert_eq!(url.host(), "address.com");
/// assert_eq!(url.port(), Some(1923));
/// assert_eq!(url.path(), "/the/123/path");
/// assert_eq!(url.query(), "a=1&b=2");
/// assert_eq!(url.hash(), "24");
/// assert_eq!(url.path_parts(), vec!["the", "123", "path"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Url {
    protocol: String,
    host: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    port: Option<u16>,
    path: String,
    query: String,
    hash: String,
}

impl Url {
    /// Decomposes the trimmed input.
    ///
    /// # Errors
    ///
    /// Returns [`UrlQueryError::MalformedUrl`] if the input is blank, if the
    /// grammar does not cover the whole input (e.g. embedded whitespace), or
    /// if the port does not fit in a `u16`.
    pub fn parse(input: &str) -> UrlQueryResult<Self> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(UrlQueryError::MalformedUrl("empty input".to_string()));
        }

        let captures = URL_GRAMMAR
            .captures(trimmed)
            .ok_or_else(|| UrlQueryError::MalformedUrl(format!("no match for '{trimmed}'")))?;

        let matched_len = captures.get(0).map_or(0, |m| m.end());
        if matched_len != trimmed.len() {
            return Err(UrlQueryError::MalformedUrl(format!(
                "unexpected input at byte {matched_len} of '{trimmed}'"
            )));
        }

        let group = |index: usize| captures.get(index).map_or("", |m| m.as_str());

        let port = match group(5) {
            "" => None,
            digits => Some(digits.parse::<u16>().map_err(|e| {
                UrlQueryError::MalformedUrl(format!("invalid port '{digits}': {e}"))
            })?),
        };

        let query = percent_encoding::percent_decode_str(group(8))
            .decode_utf8()
            .map_err(|e| UrlQueryError::MalformedUrl(format!("invalid query encoding: {e}")))?
            .into_owned();

        Ok(Self {
            protocol: group(1).to_string(),
            host: group(3).to_string(),
            port,
            path: group(6).to_string(),
            query,
            hash: group(10).to_string(),
        })
    }

    /// Returns the protocol (scheme), or `""` when the input had none.
    pub fn protocol(&self) -> &str {
        &self.protocol
    }

    /// Returns the host, or `""` for relative references.
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Returns the port, if digits were present.
    pub const fn port(&self) -> Option<u16> {
        self.port
    }

    /// Returns the path, including its leading `/`.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Returns the percent-decoded query, without the leading `?`.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Returns the fragment, without the leading `#`.
    pub fn hash(&self) -> &str {
        &self.hash
    }

    /// Returns the non-empty `/`-separated path segments.
    pub fn path_parts(&self) -> Vec<&str> {
        self.path.split('/').filter(|part| !part.is_empty()).collect()
    }

    /// Parses the decoded query into a [`QueryMap`].
    pub fn query_map(&self) -> QueryMap {
        QueryMap::parse(&self.query)
    }
}

impl FromStr for Url {
    type Err = UrlQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Url {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.protocol.is_empty() {
            write!(f, "{}://", self.protocol)?;
        }
        f.write_str(&self.host)?;
        if let Some(port) = self.port {
            write!(f, ":{port}")?;
        }
        f.write_str(&self.path)?;
        if !self.query.is_empty() {
            write!(f, "?{}", self.query)?;
        }
        if !self.hash.is_empty() {
            write!(f, "#{}", self.hash)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decodes_a_url() {
        let url = Url::parse("http://address.com:1923/the/123/path?a=1&b=2#24").unwrap();
        assert_eq!(url.protocol(), "http");
        assert_eq!(url.host(), "address.com");
        assert_eq!(url.port(), Some(1923));
        assert_eq!(url.path(), "/the/123/path");
        assert_eq!(url.query(), "a=1&b=2");
        assert_eq!(url.hash(), "24");
    }

    #[test]
    fn test_trims_input() {
        let url = Url::parse("  https://example.org/x  ").unwrap();
        assert_eq!(url.protocol(), "https");
        assert_eq!(url.host(), "example.org");
        assert_eq!(url.path(), "/x");
    }

    #[test]
    fn test_no_port() {
        let url = Url::parse("http://example.org/path").unwrap();
        assert_eq!(url.port(), None);
    }

    #[test]
    fn test_host_with_port_without_protocol() {
        let url = Url::parse("localhost:8080/api").unwrap();
        assert_eq!(url.protocol(), "");
        assert_eq!(url.host(), "localhost");
        assert_eq!(url.port(), Some(8080));
        assert_eq!(url.path(), "/api");
    }

    #[test]
    fn test_relative_reference() {
        let url = Url::parse("/search?q=rust#top").unwrap();
        assert_eq!(url.protocol(), "");
        assert_eq!(url.host(), "");
        assert_eq!(url.path(), "/search");
        assert_eq!(url.query(), "q=rust");
        assert_eq!(url.hash(), "top");
    }

    #[test]
    fn test_query_only() {
        let url = Url::parse("?a=1&b").unwrap();
        assert_eq!(url.path(), "");
        assert_eq!(url.query(), "a=1&b");
    }

    #[test]
    fn test_query_is_percent_decoded() {
        let url = Url::parse("http://h/p?name=hello%20world&x=%3D").unwrap();
        assert_eq!(url.query(), "name=hello world&x==");
    }

    #[test]
    fn test_hash_is_verbatim() {
        let url = Url::parse("http://h/p#a%20b").unwrap();
        assert_eq!(url.hash(), "a%20b");
    }

    #[test]
    fn test_empty_input_rejected() {
        assert!(matches!(Url::parse(""), Err(UrlQueryError::MalformedUrl(_))));
        assert!(matches!(Url::parse("   "), Err(UrlQueryError::MalformedUrl(_))));
    }

    #[test]
    fn test_embedded_whitespace_rejected() {
        assert!(matches!(
            Url::parse("http://host/a path"),
            Err(UrlQueryError::MalformedUrl(_))
        ));
    }

    #[test]
    fn test_port_overflow_rejected() {
        assert!(matches!(
            Url::parse("http://host:99999/"),
            Err(UrlQueryError::MalformedUrl(_))
        ));
    }

    #[test]
    fn test_invalid_utf8_query_rejected() {
        assert!(Url::parse("http://host/?a=%FF").is_err());
    }

    #[test]
    fn test_path_parts() {
        let url = Url::parse("http://h//a/b//c/").unwrap();
        assert_eq!(url.path_parts(), vec!["a", "b", "c"]);
        let url = Url::parse("http://h").unwrap();
        assert!(url.path_parts().is_empty());
    }

    #[test]
    fn test_display_reassembles_components() {
        let input = "http://address.com:1923/the/123/path?a=1&b=2#24";
        let url = Url::parse(input).unwrap();
        assert_eq!(url.to_string(), input);
        let reparsed: Url = url.to_string().parse().unwrap();
        assert_eq!(reparsed, url);
    }

    #[test]
    fn test_display_omits_absent_parts() {
        let url = Url::parse("/only/path").unwrap();
        assert_eq!(url.to_string(), "/only/path");
    }

    #[test]
    fn test_query_map() {
        let url = Url::parse("http://h/p?page=2&all").unwrap();
        let map = url.query_map();
        assert_eq!(map.get_text("page"), Some("2"));
        assert!(map.get("all").is_some_and(crate::QueryValue::is_flag));
    }

    #[test]
    fn test_serialize_skips_missing_port() {
        let url = Url::parse("http://h/p").unwrap();
        let json = serde_json::to_value(&url).unwrap();
        assert_eq!(json["host"], "h");
        assert!(json.get("port").is_none());
    }
}
