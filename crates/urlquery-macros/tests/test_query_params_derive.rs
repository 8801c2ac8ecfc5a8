//! Integration tests for `#[derive(QueryParams)]`.
//!
//! These tests verify the generated field tables and field access, and run
//! derived types through the mapping engine.

use chrono::{DateTime, TimeZone, Utc};
use urlquery_macros::QueryParams;
use urlquery_params::converters::StringConverter;
use urlquery_params::{
    from_query_string, registered_fields, to_query_map, to_query_string, FieldAccess, FieldValue,
    QueryMap, QueryParams as QueryParamsTrait, QueryValue, UrlConverter, UrlQueryError,
    UrlQueryResult,
};

// ── Every built-in converter ────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, QueryParams)]
pub struct Search {
    #[query_param(converter = "iso_date", url_key = "stTm")]
    pub start_time: Option<DateTime<Utc>>,

    #[query_param(converter = "int", url_key = "pg")]
    pub page_number: i64,

    #[query_param(converter = "string")]
    pub title: String,

    #[query_param(converter = "bool")]
    pub exact: bool,

    #[query_param(converter = "int_array")]
    pub ids: Vec<i64>,

    #[query_param(converter = "string_array")]
    pub tags: Vec<String>,

    #[query_param(converter = "int", read_only)]
    pub total: u32,

    pub cached: Vec<u8>,
}

#[test]
fn test_query_fields_in_declaration_order() {
    let fields: Vec<_> = Search::query_fields()
        .into_iter()
        .map(|f| f.into_descriptor().unwrap())
        .collect();
    let keys: Vec<_> = fields.iter().map(|d| d.url_key.as_str()).collect();
    assert_eq!(keys, vec!["stTm", "pg", "title", "exact", "ids", "tags", "total"]);

    let names: Vec<_> = fields.iter().map(|d| d.field_name.as_str()).collect();
    assert_eq!(
        names,
        vec!["start_time", "page_number", "title", "exact", "ids", "tags", "total"]
    );
}

#[test]
fn test_read_only_flag() {
    let fields: Vec<_> = Search::query_fields()
        .into_iter()
        .map(|f| f.into_descriptor().unwrap())
        .collect();
    assert!(fields.iter().filter(|d| d.read_only).all(|d| d.field_name == "total"));
    assert_eq!(fields.iter().filter(|d| d.read_only).count(), 1);
}

#[test]
fn test_converters_resolved() {
    let names: Vec<_> = Search::query_fields()
        .into_iter()
        .map(|f| f.into_descriptor().unwrap().converter.unwrap().name())
        .collect();
    assert_eq!(
        names,
        vec!["iso_date", "int", "string", "bool", "int_array", "string_array", "int"]
    );
}

#[test]
fn test_field_access() {
    let mut search = Search::default();
    search.set_field("page_number", FieldValue::Int(4)).unwrap();
    search
        .set_field("tags", FieldValue::StrList(vec!["x".into()]))
        .unwrap();
    assert_eq!(search.page_number, 4);
    assert_eq!(search.field("tags"), Some(FieldValue::StrList(vec!["x".into()])));
    assert_eq!(search.field("start_time"), None);
}

#[test]
fn test_unmapped_field_is_not_accessible() {
    let mut search = Search::default();
    assert_eq!(search.field("cached"), None);
    assert!(matches!(
        search.set_field("cached", FieldValue::IntList(vec![])),
        Err(UrlQueryError::FieldError(_))
    ));
}

#[test]
fn test_set_field_type_mismatch() {
    let mut search = Search::default();
    assert!(search.set_field("exact", FieldValue::Int(1)).is_err());
    assert!(search.set_field("total", FieldValue::Int(-1)).is_err());
}

#[test]
fn test_round_trip() {
    let search = Search {
        start_time: Some(Utc.with_ymd_and_hms(2019, 12, 31, 23, 59, 59).unwrap()),
        page_number: 2,
        title: "maps".into(),
        exact: true,
        ids: vec![10, 20],
        tags: vec!["a".into(), "b".into()],
        total: 0,
        cached: Vec::new(),
    };
    let query = to_query_string(&search).unwrap();
    assert_eq!(
        query,
        "stTm=2019-12-31T23:59:59.000Z&pg=2&title=maps&exact=t&ids=10;20&tags=a;b"
    );
    let decoded: Search = from_query_string(&query).unwrap();
    assert_eq!(decoded, search);
}

#[test]
fn test_read_only_never_written() {
    let decoded: Search = from_query_string("total=12").unwrap();
    assert_eq!(decoded.total, 12);
    assert!(!to_query_map(&decoded).unwrap().contains_key("total"));
}

// ── Custom converter path ───────────────────────────────────────────────

/// Upper-cases on write, lower-cases on read.
#[derive(Debug, Default)]
pub struct ShoutConverter;

impl UrlConverter for ShoutConverter {
    fn name(&self) -> &'static str {
        "shout"
    }

    fn to_url(&self, value: Option<&FieldValue>) -> UrlQueryResult<Option<String>> {
        Ok(match value {
            Some(FieldValue::Str(s)) => Some(s.to_uppercase()),
            _ => None,
        })
    }

    fn from_url(&self, value: &QueryValue) -> UrlQueryResult<Option<FieldValue>> {
        Ok(value.as_text().map(|s| FieldValue::Str(s.to_lowercase())))
    }
}

#[derive(Debug, Default, PartialEq, QueryParams)]
pub struct Custom {
    #[query_param(converter = "ShoutConverter", url_key = "w")]
    pub word: String,

    #[query_param(converter = "urlquery_params::converters::StringConverter")]
    pub other: Option<String>,
}

#[test]
fn test_custom_converter_path() {
    let value = Custom {
        word: "hello".into(),
        other: Some("x".into()),
    };
    assert_eq!(to_query_string(&value).unwrap(), "w=HELLO&other=x");

    let mut map = QueryMap::new();
    map.insert("w", "LOUD");
    let decoded: Custom = urlquery_params::from_query_map(&map).unwrap();
    assert_eq!(decoded.word, "loud");
    assert_eq!(decoded.other, None);
    assert_eq!(StringConverter.name(), "string");
}

// ── No mapped fields ────────────────────────────────────────────────────

#[derive(Debug, Default, QueryParams)]
pub struct Empty {
    pub ignored: i64,
}

#[test]
fn test_empty_struct() {
    assert!(Empty::query_fields().is_empty());
    assert_eq!(to_query_string(&Empty { ignored: 5 }).unwrap(), "");
}

// ── Lookup before first use ─────────────────────────────────────────────

#[derive(Debug, Default, QueryParams)]
pub struct Pager {
    #[query_param(converter = "int", url_key = "pg")]
    pub page: i64,
}

#[test]
fn test_registered_fields_before_any_mapping() {
    let fields = registered_fields::<Pager>().unwrap();
    assert_eq!(fields.len(), 1);
    assert_eq!(fields[0].field_name, "page");
    assert_eq!(fields[0].url_key, "pg");

    assert_eq!(to_query_string(&Pager { page: 7 }).unwrap(), "pg=7");
    assert_eq!(registered_fields::<Pager>().unwrap().len(), 1);
}

// ── Crate path override ─────────────────────────────────────────────────

mod reexported {
    pub use urlquery_params as params;
}

#[derive(Debug, Default, QueryParams)]
#[query_params(crate = "reexported::params")]
pub struct ThroughReexport {
    #[query_param(converter = "bool", url_key = "on")]
    pub enabled: bool,
}

#[test]
fn test_crate_path_override() {
    let value = ThroughReexport { enabled: true };
    assert_eq!(to_query_string(&value).unwrap(), "on=t");
}
