//! JSON output for commands.
//!
//! ## Serializers
//!
//! - [`JsonSerializer`] - Compact JSON serialization
//! - [`PrettyJsonSerializer`] - Pretty-printed JSON serialization
//!
//! [`serializer_for`] picks one from `Settings::pretty_json`.

use urlquery_core::{Settings, UrlQueryResult};

/// Renders command results as text.
pub trait Serializer: Send + Sync {
    /// Serializes a JSON value into a string.
    fn serialize(&self, value: &serde_json::Value) -> UrlQueryResult<String>;
}

/// Compact JSON serializer.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonSerializer;

impl Serializer for JsonSerializer {
    fn serialize(&self, value: &serde_json::Value) -> UrlQueryResult<String> {
        Ok(serde_json::to_string(value)?)
    }
}

/// Pretty-printed JSON serializer.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrettyJsonSerializer;

impl Serializer for PrettyJsonSerializer {
    fn serialize(&self, value: &serde_json::Value) -> UrlQueryResult<String> {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// Returns the serializer selected by the settings.
pub fn serializer_for(settings: &Settings) -> Box<dyn Serializer> {
    if settings.pretty_json {
        Box::new(PrettyJsonSerializer)
    } else {
        Box::new(JsonSerializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_serializer() {
        let out = JsonSerializer.serialize(&json!({"a": "1", "b": true})).unwrap();
        assert_eq!(out, r#"{"a":"1","b":true}"#);
    }

    #[test]
    fn test_pretty_json_serializer() {
        let out = PrettyJsonSerializer.serialize(&json!({"a": 1})).unwrap();
        assert!(out.contains('\n'));
        assert!(out.contains("\"a\": 1"));
    }

    #[test]
    fn test_serializer_for_settings() {
        let mut settings = Settings::default();
        settings.pretty_json = false;
        let out = serializer_for(&settings).serialize(&json!([1, 2])).unwrap();
        assert_eq!(out, "[1,2]");

        settings.pretty_json = true;
        let out = serializer_for(&settings).serialize(&json!([1, 2])).unwrap();
        assert!(out.contains('\n'));
    }
}
