//! Settings for urlquery.
//!
//! This module provides the [`Settings`] struct, which holds the configuration
//! of the logging layer, the management CLI, and the file reader, and
//! [`LazySettings`], a globally-accessible, lazily-initialized settings
//! instance.
//!
//! None of these settings alter how fields are mapped to and from query
//! strings: the list delimiter, the boolean literal, and the no-escaping
//! rule are fixed.

use std::collections::HashMap;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::error::{UrlQueryError, UrlQueryResult};

/// The file reader encoding used when neither the caller nor the settings
/// name one.
pub const DEFAULT_ENCODING: &str = "utf-8";

/// The complete set of urlquery settings.
///
/// # Examples
///
/// ```
/// use urlquery_core::settings::Settings;
///
/// let settings = Settings::default();
/// assert!(settings.debug);
/// assert_eq!(settings.log_level, "info");
/// ```
///
/// Keys missing from a deserialized document keep their default value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Pretty logs instead of JSON logs.
    pub debug: bool,

    /// The log level filter (e.g. "info", "debug", "urlquery_params=trace").
    pub log_level: String,

    /// Whether the CLI pretty-prints its JSON output.
    pub pretty_json: bool,

    /// The encoding used by the file reader when the caller gives none.
    pub default_encoding: String,

    /// Free-form settings for commands and embedding applications.
    pub extra: HashMap<String, serde_json::Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            debug: true,
            log_level: "info".to_string(),
            pretty_json: true,
            default_encoding: DEFAULT_ENCODING.to_string(),
            extra: HashMap::new(),
        }
    }
}

/// Process-wide settings, set once by the binary at startup.
///
/// Library code reads them through [`get`](Self::get) and falls back to
/// defaults when nothing was configured.
pub struct LazySettings {
    inner: OnceLock<Settings>,
}

impl LazySettings {
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Stores the settings.
    ///
    /// # Errors
    ///
    /// Returns [`UrlQueryError::ConfigurationError`] if settings were
    /// already configured; the first value stays in place.
    pub fn configure(&self, settings: Settings) -> UrlQueryResult<()> {
        self.inner.set(settings).map_err(|_| {
            UrlQueryError::ConfigurationError("settings are already configured".to_string())
        })
    }

    /// The configured settings, if any.
    pub fn get(&self) -> Option<&Settings> {
        self.inner.get()
    }

    pub fn is_configured(&self) -> bool {
        self.inner.get().is_some()
    }

    /// The configured file reader encoding, or the default one.
    pub fn default_encoding(&self) -> &str {
        self.get()
            .map_or(DEFAULT_ENCODING, |s| s.default_encoding.as_str())
    }
}

impl Default for LazySettings {
    fn default() -> Self {
        Self::new()
    }
}

/// The settings configured by the running binary.
pub static SETTINGS: LazySettings = LazySettings::new();
