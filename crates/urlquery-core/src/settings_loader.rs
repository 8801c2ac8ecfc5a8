//! Loading [`Settings`] from files and the environment.
//!
//! Settings files are TOML or JSON. Keys a file leaves out keep their
//! default value, so a file only needs to name what it changes. Environment
//! variables are applied last and win over both.
//!
//! | Env Var | Setting |
//! |---|---|
//! | `URLQUERY_DEBUG` | `debug` |
//! | `URLQUERY_LOG_LEVEL` | `log_level` |
//! | `URLQUERY_PRETTY_JSON` | `pretty_json` |
//! | `URLQUERY_DEFAULT_ENCODING` | `default_encoding` |
//!
//! ```rust,no_run
//! use urlquery_core::settings_loader;
//!
//! let settings = settings_loader::from_toml_file_with_env("urlquery.toml")?;
//! # Ok::<(), urlquery_core::UrlQueryError>(())
//! ```

use std::fmt;
use std::path::Path;

use crate::error::{UrlQueryError, UrlQueryResult};
use crate::settings::Settings;

const ENV_DEBUG: &str = "URLQUERY_DEBUG";
const ENV_LOG_LEVEL: &str = "URLQUERY_LOG_LEVEL";
const ENV_PRETTY_JSON: &str = "URLQUERY_PRETTY_JSON";
const ENV_DEFAULT_ENCODING: &str = "URLQUERY_DEFAULT_ENCODING";

/// A settings file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    Toml,
    Json,
}

impl SettingsFormat {
    /// Picks the format from a file extension: `.json` is JSON, anything
    /// else is TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension() {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Toml,
        }
    }

    /// Parses a settings document in this format.
    pub fn parse(self, source: &str) -> UrlQueryResult<Settings> {
        let parsed = match self {
            Self::Toml => toml::from_str(source).map_err(|e| e.to_string()),
            Self::Json => serde_json::from_str(source).map_err(|e| e.to_string()),
        };
        parsed.map_err(|e| UrlQueryError::ConfigurationError(format!("invalid {self} settings: {e}")))
    }

    /// Reads and parses a settings file in this format.
    pub fn load(self, path: &Path) -> UrlQueryResult<Settings> {
        let source = std::fs::read_to_string(path).map_err(|e| {
            UrlQueryError::ConfigurationError(format!(
                "cannot read {self} settings file '{}': {e}",
                path.display()
            ))
        })?;
        tracing::debug!(path = %path.display(), format = %self, "loading settings");
        self.parse(&source)
    }
}

impl fmt::Display for SettingsFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Toml => "TOML",
            Self::Json => "JSON",
        })
    }
}

/// Parses settings from a TOML string.
pub fn from_toml_str(source: &str) -> UrlQueryResult<Settings> {
    SettingsFormat::Toml.parse(source)
}

/// Parses settings from a JSON string.
pub fn from_json_str(source: &str) -> UrlQueryResult<Settings> {
    SettingsFormat::Json.parse(source)
}

/// Loads settings from a TOML file.
pub fn from_toml_file(path: impl AsRef<Path>) -> UrlQueryResult<Settings> {
    SettingsFormat::Toml.load(path.as_ref())
}

/// Loads settings from a JSON file.
pub fn from_json_file(path: impl AsRef<Path>) -> UrlQueryResult<Settings> {
    SettingsFormat::Json.load(path.as_ref())
}

/// Loads settings from a TOML file, then applies environment overrides.
pub fn from_toml_file_with_env(path: impl AsRef<Path>) -> UrlQueryResult<Settings> {
    with_env(from_toml_file(path)?)
}

/// Loads settings from a file whose format is picked by
/// [`SettingsFormat::from_path`], then applies environment overrides.
pub fn from_file_with_env(path: impl AsRef<Path>) -> UrlQueryResult<Settings> {
    let path = path.as_ref();
    with_env(SettingsFormat::from_path(path).load(path)?)
}

/// Default settings with environment overrides applied.
pub fn from_env() -> Settings {
    let mut settings = Settings::default();
    apply_env_overrides(&mut settings);
    settings
}

/// Overwrites settings from `URLQUERY_*` environment variables.
///
/// Booleans accept `true`, `1` and `yes` (any case) as true and anything
/// else as false. A blank `URLQUERY_DEFAULT_ENCODING` is ignored.
pub fn apply_env_overrides(settings: &mut Settings) {
    if let Some(value) = env_var(ENV_DEBUG) {
        settings.debug = is_truthy(&value);
    }
    if let Some(value) = env_var(ENV_LOG_LEVEL) {
        settings.log_level = value;
    }
    if let Some(value) = env_var(ENV_PRETTY_JSON) {
        settings.pretty_json = is_truthy(&value);
    }
    if let Some(value) = env_var(ENV_DEFAULT_ENCODING) {
        let value = value.trim();
        if !value.is_empty() {
            settings.default_encoding = value.to_string();
        }
    }
}

fn with_env(mut settings: Settings) -> UrlQueryResult<Settings> {
    apply_env_overrides(&mut settings);
    Ok(settings)
}

fn env_var(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

fn is_truthy(value: &str) -> bool {
    ["true", "1", "yes"]
        .iter()
        .any(|t| value.trim().eq_ignore_ascii_case(t))
}
