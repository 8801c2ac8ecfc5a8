//! Logging integration for urlquery.
//!
//! Provides helpers for configuring [`tracing`]-based logging from
//! [`Settings`](crate::settings::Settings) and for creating per-type spans
//! around mapping operations.

use crate::settings::Settings;

/// Sets up the global tracing subscriber based on the given settings.
///
/// The log level is read from `settings.log_level` (e.g. "debug", "info", "warn",
/// "error"). In debug mode a pretty, human-readable format is used; otherwise
/// a structured JSON format is used.
///
/// Calling this more than once is harmless: later calls leave the first
/// subscriber in place.
pub fn setup_logging(settings: &Settings) {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_new(&settings.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

    if settings.debug {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_thread_ids(false)
            .with_file(true)
            .with_line_number(true)
            .with_writer(std::io::stderr)
            .pretty()
            .try_init()
            .ok();
    } else {
        fmt::Subscriber::builder()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .json()
            .try_init()
            .ok();
    }
}

/// Creates a tracing span for a mapping operation on one target type.
///
/// # Examples
///
/// ```
/// use urlquery_core::logging::type_span;
///
/// let span = type_span("my_crate::SearchQuery");
/// let _guard = span.enter();
/// tracing::debug!("mapping fields");
/// ```
pub fn type_span(type_name: &str) -> tracing::Span {
    tracing::debug_span!("urlquery", target_type = type_name)
}
