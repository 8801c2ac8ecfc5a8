//! # urlquery-core
//!
//! Core types, settings, logging, and error types shared by every urlquery crate.
//! This crate has no urlquery dependencies and provides the foundation for all
//! other crates.
//!
//! ## Modules
//!
//! - [`error`] - Error types and result aliases
//! - [`utils`] - Utility functions (order-insensitive array equality)
//! - [`settings`] - Settings and global configuration
//! - [`settings_loader`] - Loading settings from TOML, JSON, and the environment
//! - [`logging`] - Tracing-based logging integration

pub mod error;
pub mod logging;
pub mod settings;
pub mod settings_loader;
pub mod utils;

// Re-export the most commonly used types at the crate root.
pub use error::{UrlQueryError, UrlQueryResult};
pub use settings::{Settings, SETTINGS};
