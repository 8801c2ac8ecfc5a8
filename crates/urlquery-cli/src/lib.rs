//! # urlquery-cli
//!
//! Command-line tooling for urlquery.
//!
//! This crate provides:
//!
//! - **Commands** - A small framework for defining and registering CLI
//!   commands, plus the built-in `url`, `query`, `decode`, `encode` and
//!   `read` commands
//! - **Serialization** - Compact or pretty JSON output, chosen by settings
//!
//! ## Quick Start
//!
//! ```rust
//! use urlquery_cli::command::CommandRegistry;
//! use urlquery_cli::commands::register_builtin_commands;
//!
//! let mut registry = CommandRegistry::new();
//! register_builtin_commands(&mut registry);
//!
//! let names = registry.list_commands();
//! assert!(names.contains(&"url"));
//! assert!(names.contains(&"decode"));
//! ```

// These clippy lints are intentionally allowed:
// - doc_markdown: backtick requirements for documentation items are too strict
// - missing_const_for_fn: some functions may gain runtime logic later
// - unused_async: command handlers maintain consistent async signatures
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::unused_async)]

pub mod command;
pub mod commands;
pub mod serialization;

// Re-export primary types at the crate root for convenience.
pub use command::{load_settings, CommandRegistry, ManagementCommand};
pub use serialization::{serializer_for, JsonSerializer, PrettyJsonSerializer, Serializer};
