//! Utility functions for urlquery.
//!
//! This module provides:
//! - [`array`]: Order-insensitive array equality over JSON values.

pub mod array;

pub use array::{are_equal, are_equal_by, primitive_comparison};
