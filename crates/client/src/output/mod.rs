//! Output formatting for the CLI.
//!
//! JSON output is one document per line so `watch` can be piped into
//! line-oriented tools.

pub mod pretty;

use serde::Serialize;

/// Serializes a value as a single line of JSON.
pub fn format_json<T: Serialize>(value: &T) -> serde_json::Result<String> {
    serde_json::to_string(value)
}
