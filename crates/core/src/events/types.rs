use serde::Deserialize;

use super::error::{EventError, Result};

/// What happened to a book on the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookAction {
    Add,
    Delete,
    /// Any action this client does not react to (e.g. "update").
    #[default]
    #[serde(other)]
    Other,
}

/// A message received on the live channel.
///
/// Payloads look like `{"type": "book_update", "action": "add", ...}`.
/// Extra fields are ignored; unknown types decode to [`LiveEvent::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LiveEvent {
    BookUpdate {
        #[serde(default)]
        action: BookAction,
    },
    #[serde(other)]
    Other,
}

impl LiveEvent {
    /// Returns true if this event means the catalog listing is stale.
    pub fn invalidates_catalog(&self) -> bool {
        matches!(
            self,
            LiveEvent::BookUpdate {
                action: BookAction::Add | BookAction::Delete
            }
        )
    }
}

/// Parses a text frame from the live channel.
pub fn parse_live_event(text: &str) -> Result<LiveEvent> {
    serde_json::from_str(text).map_err(|e| EventError::Malformed(e.to_string()))
}
