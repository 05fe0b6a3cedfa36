use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Label shown for a genre whose lookup failed.
pub const DEFAULT_FALLBACK_LABEL: &str = "Unknown";

/// A book as returned by the listing endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    #[serde(default)]
    pub description: String,
    /// Identifier of the genre this book belongs to.
    pub genre: i64,
}

/// A genre record. The lookup endpoint only returns the name, so the id is
/// filled in by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    #[serde(default)]
    pub id: i64,
    pub name: String,
}

/// The enriched catalog state published to subscribers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CatalogSnapshot {
    /// Sequence number of the load that produced this snapshot. Zero means
    /// nothing has been published yet.
    pub seq: u64,
    pub books: Vec<Book>,
    /// Genre display names keyed by genre id.
    pub genres: BTreeMap<i64, String>,
}

impl CatalogSnapshot {
    /// Returns true if no load has completed yet.
    pub fn is_initial(&self) -> bool {
        self.seq == 0
    }
}
