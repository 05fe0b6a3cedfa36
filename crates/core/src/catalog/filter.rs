use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::{FilterError, Result};

/// Sort order accepted by the listing endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ordering {
    #[serde(rename = "title")]
    TitleAsc,
    #[serde(rename = "-title")]
    TitleDesc,
    #[serde(rename = "id")]
    IdAsc,
    #[serde(rename = "-id")]
    IdDesc,
}

impl Ordering {
    /// Returns the wire value sent as the `ordering` query parameter.
    pub fn as_str(&self) -> &'static str {
        match self {
            Ordering::TitleAsc => "title",
            Ordering::TitleDesc => "-title",
            Ordering::IdAsc => "id",
            Ordering::IdDesc => "-id",
        }
    }
}

impl fmt::Display for Ordering {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Ordering {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "title" => Ok(Ordering::TitleAsc),
            "-title" => Ok(Ordering::TitleDesc),
            "id" => Ok(Ordering::IdAsc),
            "-id" => Ok(Ordering::IdDesc),
            other => Err(FilterError::InvalidOrdering(other.to_string())),
        }
    }
}

/// Sparse filter applied to the catalog listing.
///
/// Every field is optional. Absent fields are left out of the outgoing query
/// entirely; they are never sent as empty values.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub genre: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ordering: Option<Ordering>,
}

impl FilterState {
    /// Creates an empty filter (no parameters).
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the genre filter.
    pub fn with_genre(mut self, genre: i64) -> Self {
        self.genre = Some(genre);
        self
    }

    /// Sets the free-text search.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Sets the sort order.
    pub fn with_ordering(mut self, ordering: Ordering) -> Self {
        self.ordering = Some(ordering);
        self
    }

    /// Builds the query parameters for the listing request.
    ///
    /// Only present fields are emitted. A blank search string counts as absent.
    /// Values are not range-checked; the server decides what is valid.
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);

        if let Some(genre) = self.genre {
            params.push(("genre", genre.to_string()));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.is_empty()) {
            params.push(("search", search.to_string()));
        }
        if let Some(ordering) = self.ordering {
            params.push(("ordering", ordering.as_str().to_string()));
        }

        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(filter: &FilterState) -> Vec<&'static str> {
        filter.to_query().into_iter().map(|(k, _)| k).collect()
    }

    #[test]
    fn test_empty_filter_produces_no_params() {
        assert!(FilterState::new().to_query().is_empty());
    }

    #[test]
    fn test_full_filter_produces_all_params() {
        let filter = FilterState::new()
            .with_genre(5)
            .with_search("tolkien")
            .with_ordering(Ordering::TitleDesc);

        assert_eq!(
            filter.to_query(),
            vec![
                ("genre", "5".to_string()),
                ("search", "tolkien".to_string()),
                ("ordering", "-title".to_string()),
            ]
        );
    }

    #[test]
    fn test_key_set_matches_present_fields() {
        for genre in [None, Some(3)] {
            for search in [None, Some("dune".to_string())] {
                for ordering in [None, Some(Ordering::IdAsc)] {
                    let filter = FilterState {
                        genre,
                        search: search.clone(),
                        ordering,
                    };

                    let mut expected = Vec::new();
                    if genre.is_some() {
                        expected.push("genre");
                    }
                    if search.is_some() {
                        expected.push("search");
                    }
                    if ordering.is_some() {
                        expected.push("ordering");
                    }

                    assert_eq!(keys(&filter), expected, "filter: {:?}", filter);
                }
            }
        }
    }

    #[test]
    fn test_blank_search_is_omitted() {
        let filter = FilterState::new().with_search("");
        assert!(filter.to_query().is_empty());
    }

    #[test]
    fn test_zero_genre_is_sent() {
        // Zero is a value, not an absent field.
        let filter = FilterState::new().with_genre(0);
        assert_eq!(filter.to_query(), vec![("genre", "0".to_string())]);
    }

    #[test]
    fn test_ordering_from_str() {
        assert_eq!("title".parse::<Ordering>(), Ok(Ordering::TitleAsc));
        assert_eq!("-title".parse::<Ordering>(), Ok(Ordering::TitleDesc));
        assert_eq!("id".parse::<Ordering>(), Ok(Ordering::IdAsc));
        assert_eq!("-id".parse::<Ordering>(), Ok(Ordering::IdDesc));
        assert_eq!(
            "name".parse::<Ordering>(),
            Err(FilterError::InvalidOrdering("name".to_string()))
        );
    }

    #[test]
    fn test_ordering_serde_uses_wire_values() {
        let json = serde_json::to_string(&Ordering::IdDesc).unwrap();
        assert_eq!(json, "\"-id\"");
        let parsed: Ordering = serde_json::from_str("\"title\"").unwrap();
        assert_eq!(parsed, Ordering::TitleAsc);
    }
}
