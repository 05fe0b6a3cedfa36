//! Genre API operations.

use reqwest::Method;
use serde::Deserialize;

use super::CatalogClient;
use crate::error::Result;
use catalog_core::catalog::Genre;

/// Body returned by the genre endpoint.
#[derive(Debug, Deserialize)]
struct GenreBody {
    name: String,
}

impl CatalogClient {
    /// Get a genre by ID.
    pub async fn get_genre(&self, id: i64) -> Result<Genre> {
        let response = self
            .request(Method::GET, &format!("/lb/genre/{}/", id))
            .send()
            .await?;
        let body: GenreBody = self
            .handle_response(response, format!("genre {}", id))
            .await?;
        Ok(Genre {
            id,
            name: body.name,
        })
    }
}
