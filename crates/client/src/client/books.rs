//! Book API operations.

use reqwest::Method;

use super::CatalogClient;
use crate::error::Result;
use catalog_core::catalog::{Book, FilterState};

impl CatalogClient {
    /// List books matching a filter.
    pub async fn list_books(&self, filter: &FilterState) -> Result<Vec<Book>> {
        let response = self
            .request(Method::GET, "/lb/filter/")
            .query(&filter.to_query())
            .send()
            .await?;
        self.handle_response(response, "book list").await
    }

    /// Delete a book by ID.
    ///
    /// Local state is not touched; the live channel reports the deletion.
    pub async fn delete_book(&self, id: i64) -> Result<()> {
        let response = self
            .request(Method::DELETE, &format!("/lb/delete_book/{}/", id))
            .send()
            .await?;
        self.handle_delete_response(response, format!("book {}", id))
            .await
    }
}
