//! Remote catalog operations used by the view-model.
//!
//! The view-model only depends on this trait, so tests can drive it with
//! in-process fakes instead of a live server.

use async_trait::async_trait;

use crate::client::CatalogClient;
use crate::error::Result;
use catalog_core::catalog::{Book, FilterState, Genre};

/// Remote operations the catalog view needs.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// Lists books matching a filter.
    async fn list_books(&self, filter: &FilterState) -> Result<Vec<Book>>;

    /// Looks up a genre by its ID.
    async fn get_genre(&self, id: i64) -> Result<Genre>;

    /// Deletes a book by its ID.
    async fn delete_book(&self, id: i64) -> Result<()>;
}

#[async_trait]
impl CatalogApi for CatalogClient {
    async fn list_books(&self, filter: &FilterState) -> Result<Vec<Book>> {
        CatalogClient::list_books(self, filter).await
    }

    async fn get_genre(&self, id: i64) -> Result<Genre> {
        CatalogClient::get_genre(self, id).await
    }

    async fn delete_book(&self, id: i64) -> Result<()> {
        CatalogClient::delete_book(self, id).await
    }
}
