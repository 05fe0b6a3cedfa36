//! Catalog fetch orchestration.
//!
//! A load fetches the filtered listing, resolves each distinct genre once
//! through the [`GenreCache`], and publishes the enriched snapshot on a
//! `watch` channel. Loads may overlap; every load takes a sequence number
//! when it is issued and a result is only published if no newer load has
//! already published. A closed catalog publishes nothing further.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;

use futures_util::future::join_all;
use tokio::sync::watch;

use super::genres::GenreCache;
use super::live::Invalidate;
use crate::api::CatalogApi;
use crate::error::Result;
use catalog_core::catalog::{distinct_genre_ids, CatalogSnapshot, FilterState};

struct Inner<A: ?Sized> {
    api: Arc<A>,
    genres: GenreCache<A>,
    filter: watch::Sender<FilterState>,
    snapshot: watch::Sender<CatalogSnapshot>,
    next_seq: AtomicU64,
    closed: AtomicBool,
}

/// Filter-driven catalog loader with enrichment and ordered publication.
///
/// Cloning is cheap; clones share the same cache, filter, and snapshot.
pub struct Catalog<A: ?Sized> {
    inner: Arc<Inner<A>>,
}

impl<A: ?Sized> Clone for Catalog<A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<A> Catalog<A>
where
    A: CatalogApi + ?Sized,
{
    /// Creates a catalog over the given API and genre cache.
    pub fn new(api: Arc<A>, genres: GenreCache<A>) -> Self {
        let (filter, _) = watch::channel(FilterState::default());
        let (snapshot, _) = watch::channel(CatalogSnapshot::default());
        Self {
            inner: Arc::new(Inner {
                api,
                genres,
                filter,
                snapshot,
                next_seq: AtomicU64::new(0),
                closed: AtomicBool::new(false),
            }),
        }
    }

    /// Returns the filter that refreshes will use.
    pub fn filter(&self) -> FilterState {
        self.inner.filter.borrow().clone()
    }

    /// Replaces the current filter without loading.
    pub fn replace_filter(&self, filter: FilterState) {
        self.inner.filter.send_replace(filter);
    }

    /// Replaces the current filter and loads with it.
    pub async fn set_filter(&self, filter: FilterState) -> Result<Option<CatalogSnapshot>> {
        self.replace_filter(filter.clone());
        self.load_catalog(&filter).await
    }

    /// Reloads with whatever filter is current at call time.
    pub async fn refresh(&self) -> Result<Option<CatalogSnapshot>> {
        let filter = self.filter();
        self.load_catalog(&filter).await
    }

    /// Subscribes to published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.inner.snapshot.subscribe()
    }

    /// Returns the most recently published snapshot.
    pub fn current(&self) -> CatalogSnapshot {
        self.inner.snapshot.borrow().clone()
    }

    /// Returns the genre cache shared by every load.
    pub fn genres(&self) -> &GenreCache<A> {
        &self.inner.genres
    }

    /// Loads the catalog for `filter` and publishes the enriched result.
    ///
    /// Returns `Ok(Some(snapshot))` when this load was published and
    /// `Ok(None)` when a newer load had already published or the catalog is
    /// closed. A failed listing request publishes nothing and leaves the
    /// previous snapshot in place.
    pub async fn load_catalog(&self, filter: &FilterState) -> Result<Option<CatalogSnapshot>> {
        let seq = self.next_seq();
        self.load_with_seq(seq, filter).await
    }

    /// Stops publication. Loads still in flight finish without publishing.
    pub fn close(&self) {
        if !self.inner.closed.swap(true, Ordering::SeqCst) {
            tracing::debug!("Catalog closed");
        }
    }

    /// Returns true once [`Catalog::close`] has been called.
    pub fn is_closed(&self) -> bool {
        self.inner.closed.load(Ordering::SeqCst)
    }

    fn next_seq(&self) -> u64 {
        self.inner.next_seq.fetch_add(1, Ordering::SeqCst) + 1
    }

    async fn load_with_seq(
        &self,
        seq: u64,
        filter: &FilterState,
    ) -> Result<Option<CatalogSnapshot>> {
        tracing::debug!(seq, ?filter, "Loading catalog");

        let books = match self.inner.api.list_books(filter).await {
            Ok(books) => books,
            Err(err) => {
                tracing::error!(seq, error = %err, "Failed to load catalog");
                return Err(err);
            }
        };

        let genre_ids = distinct_genre_ids(&books);
        let genres = join_all(genre_ids.into_iter().map(|id| async move {
            let name = self.inner.genres.resolve(id).await;
            (id, name)
        }))
        .await
        .into_iter()
        .collect();

        let snapshot = CatalogSnapshot { seq, books, genres };

        let published = self.inner.snapshot.send_if_modified(|current| {
            if seq > current.seq && !self.inner.closed.load(Ordering::SeqCst) {
                *current = snapshot.clone();
                true
            } else {
                false
            }
        });

        if published {
            tracing::debug!(seq, books = snapshot.books.len(), "Catalog published");
            Ok(Some(snapshot))
        } else {
            tracing::debug!(seq, "Discarding stale catalog load");
            Ok(None)
        }
    }

    /// Deletes a book on the server.
    ///
    /// The published snapshot is left alone; it converges through the live
    /// channel or the next refresh.
    pub async fn delete_book(&self, id: i64) -> Result<()> {
        match self.inner.api.delete_book(id).await {
            Ok(()) => {
                tracing::info!(book_id = id, "Book deleted");
                Ok(())
            }
            Err(err) => {
                tracing::error!(book_id = id, error = %err, "Failed to delete book");
                Err(err)
            }
        }
    }
}

impl<A> Invalidate for Catalog<A>
where
    A: CatalogApi + ?Sized + 'static,
{
    fn invalidate(&self) {
        if self.is_closed() {
            return;
        }
        // Filter and sequence number are both taken when the event arrives,
        // so a filter change issued afterwards outranks this refetch.
        let filter = self.filter();
        let seq = self.next_seq();
        let catalog = self.clone();
        tokio::spawn(async move {
            if let Err(err) = catalog.load_with_seq(seq, &filter).await {
                tracing::debug!(error = %err, "Refetch after invalidation failed");
            }
        });
    }
}
