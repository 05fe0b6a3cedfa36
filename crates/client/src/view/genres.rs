//! Per-session genre name cache.
//!
//! Each genre id is looked up at most once per session. Concurrent callers
//! asking for the same id share the single in-flight request, and a failed
//! lookup is remembered as the fallback label without retrying.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use tokio::sync::{Mutex, OnceCell};

use crate::api::CatalogApi;
use catalog_core::catalog::DEFAULT_FALLBACK_LABEL;

/// Memoizing, de-duplicating genre lookup.
pub struct GenreCache<A: ?Sized> {
    api: Arc<A>,
    /// One slot per genre id. A slot is inserted before its lookup starts, so
    /// an empty slot means "in flight" and a filled one means "settled".
    slots: Mutex<HashMap<i64, Arc<OnceCell<String>>>>,
    fallback: String,
}

impl<A> GenreCache<A>
where
    A: CatalogApi + ?Sized,
{
    /// Creates an empty cache using the default fallback label.
    pub fn new(api: Arc<A>) -> Self {
        Self::with_fallback(api, DEFAULT_FALLBACK_LABEL)
    }

    /// Creates an empty cache with a custom fallback label.
    pub fn with_fallback(api: Arc<A>, fallback: impl Into<String>) -> Self {
        Self {
            api,
            slots: Mutex::new(HashMap::new()),
            fallback: fallback.into(),
        }
    }

    /// Returns the label recorded for failed lookups.
    pub fn fallback(&self) -> &str {
        &self.fallback
    }

    /// Resolves a genre id to its display name, or the fallback label.
    pub async fn resolve(&self, id: i64) -> String {
        let slot = {
            let mut slots = self.slots.lock().await;
            slots
                .entry(id)
                .or_insert_with(|| Arc::new(OnceCell::new()))
                .clone()
        };

        slot.get_or_init(|| self.lookup(id)).await.clone()
    }

    /// Returns the settled value for an id without triggering a lookup.
    pub async fn cached(&self, id: i64) -> Option<String> {
        let slots = self.slots.lock().await;
        slots.get(&id).and_then(|slot| slot.get().cloned())
    }

    /// Returns every settled entry.
    pub async fn snapshot(&self) -> BTreeMap<i64, String> {
        let slots = self.slots.lock().await;
        slots
            .iter()
            .filter_map(|(id, slot)| slot.get().map(|name| (*id, name.clone())))
            .collect()
    }

    async fn lookup(&self, id: i64) -> String {
        match self.api.get_genre(id).await {
            Ok(genre) => {
                tracing::debug!(genre_id = id, name = %genre.name, "Genre resolved");
                genre.name
            }
            Err(err) => {
                tracing::warn!(genre_id = id, error = %err, "Genre lookup failed, using fallback");
                self.fallback.clone()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use tokio::sync::Notify;

    use crate::error::{ClientError, Result};
    use catalog_core::catalog::{Book, FilterState, Genre};

    // Mock API that counts genre lookups and can hold them until released
    struct MockGenreApi {
        calls: AtomicUsize,
        gate: Option<Arc<Notify>>,
    }

    impl MockGenreApi {
        fn new() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                gate: None,
            }
        }

        fn gated(gate: Arc<Notify>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                gate: Some(gate),
            }
        }
    }

    #[async_trait]
    impl CatalogApi for MockGenreApi {
        async fn list_books(&self, _filter: &FilterState) -> Result<Vec<Book>> {
            Ok(Vec::new())
        }

        async fn get_genre(&self, id: i64) -> Result<Genre> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if let Some(gate) = &self.gate {
                gate.notified().await;
            }
            if id == 9 {
                return Err(ClientError::NotFound {
                    resource: format!("genre {}", id),
                });
            }
            Ok(Genre {
                id,
                name: format!("Genre {}", id),
            })
        }

        async fn delete_book(&self, _id: i64) -> Result<()> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_resolve_caches_success() {
        let api = Arc::new(MockGenreApi::new());
        let cache = GenreCache::new(api.clone());

        assert_eq!(cache.resolve(5).await, "Genre 5");
        assert_eq!(cache.resolve(5).await, "Genre 5");
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
        assert_eq!(cache.cached(5).await, Some("Genre 5".to_string()));
    }

    #[tokio::test]
    async fn test_failure_records_fallback_without_retry() {
        let api = Arc::new(MockGenreApi::new());
        let cache = GenreCache::new(api.clone());

        assert_eq!(cache.resolve(9).await, "Unknown");
        assert_eq!(cache.resolve(9).await, "Unknown");
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_custom_fallback_label() {
        let api = Arc::new(MockGenreApi::new());
        let cache = GenreCache::with_fallback(api, "Неизвестно");

        assert_eq!(cache.resolve(9).await, "Неизвестно");
        assert_eq!(cache.fallback(), "Неизвестно");
    }

    #[tokio::test]
    async fn test_concurrent_resolve_issues_one_request() {
        let gate = Arc::new(Notify::new());
        let api = Arc::new(MockGenreApi::gated(gate.clone()));
        let cache = Arc::new(GenreCache::new(api.clone()));

        let first = tokio::spawn({
            let cache = cache.clone();
            async move { cache.resolve(5).await }
        });
        let second = tokio::spawn({
            let cache = cache.clone();
            async move { cache.resolve(5).await }
        });

        // Wait until the single lookup is in flight, then give the second
        // caller time to join it.
        while api.calls.load(Ordering::SeqCst) == 0 {
            tokio::task::yield_now().await;
        }
        for _ in 0..10 {
            tokio::task::yield_now().await;
        }
        assert_eq!(cache.cached(5).await, None);

        gate.notify_one();

        assert_eq!(first.await.unwrap(), "Genre 5");
        assert_eq!(second.await.unwrap(), "Genre 5");
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_snapshot_contains_only_settled_entries() {
        let api = Arc::new(MockGenreApi::new());
        let cache = GenreCache::new(api);

        cache.resolve(5).await;
        cache.resolve(9).await;

        let snapshot = cache.snapshot().await;
        assert_eq!(
            snapshot,
            BTreeMap::from([(5, "Genre 5".to_string()), (9, "Unknown".to_string())])
        );
    }
}
