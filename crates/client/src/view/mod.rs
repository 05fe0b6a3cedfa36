//! Catalog view-model.
//!
//! A [`CatalogView`] is one mounted listing session. It owns its genre cache,
//! its catalog loader, and its live channel; nothing is shared between views.

pub mod catalog;
pub mod genres;
pub mod live;

use std::sync::Arc;

use tokio::sync::watch;

pub use catalog::Catalog;
pub use genres::GenreCache;
pub use live::{ChannelState, Invalidate, LiveChannel};

use crate::api::CatalogApi;
use crate::error::Result;
use catalog_core::catalog::{CatalogSnapshot, FilterState, DEFAULT_FALLBACK_LABEL};

/// Settings for mounting a [`CatalogView`].
#[derive(Debug, Clone)]
pub struct ViewOptions {
    /// WebSocket URL of the book update feed.
    pub ws_url: String,
    /// Filter used for the initial load.
    pub filter: FilterState,
    /// Label recorded for genres that fail to resolve.
    pub fallback_label: String,
}

impl ViewOptions {
    pub fn new(ws_url: impl Into<String>) -> Self {
        Self {
            ws_url: ws_url.into(),
            filter: FilterState::default(),
            fallback_label: DEFAULT_FALLBACK_LABEL.to_string(),
        }
    }

    pub fn with_filter(mut self, filter: FilterState) -> Self {
        self.filter = filter;
        self
    }

    pub fn with_fallback_label(mut self, label: impl Into<String>) -> Self {
        self.fallback_label = label.into();
        self
    }
}

/// One mounted catalog listing.
///
/// Mounting opens the live channel and performs the first load. Teardown
/// closes the channel; dropping the view without teardown aborts it.
pub struct CatalogView<A: ?Sized> {
    catalog: Catalog<A>,
    channel: LiveChannel,
}

impl<A> CatalogView<A>
where
    A: CatalogApi + ?Sized + 'static,
{
    /// Mounts a view: opens the live channel, then loads with the initial
    /// filter. A failed initial load is logged and leaves the view empty.
    pub async fn mount(api: Arc<A>, options: ViewOptions) -> Self {
        let genres = GenreCache::with_fallback(api.clone(), options.fallback_label);
        let catalog = Catalog::new(api, genres);
        catalog.replace_filter(options.filter);

        let channel = LiveChannel::open(options.ws_url, Arc::new(catalog.clone()));

        if let Err(err) = catalog.refresh().await {
            tracing::warn!(error = %err, "Initial catalog load failed");
        }

        Self { catalog, channel }
    }

    /// Returns the catalog loader.
    pub fn catalog(&self) -> &Catalog<A> {
        &self.catalog
    }

    /// Subscribes to published snapshots.
    pub fn subscribe(&self) -> watch::Receiver<CatalogSnapshot> {
        self.catalog.subscribe()
    }

    /// Returns the most recently published snapshot.
    pub fn current(&self) -> CatalogSnapshot {
        self.catalog.current()
    }

    /// Returns the live channel state.
    pub fn channel_state(&self) -> ChannelState {
        self.channel.state()
    }

    /// Subscribes to live channel state changes.
    pub fn watch_channel_state(&self) -> watch::Receiver<ChannelState> {
        self.channel.watch_state()
    }

    /// Applies a new filter and reloads.
    pub async fn set_filter(&self, filter: FilterState) -> Result<Option<CatalogSnapshot>> {
        self.catalog.set_filter(filter).await
    }

    /// Reloads with the current filter.
    pub async fn refresh(&self) -> Result<Option<CatalogSnapshot>> {
        self.catalog.refresh().await
    }

    /// Deletes a book. The listing updates when the server reports the change.
    pub async fn delete_book(&self, id: i64) -> Result<()> {
        self.catalog.delete_book(id).await
    }

    /// Closes the live channel and stops publication. Idempotent.
    pub async fn teardown(&mut self) {
        self.channel.close().await;
        self.catalog.close();
    }
}
