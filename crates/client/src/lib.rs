//! catalog_client - Live catalog view-model and CLI for the library API.

pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod output;
pub mod view;

pub use api::CatalogApi;
pub use client::{CatalogClient, StaticToken, TokenSource};
pub use config::Config;
pub use error::{ClientError, Result};
pub use view::{Catalog, CatalogView, ChannelState, GenreCache, LiveChannel};
