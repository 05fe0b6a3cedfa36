mod error;
mod filter;
mod operations;
mod types;

pub use error::{FilterError, Result};
pub use filter::{FilterState, Ordering};
pub use operations::{distinct_genre_ids, genre_label};
pub use types::{Book, CatalogSnapshot, Genre, DEFAULT_FALLBACK_LABEL};
