//! catalog_core - Pure types and functions for the catalog view-model.
//!
//! Nothing in this crate performs I/O. The `catalog` module holds the data
//! model and query building, the `events` module parses live-channel payloads.

pub mod catalog;
pub mod events;
