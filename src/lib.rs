//! Fuzzy Cache - An in-memory response cache for outbound requests
//!
//! Entries are matched on method, URL and query parameters, where absent,
//! null and empty parameter values are treated as equivalent.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;

pub use api::AppState;
pub use cache::{CacheEntry, CacheStore, RequestDescriptor, ResponseEvent, ResponseSnapshot};
pub use config::{CacheConfig, Config};
pub use error::CacheError;
