//! Cache Module
//!
//! Response cache keyed on request method, URL and fuzzily compared query
//! parameters.

mod descriptor;
mod entry;
mod fuzzy;
mod params;
pub mod preload;
mod response;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use descriptor::RequestDescriptor;
pub use entry::CacheEntry;
pub use fuzzy::{are_basically_equal, is_empty_value, values_basically_equal};
pub use params::{normalize, MultiParams, ParamSource, QueryParams};
pub use response::{ResponseEvent, ResponseSnapshot};
pub use stats::{CacheStats, LookupCounters};
pub use store::CacheStore;

/// A store shared between tasks. Lookups take the read lock, mutations the
/// write lock.
pub type SharedCache = Arc<RwLock<CacheStore>>;
