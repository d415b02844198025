//! Cache Entry Module
//!
//! A stored request/response pair. Entries are never modified once created.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::cache::{RequestDescriptor, ResponseSnapshot};

// == Cache Entry ==
/// A cached request together with its complete response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    /// Identity the entry is matched on
    pub request: RequestDescriptor,
    /// Response received for the request
    pub response: ResponseSnapshot,
    /// When the entry was created (preloaded entries default to load time)
    #[serde(default = "Utc::now")]
    pub stored_at: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    pub fn new(request: RequestDescriptor, response: ResponseSnapshot) -> Self {
        Self {
            request,
            response,
            stored_at: Utc::now(),
        }
    }

    // == Matches ==
    /// Returns true if this entry answers `request`.
    pub fn matches(&self, request: &RequestDescriptor) -> bool {
        self.request.matches(request)
    }
}
