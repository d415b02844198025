//! Cache Store Module
//!
//! Main cache engine: an insertion-ordered list of entries scanned linearly
//! with the fuzzy request matcher.

use tracing::info;

use crate::cache::{CacheEntry, CacheStats, LookupCounters, RequestDescriptor, ResponseEvent};
use crate::config::CacheConfig;

// == Cache Store ==
/// Response cache keyed on fuzzily compared request descriptors.
///
/// The store does not enforce key uniqueness: two fuzzy-equal entries may
/// coexist, and lookups always return the first one inserted.
#[derive(Debug)]
pub struct CacheStore {
    /// Entries in insertion order
    entries: Vec<CacheEntry>,
    /// Options the store was built with
    config: CacheConfig,
    /// Hit/miss counters updated by lookups
    lookups: LookupCounters,
    /// Counters updated by mutations
    stats: CacheStats,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store.
    pub fn new(config: CacheConfig) -> Self {
        Self::with_entries(config, Vec::new())
    }

    /// Creates a store whose initial contents are `entries`, taken as-is.
    pub fn with_entries(config: CacheConfig, entries: Vec<CacheEntry>) -> Self {
        let mut stats = CacheStats::new();
        stats.set_total_entries(entries.len());
        Self {
            entries,
            config,
            lookups: LookupCounters::default(),
            stats,
        }
    }

    // == Find ==
    /// Returns the first entry matching `request`.
    ///
    /// Method and URL must be identical; params are compared fuzzily.
    pub fn find(&self, request: impl Into<RequestDescriptor>) -> Option<&CacheEntry> {
        let request = request.into();
        let found = self.position(&request).map(|index| &self.entries[index]);

        self.lookups.record(found.is_some());
        if self.config.verbose {
            info!(
                "cache {}: {} (has_params={})",
                if found.is_some() { "hit" } else { "miss" },
                request,
                request.has_params()
            );
        }

        found
    }

    // == Has ==
    /// Returns true if `find` would return an entry.
    pub fn has(&self, request: impl Into<RequestDescriptor>) -> bool {
        self.find(request).is_some()
    }

    // == Insert ==
    /// Appends an entry for `request` if `event` is a complete, successful
    /// response.
    ///
    /// Existing matches are not checked, so repeated inserts for the same
    /// request produce duplicate entries. Returns whether the event was stored.
    pub fn insert(&mut self, request: impl Into<RequestDescriptor>, event: &ResponseEvent) -> bool {
        let request = request.into();

        let Some(snapshot) = event.cacheable() else {
            self.stats.record_rejected();
            if self.config.verbose {
                info!("cache skip: {} ({} event not cacheable)", request, event.kind());
            }
            return false;
        };

        if self.config.verbose {
            info!("cache store: {} (status {})", request, snapshot.status);
        }

        self.entries.push(CacheEntry::new(request, snapshot.clone()));
        self.stats.record_stored();
        self.stats.set_total_entries(self.entries.len());
        true
    }

    // == Bust ==
    /// Removes the first entry matching `request` and returns it.
    ///
    /// Other fuzzy-equal entries are left in place.
    pub fn bust(&mut self, request: impl Into<RequestDescriptor>) -> Option<CacheEntry> {
        let request = request.into();
        let removed = self.position(&request).map(|index| self.entries.remove(index));

        if removed.is_some() {
            self.stats.record_busted(1);
            self.stats.set_total_entries(self.entries.len());
        }
        if self.config.verbose {
            info!(
                "cache bust: {} ({})",
                request,
                if removed.is_some() { "removed" } else { "not cached" }
            );
        }

        removed
    }

    // == Bust All ==
    /// Removes every entry. Returns how many were removed.
    pub fn bust_all(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();

        self.stats.record_busted(count);
        self.stats.set_total_entries(0);
        if self.config.verbose {
            info!("cache bust: all ({} entries removed)", count);
        }

        count
    }

    // == Entries ==
    /// Read-only view of the entries in insertion order.
    pub fn entries(&self) -> &[CacheEntry] {
        &self.entries
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        self.lookups.fill(&mut stats);
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, request: &RequestDescriptor) -> Option<usize> {
        self.entries.iter().position(|entry| entry.matches(request))
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(CacheConfig::default())
    }
}
