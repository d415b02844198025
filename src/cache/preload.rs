//! Preload Module
//!
//! Reads an initial set of entries from a JSON file. The contents are taken
//! as-is; only their structural shape is checked.

use std::fs;
use std::path::Path;

use tracing::info;

use crate::cache::CacheEntry;
use crate::error::{CacheError, Result};

/// Loads a JSON array of cache entries from `path`.
pub fn load_entries(path: impl AsRef<Path>) -> Result<Vec<CacheEntry>> {
    let path = path.as_ref();
    let raw = fs::read_to_string(path).map_err(|e| {
        CacheError::Preload(format!("failed to read {}: {}", path.display(), e))
    })?;

    let entries = parse_entries(&raw)?;
    info!("Loaded {} preload entries from {}", entries.len(), path.display());
    Ok(entries)
}

/// Parses a JSON array of cache entries.
pub fn parse_entries(raw: &str) -> Result<Vec<CacheEntry>> {
    serde_json::from_str(raw)
        .map_err(|e| CacheError::Preload(format!("invalid preload contents: {}", e)))
}
