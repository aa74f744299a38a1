//! Cache Module
//!
//! In-memory key-value cache with per-entry TTL and lazy expiry on read.

mod entry;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use store::CacheStore;

// == Public Constants ==
/// Cache key holding the full normalized character list
pub const ALL_CHARACTERS_KEY: &str = "characters:all";

/// Builds the cache key for a single character lookup.
pub fn character_key(id: &str) -> String {
    format!("characters:{}", id)
}
